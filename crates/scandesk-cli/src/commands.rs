//! Subcommand implementations for the operator console.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use base64::Engine;
use scandesk_client::{DeviceClient, TransportConfig};
use scandesk_core::{Credentials, IlluminationBand};
use scandesk_emulator::{DeviceEmulator, EmulatorConfig};
use scandesk_protocol::ScanReport;
use scandesk_session::Session;
use tracing::{info, warn};

use crate::ConnectionOpts;

fn build_session(conn: &ConnectionOpts) -> Result<Session> {
    let client = DeviceClient::new(TransportConfig {
        base_url: conn.base_url.clone(),
        credentials: Credentials::new(&conn.username, &conn.password),
        ..TransportConfig::default()
    })
    .context("failed to build device client")?;

    Ok(Session::new(client, conn.timeout))
}

/// Reserve the device, print its system information, release it.
pub(crate) async fn info(conn: &ConnectionOpts) -> Result<()> {
    let mut session = build_session(conn)?;
    session.connect().await.context("could not reserve the scanner")?;

    let info = session.fetch_system_info().await?;
    println!("Server:            {}", info.server);
    println!("Web API version:   {}", info.web_api_version);
    println!("Connected/plugged: {}/{}", info.connected, info.plugged);

    let device = &info.device_data;
    println!("Serial number:     {}", device.device_serial_number);
    println!("Production id:     {}", device.device_production_id);
    println!("Firmware:          {}", device.device_firmware_version_string);
    println!(
        "USB vid:pid:       {:04x}:{:04x}",
        device.device_vid, device.device_pid
    );
    println!("UV light:          {}", flag(device.device_support_uv_light));
    println!("Color:             {}", flag(device.device_support_color));
    println!("Barcode:           {}", flag(device.device_support_barcode));
    println!(
        "Glare reduction:   {}",
        flag(device.device_support_glare_reduction)
    );

    session.disconnect().await?;
    Ok(())
}

fn flag(value: u8) -> &'static str {
    if value != 0 { "yes" } else { "no" }
}

fn verdict(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Reserve, scan, print the dispatched report, release.
pub(crate) async fn scan(conn: &ConnectionOpts, save_images: Option<PathBuf>) -> Result<()> {
    let mut session = build_session(conn)?;
    session.connect().await.context("could not reserve the scanner")?;

    let report = session.scan().await.context("scan failed")?;
    render_report(report);

    if let Some(dir) = save_images {
        export_images(report, &dir)?;
    }

    session.accept().await?;
    Ok(())
}

/// Poll until a document is on the glass, then scan it.
pub(crate) async fn watch(conn: &ConnectionOpts, interval_secs: u64) -> Result<()> {
    let mut session = build_session(conn)?;
    session.connect().await.context("could not reserve the scanner")?;

    // Arm the device's MRZ reading mode while we wait.
    if let Some(reservation) = session.reservation() {
        session.client().trigger_mrz_read(reservation).await?;
    }

    info!("waiting for a document");
    loop {
        if session.check_expiry().await? {
            bail!("reservation expired before a document was presented");
        }

        let state = session.client().document_state().await?;
        if state["present"].as_bool().unwrap_or(false) {
            break;
        }

        tokio::time::sleep(Duration::from_secs(interval_secs)).await;
    }

    let report = session.scan().await.context("scan failed")?;
    render_report(report);
    session.accept().await?;
    Ok(())
}

/// Serve the bundled device emulator.
pub(crate) async fn emulate(username: &str, password: &str, port: u16) -> Result<()> {
    let emulator = DeviceEmulator::new(EmulatorConfig {
        credentials: Credentials::new(username, password),
        ..EmulatorConfig::default()
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Emulated scanner listening on http://{addr}");
    emulator.serve(addr).await.context("emulator failed")
}

fn render_report(report: &ScanReport) {
    println!("── Checks ─────────────────────────────");
    println!("Checksums:    {}", verdict(report.checksums.as_deref()));
    println!("Age check:    {}", verdict(report.age_check.as_deref()));
    println!("Expiry check: {}", verdict(report.expiry_check.as_deref()));

    match &report.uv_dullness {
        Some(uv) if uv.available => println!(
            "UV dullness:  document={} face={} mrz={}",
            uv.document, uv.face, uv.mrz
        ),
        _ => println!("UV dullness:  -"),
    }

    match &report.b900_check {
        Some(ink) if ink.available => println!("B900 ink:     {}", ink.test_result),
        _ => println!("B900 ink:     -"),
    }

    println!("── MRZ ────────────────────────────────");
    match &report.mrz {
        Some(mrz) if mrz.available => {
            println!("Holder:       {} ({})", mrz.holder_name, mrz.holder_sex);
            println!(
                "Document:     {} {} issued by {}",
                mrz.document_code, mrz.document_number, mrz.document_issuer
            );
            println!("Nationality:  {}", mrz.holder_nationality);
            println!("  {}", mrz.line1);
            println!("  {}", mrz.line2);
        }
        _ => println!("No MRZ read"),
    }

    println!("── Images ─────────────────────────────");
    for band in IlluminationBand::ALL {
        let status = match report.image(band) {
            Some(image) if image.img.is_some() => "captured",
            Some(_) => "unavailable",
            None => "-",
        };
        println!("{band:12} {status}");
    }

    if !report.unmatched.is_empty() {
        warn!(count = report.unmatched.len(), "unrecognized scan resources");
        for resource in &report.unmatched {
            println!("unrecognized: {resource}");
        }
    }
}

fn export_images(report: &ScanReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not create {}", dir.display()))?;

    for band in IlluminationBand::ALL {
        let Some(encoded) = report.image(band).and_then(|image| image.img.as_deref()) else {
            continue;
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .with_context(|| format!("invalid image payload for {band}"))?;

        let path = dir.join(format!("{band}.jpg"));
        std::fs::write(&path, bytes)
            .with_context(|| format!("could not write {}", path.display()))?;
        println!("saved {}", path.display());
    }

    Ok(())
}
