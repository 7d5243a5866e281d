//! Canned device payloads.
//!
//! The MRZ record is the ICAO 9303 "Utopia" specimen passport, so the
//! values look exactly like real scanner output without describing any real
//! person or document.

use scandesk_core::IlluminationBand;
use scandesk_protocol::{B900Check, CheckResult, DeviceData, ImageResult, Mrz, SystemInfo, UvDullness};

/// Base64 of a minimal JPEG header; enough for display code paths without
/// bloating test traffic.
pub(crate) const JPEG_STUB: &str = "/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAAg=";

pub(crate) fn system_info() -> SystemInfo {
    SystemInfo {
        connected: true,
        web_api_version: "2.4.1".to_string(),
        plugged: true,
        server: "scandesk-emulator".to_string(),
        device_data: DeviceData {
            api_version_string: "2.4.1".to_string(),
            device_firmware_date: "2025-03-18".to_string(),
            device_firmware_time: "11:52:07".to_string(),
            device_firmware_version_major: 3,
            device_firmware_version_minor: 7,
            device_firmware_version_string: "3.7.0".to_string(),
            device_illumination_generation: 2,
            device_illumination_generation_verbose: "Gen2".to_string(),
            device_illumination_revision: 1,
            device_illumination_revision_verbose: "Rev1".to_string(),
            device_illumination_variant: 4,
            device_illumination_variant_verbose: "IR/VIS/UV".to_string(),
            device_pcb_revision: "C".to_string(),
            device_pid: 0x0a17,
            device_production_id: "PRD-2025-118".to_string(),
            device_serial_number: "SN-001122".to_string(),
            device_support_barcode: 1,
            device_support_color: 1,
            device_support_glare_reduction: 1,
            device_support_real_time_clock: 1,
            device_support_uv_light: 1,
            device_vid: 0x1a79,
            dll_compile_date: "2025-03-20".to_string(),
            dll_compile_time: "09:14:33".to_string(),
            dll_version_string: "2.4.1.0".to_string(),
            ..DeviceData::default()
        },
    }
}

pub(crate) fn check_result() -> CheckResult {
    CheckResult {
        test_result: Some("OK".to_string()),
    }
}

pub(crate) fn uv_dullness() -> UvDullness {
    UvDullness {
        available: true,
        document: "OK".to_string(),
        face: "OK".to_string(),
        mrz: "OK".to_string(),
    }
}

pub(crate) fn b900_check() -> B900Check {
    B900Check {
        available: true,
        test_result: "OK".to_string(),
    }
}

pub(crate) fn image(band: IlluminationBand) -> ImageResult {
    ImageResult {
        available: true,
        img: Some(JPEG_STUB.to_string()),
        // The UV capture doubles as a brightness check on real hardware.
        test_result: matches!(band, IlluminationBand::Ultraviolet).then(|| "OK".to_string()),
    }
}

pub(crate) fn mrz() -> Mrz {
    Mrz {
        available: true,
        composite: "ZE184226B<<<<<10".to_string(),
        composite_checksum: 0,
        document_code: "P".to_string(),
        document_expiry_date: 120_415,
        document_expiry_date_checksum: 9,
        document_expiry_date_day: 15,
        document_expiry_date_month: 4,
        document_expiry_date_year: 12,
        document_issuer: "UTO".to_string(),
        document_number: "L898902C3".to_string(),
        document_number_checksum: 6,
        document_number_composite: "L898902C36".to_string(),
        document_number_composite_checksum: 6,
        document_shape: "ID3".to_string(),
        document_type: "passport".to_string(),
        has_backside: "no".to_string(),
        holder_birth_date: 740_812,
        holder_birth_date_checksum: 2,
        holder_birth_date_day: 12,
        holder_birth_date_month: 8,
        holder_birth_date_year: 74,
        holder_name: "ERIKSSON  ANNA MARIA".to_string(),
        holder_name_primary: "ERIKSSON".to_string(),
        holder_name_secondary: "ANNA MARIA".to_string(),
        holder_nationality: "UTO".to_string(),
        holder_sex: "F".to_string(),
        line1: "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<".to_string(),
        line2: "L898902C36UTO7408122F1204159ZE184226B<<<<<10".to_string(),
        mrz: "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<L898902C36UTO7408122F1204159ZE184226B<<<<<10"
            .to_string(),
        optional: 0,
    }
}
