//! End-to-end session flows against the device emulator:
//! connect → scan → accept/reject, plus countdown expiry.

use scandesk_client::{DeviceClient, TransportConfig};
use scandesk_core::{Credentials, Error};
use scandesk_emulator::{DeviceEmulator, EmulatorConfig, EmulatorHandle};
use scandesk_session::{Session, SessionState};

const RESERVATION_TIMEOUT_SECS: u64 = 60;

async fn spawn_emulator() -> EmulatorHandle {
    DeviceEmulator::spawn(EmulatorConfig::default())
        .await
        .expect("emulator failed to bind")
}

fn session_for(handle: &EmulatorHandle, timeout_secs: u64) -> Session {
    let client = DeviceClient::new(TransportConfig {
        base_url: handle.base_url(),
        credentials: Credentials::new("operator", "secret"),
        ..TransportConfig::default()
    })
    .expect("client failed to build");

    Session::new(client, timeout_secs)
}

#[tokio::test]
async fn test_accept_path() {
    let handle = spawn_emulator().await;
    let mut session = session_for(&handle, RESERVATION_TIMEOUT_SECS);

    assert_eq!(session.state(), SessionState::Disconnected);

    session.connect().await.unwrap();
    assert_eq!(session.state(), SessionState::Reserved);
    assert!(session.time_remaining().is_some());
    assert_eq!(
        handle.active_reservation().as_deref(),
        session.reservation().map(|r| r.as_str())
    );

    session.fetch_system_info().await.unwrap();
    assert!(session.system_info().unwrap().connected);

    let report = session.scan().await.unwrap();
    assert_eq!(report.checksums.as_deref(), Some("OK"));
    assert_eq!(session.state(), SessionState::ResultsPending);

    session.accept().await.unwrap();
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(session.reservation().is_none());
    assert!(session.report().is_none());
    assert!(session.time_remaining().is_none());
    assert_eq!(handle.active_reservation(), None);
    assert_eq!(handle.release_count(), 1);
}

#[tokio::test]
async fn test_reject_path_allows_rescan() {
    let handle = spawn_emulator().await;
    let mut session = session_for(&handle, RESERVATION_TIMEOUT_SECS);

    session.connect().await.unwrap();
    session.scan().await.unwrap();

    session.reject().await.unwrap();
    assert_eq!(session.state(), SessionState::Reserved);
    assert!(session.report().is_none());
    // The hold survives a rejection.
    assert!(handle.active_reservation().is_some());

    // Scanning again produces a fresh report.
    let report = session.scan().await.unwrap();
    assert!(report.mrz.is_some());
    assert_eq!(session.state(), SessionState::ResultsPending);

    session.accept().await.unwrap();
    assert_eq!(handle.release_count(), 1);
}

#[tokio::test]
async fn test_failed_connect_changes_nothing() {
    let handle = spawn_emulator().await;

    // A competing session already holds the device.
    let mut holder = session_for(&handle, RESERVATION_TIMEOUT_SECS);
    holder.connect().await.unwrap();

    let mut session = session_for(&handle, RESERVATION_TIMEOUT_SECS);
    let result = session.connect().await;

    assert!(matches!(result, Err(Error::DeviceCall { status: 409, .. })));
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(session.reservation().is_none());
    assert!(session.time_remaining().is_none());
}

#[tokio::test]
async fn test_expiry_triggers_explicit_release() {
    let handle = spawn_emulator().await;
    // Zero timeout: the countdown is already elapsed after connect.
    let mut session = session_for(&handle, 0);

    session.connect().await.unwrap();
    assert_eq!(session.state(), SessionState::Reserved);

    let expired = session.check_expiry().await.unwrap();
    assert!(expired);
    assert_eq!(session.state(), SessionState::Disconnected);
    assert!(session.reservation().is_none());

    // The session did not rely on device-side expiry: it sent the release.
    assert_eq!(handle.release_count(), 1);
    assert_eq!(handle.active_reservation(), None);
}

#[tokio::test]
async fn test_expiry_is_a_noop_while_countdown_runs() {
    let handle = spawn_emulator().await;
    let mut session = session_for(&handle, RESERVATION_TIMEOUT_SECS);

    session.connect().await.unwrap();
    let expired = session.check_expiry().await.unwrap();

    assert!(!expired);
    assert_eq!(session.state(), SessionState::Reserved);
    assert!(session.reservation().is_some());
    assert_eq!(handle.release_count(), 0);
}

#[tokio::test]
async fn test_scan_requires_reserved_state() {
    let handle = spawn_emulator().await;
    let mut session = session_for(&handle, RESERVATION_TIMEOUT_SECS);

    let result = session.scan().await;
    assert!(matches!(result, Err(Error::InvalidStateTransition { .. })));
}

#[tokio::test]
async fn test_connection_params_read_only_while_reserved() {
    let handle = spawn_emulator().await;
    let mut session = session_for(&handle, RESERVATION_TIMEOUT_SECS);

    session.set_credentials("operator", "secret").unwrap();
    session.connect().await.unwrap();

    assert!(matches!(
        session.set_base_url("http://other:1"),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        session.set_credentials("x", "y"),
        Err(Error::Config(_))
    ));
}

#[tokio::test]
async fn test_double_connect_rejected_locally() {
    let handle = spawn_emulator().await;
    let mut session = session_for(&handle, RESERVATION_TIMEOUT_SECS);

    session.connect().await.unwrap();
    let result = session.connect().await;

    assert!(matches!(result, Err(Error::InvalidStateTransition { .. })));
    // The original reservation is untouched.
    assert!(session.reservation().is_some());
    assert_eq!(session.state(), SessionState::Reserved);
}
