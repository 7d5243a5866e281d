//! Operator session orchestration.
//!
//! `Session` sequences the device calls the way the operator console does:
//! connect reserves the device and arms the expiry countdown, scan fills the
//! result slots, accept/reject settle the review and release or extend the
//! hold. One operation is in flight at a time; a failed operation leaves the
//! session exactly as it was and the operator retries by hand.

use std::time::Duration;

use scandesk_client::DeviceClient;
use scandesk_core::{Error, ReservationId, Result};
use scandesk_protocol::{ScanReport, ScanRequest, SystemInfo};
use tracing::{info, warn};

use crate::state_machine::{SessionMachine, SessionState};

/// Operator session over one device client.
pub struct Session {
    client: DeviceClient,
    machine: SessionMachine,
    reservation_timeout_secs: u64,
    reservation: Option<ReservationId>,
    system_info: Option<SystemInfo>,
    report: Option<ScanReport>,
}

impl Session {
    /// Create a session around a configured client.
    #[must_use]
    pub fn new(client: DeviceClient, reservation_timeout_secs: u64) -> Self {
        Self {
            client,
            machine: SessionMachine::new(),
            reservation_timeout_secs,
            reservation: None,
            system_info: None,
            report: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.machine.current_state()
    }

    /// The active reservation, if any.
    #[must_use]
    pub fn reservation(&self) -> Option<&ReservationId> {
        self.reservation.as_ref()
    }

    /// The latest system-info snapshot, if fetched this session.
    #[must_use]
    pub fn system_info(&self) -> Option<&SystemInfo> {
        self.system_info.as_ref()
    }

    /// The latest scan report, if a scan completed.
    #[must_use]
    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    /// Remaining time on the reservation countdown.
    #[must_use]
    pub fn time_remaining(&self) -> Option<Duration> {
        self.machine.time_remaining()
    }

    /// Access the underlying client.
    #[must_use]
    pub fn client(&self) -> &DeviceClient {
        &self.client
    }

    /// Repoint the client at a different base URL.
    ///
    /// # Errors
    /// Connection parameters are read-only while a reservation is active;
    /// returns `Error::Config` outside `Disconnected`.
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        self.ensure_disconnected()?;
        self.client.set_base_url(url);
        Ok(())
    }

    /// Replace the credentials.
    ///
    /// # Errors
    /// Connection parameters are read-only while a reservation is active;
    /// returns `Error::Config` outside `Disconnected`.
    pub fn set_credentials(&mut self, username: &str, password: &str) -> Result<()> {
        self.ensure_disconnected()?;
        self.client.set_credentials(username, password);
        Ok(())
    }

    fn ensure_disconnected(&self) -> Result<()> {
        if self.state() != SessionState::Disconnected {
            return Err(Error::Config(
                "connection parameters are read-only while a reservation is active".to_string(),
            ));
        }
        Ok(())
    }

    /// Reserve the device and arm the expiry countdown.
    ///
    /// On failure nothing changes: the state stays `Disconnected` and any
    /// previously stored reservation id is untouched.
    pub async fn connect(&mut self) -> Result<&ReservationId> {
        if !self.state().can_transition_to(SessionState::Reserved) {
            return Err(Error::InvalidStateTransition {
                from: self.state().to_string(),
                to: SessionState::Reserved.to_string(),
            });
        }

        let id = self
            .client
            .create_reservation(self.reservation_timeout_secs)
            .await?;

        self.machine.transition_to(SessionState::Reserved)?;
        self.machine
            .arm_countdown(Duration::from_secs(self.reservation_timeout_secs));
        info!(reservation = %id, "session connected");
        Ok(self.reservation.insert(id))
    }

    /// Fetch and keep the device/firmware snapshot.
    ///
    /// # Errors
    /// Returns `Error::NoReservation` before a successful connect.
    pub async fn fetch_system_info(&mut self) -> Result<&SystemInfo> {
        let reservation = self.reservation.as_ref().ok_or(Error::NoReservation)?;
        let info = self.client.system_info(reservation).await?;
        Ok(self.system_info.insert(info))
    }

    /// Run a scan with the operator default profile.
    pub async fn scan(&mut self) -> Result<&ScanReport> {
        self.scan_with(&ScanRequest::operator_default()).await
    }

    /// Run a scan with a custom request and dispatch its results.
    ///
    /// The new report replaces any previous one; result sets are never
    /// merged across scans.
    pub async fn scan_with(&mut self, request: &ScanRequest) -> Result<&ScanReport> {
        if !self.state().can_transition_to(SessionState::ResultsPending) {
            return Err(Error::InvalidStateTransition {
                from: self.state().to_string(),
                to: SessionState::ResultsPending.to_string(),
            });
        }
        let reservation = self.reservation.as_ref().ok_or(Error::NoReservation)?;

        let pairs = self.client.scan_execute(reservation, request).await?;
        let report = ScanReport::dispatch(pairs);

        self.machine.transition_to(SessionState::ResultsPending)?;
        Ok(self.report.insert(report))
    }

    /// Accept the results: release the device and clear the session.
    pub async fn accept(&mut self) -> Result<()> {
        if !matches!(self.state(), SessionState::ResultsPending) {
            return Err(Error::InvalidStateTransition {
                from: self.state().to_string(),
                to: SessionState::Disconnected.to_string(),
            });
        }
        let reservation = self.reservation.as_ref().ok_or(Error::NoReservation)?;

        self.client.release_reservation(reservation).await?;
        self.machine.transition_to(SessionState::Disconnected)?;
        self.machine.disarm_countdown();
        self.reservation = None;
        self.system_info = None;
        self.report = None;
        info!("results accepted, session closed");
        Ok(())
    }

    /// Reject the results: extend the reservation, clear the report and
    /// return to `Reserved` so the scan can be retried.
    pub async fn reject(&mut self) -> Result<()> {
        if !matches!(self.state(), SessionState::ResultsPending) {
            return Err(Error::InvalidStateTransition {
                from: self.state().to_string(),
                to: SessionState::Reserved.to_string(),
            });
        }
        let reservation = self.reservation.as_ref().ok_or(Error::NoReservation)?;

        self.client.extend_reservation(reservation).await?;
        self.machine.transition_to(SessionState::Reserved)?;
        self.machine
            .arm_countdown(Duration::from_secs(self.reservation_timeout_secs));
        self.report = None;
        info!("results rejected, reservation extended");
        Ok(())
    }

    /// Release the device and close the session from any connected state.
    ///
    /// The operator closing the console without a verdict still gives the
    /// hold back. Idempotent when already disconnected.
    pub async fn disconnect(&mut self) -> Result<()> {
        if self.state() == SessionState::Disconnected {
            return Ok(());
        }
        let reservation = self.reservation.as_ref().ok_or(Error::NoReservation)?;

        self.client.release_reservation(reservation).await?;
        self.machine.transition_to(SessionState::Disconnected)?;
        self.machine.disarm_countdown();
        self.reservation = None;
        self.system_info = None;
        self.report = None;
        info!("session disconnected");
        Ok(())
    }

    /// Handle countdown expiry.
    ///
    /// When the countdown has elapsed with no operator verdict, the session
    /// deliberately attempts an explicit release rather than relying on the
    /// device's own expiry; a failed attempt is logged and ignored since the
    /// device may already have dropped the hold. Returns `true` when the
    /// session transitioned to `Disconnected`.
    pub async fn check_expiry(&mut self) -> Result<bool> {
        if self.state() == SessionState::Disconnected || !self.machine.has_expired() {
            return Ok(false);
        }

        if let Some(reservation) = self.reservation.take() {
            if let Err(error) = self.client.release_reservation(&reservation).await {
                warn!(%error, reservation = %reservation, "release on expiry failed");
            }
        }

        self.machine.transition_to(SessionState::Disconnected)?;
        self.machine.disarm_countdown();
        self.system_info = None;
        self.report = None;
        info!("reservation countdown expired, session closed");
        Ok(true)
    }
}
