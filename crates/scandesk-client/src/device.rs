//! Device API client for the scanner's REST surface.
//!
//! `DeviceClient` translates the logical operations into HTTP calls:
//!
//! ```text
//! Operator console
//!     │
//!     ├─> DeviceClient
//!     │       │
//!     │       └─> Transport ───(HTTP + Basic auth)───> Scanner device
//! ```
//!
//! The reservation identifier is threaded through every post-reservation
//! call as an argument; the client holds no reservation state of its own.
//! A call issued with a stale identifier is answered by the device with a
//! non-success status and surfaces as a device-call error, never as a local
//! check.

use scandesk_core::constants::{
    DEVICE_MRZ_PATH, DOCUMENT_STATE_PATH, PARAM_RESERVATION_ID, PARAM_TIMEOUT, RESERVATION_PATH,
    RESOURCE_FETCH_TIMEOUT_SECS, SCAN_EXECUTE_PATH, SYSTEM_PATH,
};
use scandesk_core::{ReservationId, Result};
use scandesk_protocol::{ScanExecuteInfo, ScanRequest, ScanResource, SystemInfo};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::transport::{Transport, TransportConfig};

#[derive(Serialize)]
struct ReservationRequest {
    timeout: u64,
}

#[derive(Deserialize)]
struct ReservationResponse {
    reservationid: String,
}

/// Client for the scanner device API.
///
/// One reconfigurable client per operator session, constructed explicitly
/// and handed to whoever sequences the calls.
pub struct DeviceClient {
    transport: Transport,
}

impl DeviceClient {
    /// Create a client from a transport configuration.
    ///
    /// # Errors
    /// Returns `Error::Config` if the transport cannot be built.
    pub fn new(config: TransportConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Wrap an existing transport.
    #[must_use]
    pub fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// Point the client at a different base URL. Local only, chainable.
    pub fn set_base_url(&mut self, url: &str) -> &mut Self {
        self.transport.set_base_url(url);
        self
    }

    /// Replace the credentials and re-derive the authorization value.
    /// Local only, chainable.
    pub fn set_credentials(&mut self, username: &str, password: &str) -> &mut Self {
        self.transport.set_credentials(username, password);
        self
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Reserve the device for `timeout_secs` seconds.
    ///
    /// On success the device returns the reservation identifier that every
    /// subsequent call must reference. On failure nothing is stored
    /// anywhere; whatever reservation the caller held before is untouched.
    ///
    /// # Errors
    /// Returns `Error::DeviceCall` when the device refuses (e.g. already
    /// held), `Error::Transport` when it is unreachable.
    pub async fn create_reservation(&self, timeout_secs: u64) -> Result<ReservationId> {
        let response: ReservationResponse = self
            .transport
            .post_json(RESERVATION_PATH, &ReservationRequest {
                timeout: timeout_secs,
            })
            .await?;

        let id = ReservationId::new(&response.reservationid)?;
        info!(reservation = %id, timeout_secs, "reservation created");
        Ok(id)
    }

    /// Fetch the device/firmware information snapshot.
    pub async fn system_info(&self, reservation: &ReservationId) -> Result<SystemInfo> {
        let endpoint = format!("{SYSTEM_PATH}?{PARAM_RESERVATION_ID}={reservation}");
        self.transport.get_json(&endpoint).await
    }

    /// Execute a scan and fetch every listed result resource.
    ///
    /// The execute call returns the resource list; all per-resource fetches
    /// then run concurrently. The returned pairs keep the resource-list
    /// order regardless of which fetch finished first, and any single fetch
    /// failing fails the whole operation — there is no partial result.
    pub async fn scan_execute(
        &self,
        reservation: &ReservationId,
        request: &ScanRequest,
    ) -> Result<Vec<ScanResource>> {
        let endpoint = format!("{SCAN_EXECUTE_PATH}?{PARAM_RESERVATION_ID}={reservation}");
        let info: ScanExecuteInfo = self.transport.put_json(&endpoint, request).await?;
        debug!(resources = info.resource_list.len(), "scan executed, fetching results");

        let fetches = info.resource_list.iter().map(|resource| {
            let path = format!(
                "{resource}?{PARAM_RESERVATION_ID}={reservation}&{PARAM_TIMEOUT}={RESOURCE_FETCH_TIMEOUT_SECS}"
            );
            async move { self.transport.get_json::<serde_json::Value>(&path).await }
        });

        let payloads = futures::future::try_join_all(fetches).await?;

        Ok(info
            .resource_list
            .into_iter()
            .zip(payloads)
            .map(|(resource, payload)| ScanResource { resource, payload })
            .collect())
    }

    /// Release the device hold.
    pub async fn release_reservation(&self, reservation: &ReservationId) -> Result<()> {
        let endpoint = format!("{RESERVATION_PATH}?{PARAM_RESERVATION_ID}={reservation}");
        self.transport.delete_discard(&endpoint).await?;
        info!(reservation = %reservation, "reservation released");
        Ok(())
    }

    /// Extend ("keep") the device hold, restarting its timeout.
    pub async fn extend_reservation(&self, reservation: &ReservationId) -> Result<()> {
        let endpoint = format!("{RESERVATION_PATH}?{PARAM_RESERVATION_ID}={reservation}");
        self.transport.put_discard(&endpoint).await?;
        debug!(reservation = %reservation, "reservation extended");
        Ok(())
    }

    /// Put the device into MRZ reading mode. Fire-and-forget: the response
    /// body carries nothing of interest and is discarded.
    pub async fn trigger_mrz_read(&self, reservation: &ReservationId) -> Result<()> {
        let endpoint = format!(
            "{DEVICE_MRZ_PATH}?{PARAM_RESERVATION_ID}={reservation}&{PARAM_TIMEOUT}={RESOURCE_FETCH_TIMEOUT_SECS}"
        );
        self.transport.get_discard(&endpoint).await
    }

    /// Fetch the current document-presence snapshot.
    ///
    /// The shape is device-defined and passed through opaquely; callers
    /// probe the fields they know about.
    pub async fn document_state(&self) -> Result<serde_json::Value> {
        self.transport.get_json(DOCUMENT_STATE_PATH).await
    }
}
