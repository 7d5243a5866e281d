//! In-process scanner device emulator.
//!
//! This crate serves the device's REST surface over a real HTTP listener so
//! the client, the session layer and the operator console can be exercised
//! end to end without physical hardware:
//!
//! ```text
//! DeviceClient ───(HTTP + Basic auth)───> DeviceEmulator
//!                                             │
//!                                             ├─> reservation hold (single)
//!                                             └─> canned scan resources
//! ```
//!
//! The emulator models the behaviors the console depends on:
//! - Basic-auth gate on every route
//! - a single reservation hold with a device-side expiry deadline
//! - scan execution returning a resource list derived from the request
//! - per-resource artificial delays, so tests can force result fetches to
//!   complete out of order
//!
//! # Example
//!
//! ```no_run
//! use scandesk_emulator::{DeviceEmulator, EmulatorConfig};
//!
//! # async fn example() -> std::io::Result<()> {
//! let handle = DeviceEmulator::spawn(EmulatorConfig::default()).await?;
//! println!("emulated scanner at {}", handle.base_url());
//! # Ok(())
//! # }
//! ```

mod routes;
mod samples;
mod state;

pub use state::EmulatorConfig;

use state::EmulatorState;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

/// The emulated scanner device.
pub struct DeviceEmulator {
    state: Arc<EmulatorState>,
}

impl DeviceEmulator {
    /// Create an emulator with the given configuration.
    #[must_use]
    pub fn new(config: EmulatorConfig) -> Self {
        Self {
            state: Arc::new(EmulatorState::new(config)),
        }
    }

    /// Serve on the given address until the task is dropped or fails.
    ///
    /// # Errors
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn serve(self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "device emulator listening");
        axum::serve(listener, routes::router(self.state)).await
    }

    /// Bind an ephemeral localhost port and serve in a background task.
    ///
    /// # Errors
    /// Returns an error if the listener cannot bind.
    pub async fn spawn(config: EmulatorConfig) -> std::io::Result<EmulatorHandle> {
        let state = Arc::new(EmulatorState::new(config));
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        let router = routes::router(state.clone());

        let task = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router).await {
                tracing::error!(%error, "device emulator stopped");
            }
        });

        info!(%addr, "device emulator spawned");
        Ok(EmulatorHandle { addr, state, task })
    }
}

/// Handle to a spawned emulator: its address plus introspection for tests.
pub struct EmulatorHandle {
    addr: SocketAddr,
    state: Arc<EmulatorState>,
    task: JoinHandle<()>,
}

impl EmulatorHandle {
    /// Address the emulator is listening on.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for a client pointed at this emulator.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Identifier of the currently held reservation, if any.
    #[must_use]
    pub fn active_reservation(&self) -> Option<String> {
        self.state.active_reservation()
    }

    /// How many release calls the emulator has accepted.
    #[must_use]
    pub fn release_count(&self) -> u64 {
        self.state.release_count()
    }

    /// Expire the current hold immediately, as the device would after its
    /// timeout elapses.
    pub fn expire_reservation(&self) {
        self.state.expire_reservation();
    }
}

impl Drop for EmulatorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
