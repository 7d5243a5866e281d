//! HTTP client for the scanner device REST API.
//!
//! This crate provides the authenticated transport and the device client
//! that turns the four logical operations (reserve, query, scan, release)
//! into HTTP calls.
//!
//! # Components
//!
//! - **Transport**: authenticated GET/POST/PUT/DELETE against a configured
//!   base URL
//! - **DeviceClient**: the reservation lifecycle, system-info query, scan
//!   execution with its concurrent result fan-out, and the auxiliary
//!   document-state / MRZ-mode calls
//!
//! # Example
//!
//! ```no_run
//! use scandesk_client::{DeviceClient, TransportConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = DeviceClient::new(TransportConfig::default())?;
//! client
//!     .set_base_url("http://192.168.0.40:7700")
//!     .set_credentials("operator", "secret");
//!
//! let reservation = client.create_reservation(300).await?;
//! let info = client.system_info(&reservation).await?;
//! println!("scanner serial: {}", info.device_data.device_serial_number);
//! client.release_reservation(&reservation).await?;
//! # Ok(())
//! # }
//! ```

mod device;
mod transport;

pub use device::DeviceClient;
pub use transport::{Transport, TransportConfig};
