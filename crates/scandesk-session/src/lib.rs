//! Operator session layer: lifecycle state machine and call sequencing.
//!
//! # Components
//!
//! - **SessionMachine**: the Disconnected → Reserved → ResultsPending
//!   lifecycle with transition rules and the expiry countdown
//! - **Session**: owns a `DeviceClient` and drives connect / scan /
//!   accept / reject / expiry against it
//!
//! # Example
//!
//! ```no_run
//! use scandesk_client::{DeviceClient, TransportConfig};
//! use scandesk_session::Session;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DeviceClient::new(TransportConfig::default())?;
//! let mut session = Session::new(client, 300);
//!
//! session.connect().await?;
//! let report = session.scan().await?;
//! println!("checksums: {:?}", report.checksums);
//! session.accept().await?;
//! # Ok(())
//! # }
//! ```

mod session;
mod state_machine;

pub use session::Session;
pub use state_machine::{SessionMachine, SessionState, StateTransition};
