use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid reservation id: {0}")]
    InvalidReservationId(String),

    // Device call errors
    #[error("Device call failed: {endpoint} returned status {status}")]
    DeviceCall { endpoint: String, status: u16 },

    #[error("Transport failure on {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    // Session errors
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("No active reservation")]
    NoReservation,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
