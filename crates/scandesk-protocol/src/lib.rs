//! Wire types and result dispatch for the scanner device API.
//!
//! This crate owns the request/response shapes exchanged with the device and
//! the classification of scan-result resources into named report slots. The
//! DTOs are pass-through records: nothing here validates or recomputes
//! device-provided fields.
//!
//! # Components
//!
//! - **system**: device/firmware information snapshot
//! - **scan**: scan configuration and the execute response
//! - **results**: per-check payload shapes (MRZ, UV-dullness, ink check, images)
//! - **dispatch**: resource-path classification and [`ScanReport`] assembly

pub mod dispatch;
pub mod results;
pub mod scan;
pub mod system;

pub use dispatch::{ResultKind, ScanReport, classify};
pub use results::{B900Check, CheckResult, ImageResult, Mrz, UvDullness};
pub use scan::{LightSource, LightSources, Resolution, ScanExecuteInfo, ScanRequest, ScanResource};
pub use system::{DeviceData, SystemInfo};

// Re-export types from scandesk-core for convenience
pub use scandesk_core::{Cropping, IlluminationBand};
