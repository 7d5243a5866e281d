//! Device and firmware information snapshot.
//!
//! Returned verbatim by `GET /system`. The console only displays these
//! fields; nothing is interpreted client-side.

use serde::{Deserialize, Serialize};

/// Top-level system information.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct SystemInfo {
    /// Whether a scanner is currently connected to the device service.
    pub connected: bool,

    /// Version of the device's web API layer.
    pub web_api_version: String,

    /// Scanner hardware and firmware details.
    pub device_data: DeviceData,

    /// Whether the scanner is physically plugged in.
    pub plugged: bool,

    /// Host name of the device service.
    pub server: String,
}

/// Scanner hardware, firmware and capability fields.
///
/// Capability fields are numeric flags as sent by the device (0 = absent,
/// 1 = present); they are not folded into booleans so the snapshot stays
/// byte-faithful to the wire.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceData {
    pub api_version_string: String,
    pub device_barcode_firmware_revision_info: String,
    pub device_firmware_date: String,
    pub device_firmware_time: String,
    pub device_firmware_version_major: u32,
    pub device_firmware_version_minor: u32,
    pub device_firmware_version_string: String,
    pub device_illumination_generation: u32,
    pub device_illumination_generation_verbose: String,
    pub device_illumination_revision: u32,
    pub device_illumination_revision_verbose: String,
    pub device_illumination_variant: u32,
    pub device_illumination_variant_verbose: String,
    pub device_pcb_revision: String,
    pub device_pid: u16,
    pub device_production_id: String,
    pub device_serial_number: String,
    pub device_support_barcode: u8,
    pub device_support_battery_charge_level: u8,
    pub device_support_color: u8,
    pub device_support_external_buzzer: u8,
    pub device_support_external_status_led: u8,
    pub device_support_glare_reduction: u8,
    pub device_support_graphical_display: u8,
    pub device_support_msr: u8,
    pub device_support_real_time_clock: u8,
    pub device_support_text_display: u8,
    pub device_support_uv_light: u8,
    pub device_vid: u16,
    pub dll_compile_date: String,
    pub dll_compile_time: String,
    pub dll_version_string: String,
}
