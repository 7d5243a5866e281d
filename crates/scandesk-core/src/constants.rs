//! Constants for the scanner device REST surface.
//!
//! All paths are relative to the configured base URL. Reservation-scoped
//! calls append the reservation identifier as a query parameter:
//!
//! ```text
//! GET /system?reservationid=<id>
//! ```
//!
//! Scan-result resources are fetched from the paths the device returns in
//! the execute response, with the reservation id and a per-resource timeout
//! appended the same way.

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Reservation endpoint.
///
/// POST creates a hold, DELETE releases it, PUT extends it.
pub const RESERVATION_PATH: &str = "/reservation";

/// Device and firmware information snapshot.
pub const SYSTEM_PATH: &str = "/system";

/// Scan trigger. PUT with the scan configuration; the response lists the
/// result resources to fetch.
pub const SCAN_EXECUTE_PATH: &str = "/scan/execute";

/// Fire-and-forget trigger that puts the device into MRZ reading mode.
pub const DEVICE_MRZ_PATH: &str = "/device-mrz";

/// Document-presence snapshot.
pub const DOCUMENT_STATE_PATH: &str = "/document-state";

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameter carrying the reservation identifier.
pub const PARAM_RESERVATION_ID: &str = "reservationid";

/// Query parameter carrying the device-side wait budget in seconds.
pub const PARAM_TIMEOUT: &str = "timeout";

// ============================================================================
// Timeout Configuration
// ============================================================================

/// Default reservation timeout requested on connect (seconds).
///
/// The device releases the hold on its own once this elapses; the operator
/// console mirrors it with a local countdown.
pub const DEFAULT_RESERVATION_TIMEOUT_SECS: u64 = 300;

/// Device-side wait budget sent with every scan-result resource fetch
/// (seconds). The device blocks the GET until the resource is ready or this
/// budget runs out.
pub const RESOURCE_FETCH_TIMEOUT_SECS: u64 = 25;

/// Local HTTP timeout for a single request (milliseconds).
///
/// Must exceed [`RESOURCE_FETCH_TIMEOUT_SECS`], since resource fetches are
/// long-polls held open by the device.
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// Scan Defaults
// ============================================================================

/// JPEG quality used by the operator default scan profile.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// PNG compression level used by the operator default scan profile.
pub const DEFAULT_PNG_COMPRESSION: u8 = 1;

/// Image MIME type used by the operator default scan profile.
pub const DEFAULT_IMAGE_FORMAT: &str = "image/jpeg";

// ============================================================================
// Result Resource Path Segments
// ============================================================================
//
// The final segment (or the final two, for images) of a result resource path
// determines which result slot the payload belongs to.

/// Expiry-check verdict resource segment.
pub const SEGMENT_EXPIRY_CHECK: &str = "expiry-check";

/// MRZ checksum verdict resource segment.
pub const SEGMENT_CHECKSUMS: &str = "checksums";

/// Age-check verdict resource segment.
pub const SEGMENT_AGE_CHECK: &str = "age-check";

/// UV-dullness structure resource segment.
pub const SEGMENT_UV_DULLNESS: &str = "uv-dullness";

/// B900 ink check structure resource segment.
pub const SEGMENT_B900_CHECK: &str = "b900-check";

/// MRZ record resource segment.
pub const SEGMENT_MRZ: &str = "mrz";

/// Document-cropped image resource segment, qualified by an illumination
/// band in the adjacent segment.
pub const SEGMENT_DOCUMENT: &str = "document";

// ============================================================================
// Defaults for the Operator Console
// ============================================================================

/// Port the bundled device emulator binds by default.
pub const DEFAULT_EMULATOR_PORT: u16 = 7700;

/// Base URL the console connects to when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7700";
