//! Scan configuration and execute response.
//!
//! A scan is triggered with `PUT /scan/execute` carrying a [`ScanRequest`].
//! The device answers with a [`ScanExecuteInfo`] listing the result
//! resources to fetch; each fetched resource becomes one [`ScanResource`]
//! pair handed to the dispatcher.

use scandesk_core::constants::{
    DEFAULT_IMAGE_FORMAT, DEFAULT_JPEG_QUALITY, DEFAULT_PNG_COMPRESSION,
};
use scandesk_core::{Cropping, IlluminationBand};
use serde::{Deserialize, Serialize};

/// Capture resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Low,
    High,
}

/// Per-band capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightSource {
    /// Whether this band is captured at all.
    #[serde(rename = "use")]
    pub enabled: bool,

    /// Croppings produced for this band.
    pub croppings: Vec<Cropping>,
}

impl LightSource {
    /// A band that is not captured.
    #[must_use]
    pub fn off() -> Self {
        LightSource {
            enabled: false,
            croppings: Vec::new(),
        }
    }

    /// A captured band with the given croppings.
    #[must_use]
    pub fn with_croppings(croppings: &[Cropping]) -> Self {
        LightSource {
            enabled: true,
            croppings: croppings.to_vec(),
        }
    }
}

/// Capture configuration for the three illumination bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightSources {
    pub infrared: LightSource,
    pub visible: LightSource,
    pub ultraviolet: LightSource,
}

impl LightSources {
    /// Access one band's configuration.
    #[must_use]
    pub fn band(&self, band: IlluminationBand) -> &LightSource {
        match band {
            IlluminationBand::Infrared => &self.infrared,
            IlluminationBand::Visible => &self.visible,
            IlluminationBand::Ultraviolet => &self.ultraviolet,
        }
    }

    fn band_mut(&mut self, band: IlluminationBand) -> &mut LightSource {
        match band {
            IlluminationBand::Infrared => &mut self.infrared,
            IlluminationBand::Visible => &mut self.visible,
            IlluminationBand::Ultraviolet => &mut self.ultraviolet,
        }
    }
}

/// Fixed configuration payload for `PUT /scan/execute`.
///
/// Field names mirror the device wire format exactly; the three MRZ check
/// toggles are capitalized on the wire and carry explicit renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub resolution: Resolution,
    pub ambient_reduction: bool,
    pub check_uv_dullness: bool,
    pub check_b900_ink: bool,
    pub get_mrz: bool,
    #[serde(rename = "MrzChecksumsCheck")]
    pub mrz_checksums_check: bool,
    #[serde(rename = "MrzAgeCheck")]
    pub mrz_age_check: bool,
    #[serde(rename = "MrzExpiryCheck")]
    pub mrz_expiry_check: bool,
    pub get_document_shape: bool,
    pub image_format: String,
    pub jpeg_quality: u8,
    pub png_compression: u8,
    pub optimize_image: bool,
    pub light_sources: LightSources,
}

impl ScanRequest {
    /// Start building a request from the operator default profile.
    #[must_use]
    pub fn builder() -> ScanRequestBuilder {
        ScanRequestBuilder::default()
    }

    /// The profile the operator console uses: high resolution, every check
    /// enabled, all three bands captured as JPEG with a face crop on the
    /// visible band.
    #[must_use]
    pub fn operator_default() -> Self {
        ScanRequestBuilder::default().build()
    }
}

/// Builder for [`ScanRequest`].
///
/// Starts from the operator default profile; call the toggles to deviate.
#[derive(Debug, Clone)]
pub struct ScanRequestBuilder {
    request: ScanRequest,
}

impl Default for ScanRequestBuilder {
    fn default() -> Self {
        ScanRequestBuilder {
            request: ScanRequest {
                resolution: Resolution::High,
                ambient_reduction: true,
                check_uv_dullness: true,
                check_b900_ink: true,
                get_mrz: true,
                mrz_checksums_check: true,
                mrz_age_check: true,
                mrz_expiry_check: true,
                get_document_shape: false,
                image_format: DEFAULT_IMAGE_FORMAT.to_string(),
                jpeg_quality: DEFAULT_JPEG_QUALITY,
                png_compression: DEFAULT_PNG_COMPRESSION,
                optimize_image: true,
                light_sources: LightSources {
                    infrared: LightSource::with_croppings(&[Cropping::Document]),
                    visible: LightSource::with_croppings(&[Cropping::Document, Cropping::Face]),
                    ultraviolet: LightSource::with_croppings(&[Cropping::Document]),
                },
            },
        }
    }
}

impl ScanRequestBuilder {
    /// Set the capture resolution.
    #[must_use]
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.request.resolution = resolution;
        self
    }

    /// Toggle the UV-dullness check.
    #[must_use]
    pub fn check_uv_dullness(mut self, on: bool) -> Self {
        self.request.check_uv_dullness = on;
        self
    }

    /// Toggle the B900 ink check.
    #[must_use]
    pub fn check_b900_ink(mut self, on: bool) -> Self {
        self.request.check_b900_ink = on;
        self
    }

    /// Toggle MRZ reading and the three MRZ validations together.
    #[must_use]
    pub fn mrz_checks(mut self, on: bool) -> Self {
        self.request.get_mrz = on;
        self.request.mrz_checksums_check = on;
        self.request.mrz_age_check = on;
        self.request.mrz_expiry_check = on;
        self
    }

    /// Configure one illumination band.
    #[must_use]
    pub fn band(mut self, band: IlluminationBand, source: LightSource) -> Self {
        *self.request.light_sources.band_mut(band) = source;
        self
    }

    /// Set the JPEG quality (device accepts 1-100).
    #[must_use]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.request.jpeg_quality = quality;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> ScanRequest {
        self.request
    }
}

/// Response of `PUT /scan/execute`: the result resources to fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanExecuteInfo {
    #[serde(rename = "resourceList")]
    pub resource_list: Vec<String>,
}

/// One fetched scan result: the resource path paired with its payload.
///
/// Payloads stay opaque JSON here; the dispatcher decides which shape to
/// decode them into based on the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResource {
    pub resource: String,
    pub payload: serde_json::Value,
}
