//! Classification of scan-result resources into report slots.
//!
//! The device names each result resource by path; the final segment (or the
//! final two, for document images) determines the semantic slot. The mapping
//! is a reviewable lookup table rather than cascading string comparisons,
//! and a path matching no rule is an observable event: it is logged and
//! recorded on the report instead of silently dropped.
//!
//! # Classification rules
//!
//! | Last segment | Adjacent segment | Slot |
//! |---|---|---|
//! | `expiry-check` | — | expiry-check verdict |
//! | `checksums` | — | checksum verdict |
//! | `age-check` | — | age-check verdict |
//! | `uv-dullness` | — | UV-dullness structure |
//! | `b900-check` | — | ink-check structure |
//! | `mrz` | — | MRZ record |
//! | `document` | illumination band | image for that band |
//! | illumination band | `document` | image for that band |
//!
//! Band names compare case-insensitively; every other segment is an exact
//! match. The device has been observed emitting the document-image pair in
//! both segment orders, so both are accepted.

use scandesk_core::IlluminationBand;
use scandesk_core::constants::{
    SEGMENT_AGE_CHECK, SEGMENT_B900_CHECK, SEGMENT_CHECKSUMS, SEGMENT_DOCUMENT,
    SEGMENT_EXPIRY_CHECK, SEGMENT_MRZ, SEGMENT_UV_DULLNESS,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::results::{B900Check, CheckResult, ImageResult, Mrz, UvDullness};
use crate::scan::ScanResource;

/// Semantic classification of one result resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    ExpiryCheck,
    Checksums,
    AgeCheck,
    UvDullness,
    B900Check,
    Mrz,
    Image(IlluminationBand),
}

/// Lookup table for single-segment rules.
///
/// Image resources need the adjacent segment as well and are handled
/// separately in [`classify`].
const SUFFIX_RULES: &[(&str, ResultKind)] = &[
    (SEGMENT_EXPIRY_CHECK, ResultKind::ExpiryCheck),
    (SEGMENT_CHECKSUMS, ResultKind::Checksums),
    (SEGMENT_AGE_CHECK, ResultKind::AgeCheck),
    (SEGMENT_UV_DULLNESS, ResultKind::UvDullness),
    (SEGMENT_B900_CHECK, ResultKind::B900Check),
    (SEGMENT_MRZ, ResultKind::Mrz),
];

/// Classify a resource path, or `None` when no rule matches.
#[must_use]
pub fn classify(path: &str) -> Option<ResultKind> {
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let last = segments.next().filter(|s| !s.is_empty())?;

    if last == SEGMENT_DOCUMENT {
        let band = IlluminationBand::from_segment(segments.next()?)?;
        return Some(ResultKind::Image(band));
    }

    if let Some(band) = IlluminationBand::from_segment(last) {
        return match segments.next() {
            Some(SEGMENT_DOCUMENT) => Some(ResultKind::Image(band)),
            _ => None,
        };
    }

    SUFFIX_RULES
        .iter()
        .find(|(segment, _)| *segment == last)
        .map(|(_, kind)| *kind)
}

/// Named result slots of one completed scan.
///
/// Each scan builds a fresh report; result sets from different scans are
/// never merged. Slots stay `None` when the scan did not produce the
/// corresponding resource or when its payload failed to decode.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Expiry-check verdict, e.g. `"OK"`.
    pub expiry_check: Option<String>,

    /// MRZ checksum verdict.
    pub checksums: Option<String>,

    /// Age-check verdict.
    pub age_check: Option<String>,

    /// UV-dullness structure.
    pub uv_dullness: Option<UvDullness>,

    /// B900 ink-check structure.
    pub b900_check: Option<B900Check>,

    /// MRZ record.
    pub mrz: Option<Mrz>,

    /// Infrared document image.
    pub infrared: Option<ImageResult>,

    /// Visible-light document image.
    pub visible: Option<ImageResult>,

    /// Ultraviolet document image.
    pub ultraviolet: Option<ImageResult>,

    /// Resource paths no rule matched, in arrival order.
    pub unmatched: Vec<String>,
}

impl ScanReport {
    /// Dispatch an ordered result set into a fresh report.
    pub fn dispatch(pairs: Vec<ScanResource>) -> Self {
        let mut report = ScanReport::default();
        for pair in pairs {
            report.assign(pair);
        }
        report
    }

    /// Access one image slot by band.
    #[must_use]
    pub fn image(&self, band: IlluminationBand) -> Option<&ImageResult> {
        match band {
            IlluminationBand::Infrared => self.infrared.as_ref(),
            IlluminationBand::Visible => self.visible.as_ref(),
            IlluminationBand::Ultraviolet => self.ultraviolet.as_ref(),
        }
    }

    /// True when no slot is populated and nothing was unmatched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expiry_check.is_none()
            && self.checksums.is_none()
            && self.age_check.is_none()
            && self.uv_dullness.is_none()
            && self.b900_check.is_none()
            && self.mrz.is_none()
            && self.infrared.is_none()
            && self.visible.is_none()
            && self.ultraviolet.is_none()
            && self.unmatched.is_empty()
    }

    fn assign(&mut self, pair: ScanResource) {
        let Some(kind) = classify(&pair.resource) else {
            debug!(resource = %pair.resource, "unrecognized scan resource");
            self.unmatched.push(pair.resource);
            return;
        };

        let ScanResource { resource, payload } = pair;
        match kind {
            ResultKind::ExpiryCheck => {
                self.expiry_check = decode::<CheckResult>(&resource, payload).and_then(|c| c.test_result);
            }
            ResultKind::Checksums => {
                self.checksums = decode::<CheckResult>(&resource, payload).and_then(|c| c.test_result);
            }
            ResultKind::AgeCheck => {
                self.age_check = decode::<CheckResult>(&resource, payload).and_then(|c| c.test_result);
            }
            ResultKind::UvDullness => self.uv_dullness = decode(&resource, payload),
            ResultKind::B900Check => self.b900_check = decode(&resource, payload),
            ResultKind::Mrz => self.mrz = decode(&resource, payload),
            ResultKind::Image(IlluminationBand::Infrared) => {
                self.infrared = decode(&resource, payload);
            }
            ResultKind::Image(IlluminationBand::Visible) => {
                self.visible = decode(&resource, payload);
            }
            ResultKind::Image(IlluminationBand::Ultraviolet) => {
                self.ultraviolet = decode(&resource, payload);
            }
        }
    }
}

/// Decode a matched payload into its slot shape.
///
/// A payload that does not decode leaves the slot empty. The slot shapes all
/// default their fields, so this only triggers on type-level mismatches
/// (e.g. the device returning an array where a record is expected).
fn decode<T: DeserializeOwned>(resource: &str, payload: serde_json::Value) -> Option<T> {
    match serde_json::from_value(payload) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(resource, %error, "scan resource payload did not decode");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/scan/123/expiry-check", ResultKind::ExpiryCheck)]
    #[case("/scan/123/checksums", ResultKind::Checksums)]
    #[case("/scan/123/age-check", ResultKind::AgeCheck)]
    #[case("/scan/123/uv-dullness", ResultKind::UvDullness)]
    #[case("/scan/123/b900-check", ResultKind::B900Check)]
    #[case("/scan/123/mrz", ResultKind::Mrz)]
    #[case("/scan/123/document/infrared", ResultKind::Image(IlluminationBand::Infrared))]
    #[case("/scan/123/document/visible", ResultKind::Image(IlluminationBand::Visible))]
    #[case("/scan/123/document/ultraviolet", ResultKind::Image(IlluminationBand::Ultraviolet))]
    #[case("/scan/123/infrared/document", ResultKind::Image(IlluminationBand::Infrared))]
    #[case("/scan/123/document/Infrared", ResultKind::Image(IlluminationBand::Infrared))]
    #[case("/scan/123/document/VISIBLE", ResultKind::Image(IlluminationBand::Visible))]
    fn test_classify_known_paths(#[case] path: &str, #[case] expected: ResultKind) {
        assert_eq!(classify(path), Some(expected));
    }

    #[rstest]
    #[case("/scan/123/debug-log")]
    #[case("/scan/123/document")] // no band segment adjacent
    #[case("/scan/123/document/face")] // face crop has no slot
    #[case("/scan/123/visible/face")]
    #[case("/scan/123/Checksums")] // non-band segments are exact-match
    #[case("")]
    #[case("/")]
    fn test_classify_unknown_paths(#[case] path: &str) {
        assert_eq!(classify(path), None);
    }

    fn pair(resource: &str, payload: serde_json::Value) -> ScanResource {
        ScanResource {
            resource: resource.to_string(),
            payload,
        }
    }

    #[test]
    fn test_dispatch_places_each_pair_in_its_slot() {
        let report = ScanReport::dispatch(vec![
            pair("/scan/123/checksums", serde_json::json!({"testResult": "OK"})),
            pair("/scan/123/age-check", serde_json::json!({"testResult": "FAIL"})),
            pair("/scan/123/document/infrared", serde_json::json!({"img": "AA"})),
            pair("/scan/123/document/visible", serde_json::json!({"img": "BB"})),
        ]);

        assert_eq!(report.checksums.as_deref(), Some("OK"));
        assert_eq!(report.age_check.as_deref(), Some("FAIL"));
        assert_eq!(report.infrared.as_ref().unwrap().img.as_deref(), Some("AA"));
        assert_eq!(report.visible.as_ref().unwrap().img.as_deref(), Some("BB"));
        assert!(report.expiry_check.is_none());
        assert!(report.ultraviolet.is_none());
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn test_dispatch_unrecognized_path_populates_no_slot() {
        let report = ScanReport::dispatch(vec![pair(
            "/scan/123/debug-log",
            serde_json::json!({"testResult": "anything"}),
        )]);

        assert!(report.expiry_check.is_none());
        assert!(report.checksums.is_none());
        assert!(report.age_check.is_none());
        assert!(report.uv_dullness.is_none());
        assert!(report.b900_check.is_none());
        assert!(report.mrz.is_none());
        assert!(report.infrared.is_none());
        assert!(report.visible.is_none());
        assert!(report.ultraviolet.is_none());
        assert_eq!(report.unmatched, vec!["/scan/123/debug-log".to_string()]);
    }

    #[test]
    fn test_dispatch_structured_slots() {
        let report = ScanReport::dispatch(vec![
            pair(
                "/scan/9/uv-dullness",
                serde_json::json!({"available": true, "document": "OK", "face": "OK", "mrz": "OK"}),
            ),
            pair(
                "/scan/9/b900-check",
                serde_json::json!({"available": true, "testResult": "OK"}),
            ),
            pair(
                "/scan/9/mrz",
                serde_json::json!({"available": true, "documentNumber": "L898902C3"}),
            ),
        ]);

        assert!(report.uv_dullness.as_ref().unwrap().available);
        assert_eq!(report.b900_check.as_ref().unwrap().test_result, "OK");
        assert_eq!(report.mrz.as_ref().unwrap().document_number, "L898902C3");
    }

    #[test]
    fn test_dispatch_undecodable_payload_leaves_slot_empty() {
        // An array where a record is expected: slot stays empty, path is
        // still consumed as matched.
        let report = ScanReport::dispatch(vec![pair("/scan/9/mrz", serde_json::json!([1, 2, 3]))]);
        assert!(report.mrz.is_none());
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn test_dispatch_later_scan_overwrites_nothing_from_earlier() {
        // dispatch always starts from a fresh report
        let first = ScanReport::dispatch(vec![pair(
            "/scan/1/checksums",
            serde_json::json!({"testResult": "OK"}),
        )]);
        let second = ScanReport::dispatch(vec![pair(
            "/scan/2/age-check",
            serde_json::json!({"testResult": "FAIL"}),
        )]);

        assert_eq!(first.checksums.as_deref(), Some("OK"));
        assert!(second.checksums.is_none());
        assert_eq!(second.age_check.as_deref(), Some("FAIL"));
    }

    #[test]
    fn test_missing_test_result_field_yields_blank_slot() {
        let report = ScanReport::dispatch(vec![pair("/scan/3/checksums", serde_json::json!({}))]);
        assert!(report.checksums.is_none());
        assert!(report.unmatched.is_empty());
    }
}
