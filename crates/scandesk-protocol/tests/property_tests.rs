//! Property tests for resource-path classification.

use proptest::prelude::*;
use scandesk_core::IlluminationBand;
use scandesk_protocol::{ResultKind, ScanReport, ScanResource, classify};

proptest! {
    /// classify never panics, whatever the device sends.
    #[test]
    fn classify_total_on_arbitrary_paths(path in ".{0,120}") {
        let _ = classify(&path);
    }

    /// A path whose last segment is none of the known suffixes and whose
    /// final two segments are not a document/band pair never classifies.
    #[test]
    fn unknown_suffix_never_classifies(tail in "[a-z]{1,12}") {
        prop_assume!(classify(&format!("/{tail}")).is_none());
        let path = format!("/scan/123/{tail}");
        prop_assert_eq!(classify(&path), None);
    }

    /// Band matching tolerates any casing of the three band names.
    #[test]
    fn band_casing_is_irrelevant(
        band_index in 0usize..3,
        mask in proptest::collection::vec(any::<bool>(), 11),
    ) {
        let band = IlluminationBand::ALL[band_index];
        let mixed: String = band
            .as_segment()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();

        let path = format!("/scan/7/document/{mixed}");
        prop_assert_eq!(classify(&path), Some(ResultKind::Image(band)));
    }

    /// Every input pair is accounted for: it either lands in a slot or in
    /// the unmatched list, never both, never neither.
    #[test]
    fn dispatch_accounts_for_every_pair(
        tails in proptest::collection::vec("[a-z-]{1,16}", 0..24),
    ) {
        let pairs: Vec<ScanResource> = tails
            .iter()
            .map(|tail| ScanResource {
                resource: format!("/scan/1/{tail}"),
                payload: serde_json::json!({"testResult": "OK"}),
            })
            .collect();

        let matched = pairs
            .iter()
            .filter(|p| classify(&p.resource).is_some())
            .count();
        let total = pairs.len();

        let report = ScanReport::dispatch(pairs);
        prop_assert_eq!(report.unmatched.len(), total - matched);
    }
}
