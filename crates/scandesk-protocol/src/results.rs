//! Per-check result payload shapes.
//!
//! Every struct here is a pass-through DTO: the device computes the checks,
//! the console only displays them. Containers carry `#[serde(default)]` so a
//! payload with missing fields decodes to blanks instead of failing the
//! whole scan.

use serde::{Deserialize, Serialize};

/// Textual verdict of a single check (expiry, checksums, age).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckResult {
    pub test_result: Option<String>,
}

/// UV-dullness check: per-region availability verdicts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UvDullness {
    pub available: bool,
    pub document: String,
    pub face: String,
    pub mrz: String,
}

/// B900 ink check on the MRZ print.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct B900Check {
    pub available: bool,
    pub test_result: String,
}

/// One captured image, optionally with a per-band test verdict.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageResult {
    pub available: bool,

    /// Base64-encoded JPEG, when the band produced an image.
    pub img: Option<String>,

    /// Textual verdict for bands that double as a check (e.g. UV).
    pub test_result: Option<String>,
}

/// Machine-readable zone record with document and holder fields.
///
/// Dates are numeric in the device's compact form (YYMMDD) alongside the
/// split day/month/year fields; checksums are the raw check digits.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Mrz {
    pub available: bool,
    pub composite: String,
    pub composite_checksum: u32,
    pub document_code: String,
    pub document_expiry_date: u32,
    pub document_expiry_date_checksum: u32,
    pub document_expiry_date_day: u32,
    pub document_expiry_date_month: u32,
    pub document_expiry_date_year: u32,
    pub document_issuer: String,
    pub document_number: String,
    pub document_number_checksum: u32,
    pub document_number_composite: String,
    pub document_number_composite_checksum: u32,
    pub document_shape: String,
    pub document_type: String,
    pub has_backside: String,
    pub holder_birth_date: u32,
    pub holder_birth_date_checksum: u32,
    pub holder_birth_date_day: u32,
    pub holder_birth_date_month: u32,
    pub holder_birth_date_year: u32,
    pub holder_name: String,
    pub holder_name_primary: String,
    pub holder_name_secondary: String,
    pub holder_nationality: String,
    pub holder_sex: String,
    pub line1: String,
    pub line2: String,
    pub mrz: String,
    pub optional: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mrz_decodes_wire_names() {
        let json = serde_json::json!({
            "available": true,
            "documentCode": "P",
            "documentIssuer": "UTO",
            "documentNumber": "L898902C3",
            "documentNumberChecksum": 6,
            "holderName": "ERIKSSON  ANNA MARIA",
            "holderNamePrimary": "ERIKSSON",
            "holderNameSecondary": "ANNA MARIA",
            "holderNationality": "UTO",
            "holderSex": "F",
            "holderBirthDate": 740812,
            "documentExpiryDate": 120415,
            "line1": "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
            "line2": "L898902C36UTO7408122F1204159ZE184226B<<<<<10"
        });

        let mrz: Mrz = serde_json::from_value(json).unwrap();
        assert!(mrz.available);
        assert_eq!(mrz.document_number, "L898902C3");
        assert_eq!(mrz.document_number_checksum, 6);
        assert_eq!(mrz.holder_name_primary, "ERIKSSON");
        assert_eq!(mrz.holder_birth_date, 740812);
        // Missing fields decode to blanks.
        assert_eq!(mrz.composite, "");
        assert_eq!(mrz.optional, 0);
    }

    #[test]
    fn test_image_result_without_image() {
        let image: ImageResult =
            serde_json::from_str(r#"{"available": false}"#).unwrap();
        assert!(!image.available);
        assert!(image.img.is_none());
        assert!(image.test_result.is_none());
    }

    #[test]
    fn test_uv_dullness_regions() {
        let uv: UvDullness = serde_json::from_str(
            r#"{"available": true, "document": "OK", "face": "OK", "mrz": "FAIL"}"#,
        )
        .unwrap();
        assert_eq!(uv.document, "OK");
        assert_eq!(uv.mrz, "FAIL");
    }

    #[test]
    fn test_check_result_missing_field_is_blank() {
        let check: CheckResult = serde_json::from_str("{}").unwrap();
        assert!(check.test_result.is_none());
    }
}
