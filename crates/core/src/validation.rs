//! Field Validator: raw form text to typed values, or per-field errors.
//!
//! Every check runs independently and all failures are collected, so one
//! submit attempt reports every invalid field at once.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::Field;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Accepted listing URL shape, case-insensitive.
pub const URL_PATTERN: &str = r"(?i)^https?://.+";

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(URL_PATTERN).expect("valid regex"));

pub const MSG_URL_REQUIRED: &str = "URL is required";
pub const MSG_URL_SCHEME: &str = "URL must start with http:// or https://";
pub const MSG_SQM_INCONSISTENT: &str = "sqm max must be greater than or equal to sqm min";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Text does not have the required shape (URL).
    InvalidFormat,
    /// Not a finite non-negative number, or not a whole number where one is
    /// required.
    InvalidRange,
    /// Valid on its own but contradicts a sibling field.
    InconsistentRange,
}

/// A single field-level failure with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Field name to error. Recomputed from scratch on every submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Message for `field`, if it failed.
    pub fn message(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(|e| e.message.as_str())
    }

    /// Record an error, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(f, e)| (*f, e))
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Raw text of the free-text inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub url: String,
    pub price_max: String,
    pub sqm_min: String,
    pub sqm_max: String,
    pub bathrooms_min: String,
    pub floor_min: String,
}

impl RawInputs {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Url => &self.url,
            Field::PriceMax => &self.price_max,
            Field::SqmMin => &self.sqm_min,
            Field::SqmMax => &self.sqm_max,
            Field::BathroomsMin => &self.bathrooms_min,
            Field::FloorMin => &self.floor_min,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Url => &mut self.url,
            Field::PriceMax => &mut self.price_max,
            Field::SqmMin => &mut self.sqm_min,
            Field::SqmMax => &mut self.sqm_max,
            Field::BathroomsMin => &mut self.bathrooms_min,
            Field::FloorMin => &mut self.floor_min,
        };
        *slot = value;
    }
}

/// Typed values after validation. `None` means the input was left blank and
/// the normalizer should substitute its default.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInputs {
    /// Trimmed URL.
    pub url: String,
    pub price_max: Option<f64>,
    pub sqm_min: Option<f64>,
    pub sqm_max: Option<f64>,
    pub bathrooms_min: Option<u64>,
    pub floor_min: Option<u64>,
}

// ---------------------------------------------------------------------------
// Single-field checks
// ---------------------------------------------------------------------------

/// Lower-case subject used in numeric error messages.
fn subject(field: Field) -> &'static str {
    match field {
        Field::Url => "URL",
        Field::PriceMax => "price max",
        Field::SqmMin => "sqm min",
        Field::SqmMax => "sqm max",
        Field::BathroomsMin => "bathrooms min",
        Field::FloorMin => "floor min",
    }
}

/// Validate the listing URL. Returns the trimmed URL.
pub fn validate_url(raw: &str) -> Result<String, FieldError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(FieldError::new(FieldErrorKind::InvalidFormat, MSG_URL_REQUIRED));
    }
    if !URL_RE.is_match(url) {
        return Err(FieldError::new(FieldErrorKind::InvalidFormat, MSG_URL_SCHEME));
    }
    Ok(url.to_string())
}

/// Parse an optional finite number `>= 0`. Blank input is `Ok(None)`.
pub fn parse_non_negative(raw: &str, field: Field) -> Result<Option<f64>, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => {
            // Fold -0 into 0 so it never reaches the wire as "-0.0".
            Ok(Some(if value == 0.0 { 0.0 } else { value }))
        }
        _ => Err(FieldError::new(
            FieldErrorKind::InvalidRange,
            format!("{} must be a number ≥ 0", subject(field)),
        )),
    }
}

/// Largest whole number a JSON consumer can read back without rounding
/// (2^53 - 1).
pub const MAX_WHOLE_NUMBER: u64 = 9_007_199_254_740_991;

/// Parse an optional whole number `>= 0`. `"2.0"` counts as whole.
pub fn parse_non_negative_integer(raw: &str, field: Field) -> Result<Option<u64>, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let value = match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => value,
        _ => {
            return Err(FieldError::new(
                FieldErrorKind::InvalidRange,
                format!("{} must be an integer ≥ 0", subject(field)),
            ))
        }
    };
    if value > MAX_WHOLE_NUMBER as f64 {
        return Err(FieldError::new(
            FieldErrorKind::InvalidRange,
            format!("{} must be at most {MAX_WHOLE_NUMBER}", subject(field)),
        ));
    }
    Ok(Some(value as u64))
}

// ---------------------------------------------------------------------------
// Whole-form validation
// ---------------------------------------------------------------------------

/// Run every check against `raw` and collect all failures.
pub fn validate_inputs(raw: &RawInputs) -> Result<ParsedInputs, FieldErrors> {
    let mut errors = FieldErrors::default();

    let url = validate_url(&raw.url);
    let price_max = parse_non_negative(&raw.price_max, Field::PriceMax);
    let sqm_min = parse_non_negative(&raw.sqm_min, Field::SqmMin);
    let sqm_max = parse_non_negative(&raw.sqm_max, Field::SqmMax);
    let bathrooms_min = parse_non_negative_integer(&raw.bathrooms_min, Field::BathroomsMin);
    let floor_min = parse_non_negative_integer(&raw.floor_min, Field::FloorMin);

    if let (Ok(Some(min)), Ok(Some(max))) = (&sqm_min, &sqm_max) {
        if min > max {
            errors.insert(
                Field::SqmMax,
                FieldError::new(FieldErrorKind::InconsistentRange, MSG_SQM_INCONSISTENT),
            );
        }
    }

    let url = collect(&mut errors, Field::Url, url);
    let price_max = collect(&mut errors, Field::PriceMax, price_max);
    let sqm_min = collect(&mut errors, Field::SqmMin, sqm_min);
    let sqm_max = collect(&mut errors, Field::SqmMax, sqm_max);
    let bathrooms_min = collect(&mut errors, Field::BathroomsMin, bathrooms_min);
    let floor_min = collect(&mut errors, Field::FloorMin, floor_min);

    match (url, price_max, sqm_min, sqm_max, bathrooms_min, floor_min) {
        (Some(url), Some(price_max), Some(sqm_min), Some(sqm_max), Some(bathrooms_min), Some(floor_min))
            if errors.is_empty() =>
        {
            Ok(ParsedInputs {
                url,
                price_max,
                sqm_min,
                sqm_max,
                bathrooms_min,
                floor_min,
            })
        }
        _ => Err(errors),
    }
}

fn collect<T>(errors: &mut FieldErrors, field: Field, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.insert(field, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn inputs(url: &str, sqm_min: &str, sqm_max: &str) -> RawInputs {
        RawInputs {
            url: url.to_string(),
            sqm_min: sqm_min.to_string(),
            sqm_max: sqm_max.to_string(),
            ..RawInputs::default()
        }
    }

    // -- URL --

    #[test]
    fn url_accepts_http_and_https_any_case() {
        for url in [
            "http://a",
            "https://x.com/listing",
            "HTTPS://EXAMPLE.COM",
            "  https://padded.example  ",
        ] {
            assert!(validate_url(url).is_ok(), "{url} should pass");
        }
        assert_eq!(validate_url(" https://x.com ").unwrap(), "https://x.com");
    }

    #[test]
    fn url_rejects_other_shapes() {
        for url in ["ftp://x.com", "x.com", "https://", "http:/x.com", "mailto:a@b"] {
            let err = validate_url(url).unwrap_err();
            assert_eq!(err.kind, FieldErrorKind::InvalidFormat);
            assert_eq!(err.message, MSG_URL_SCHEME, "{url}");
        }
    }

    #[test]
    fn blank_url_is_required() {
        let err = validate_url("   ").unwrap_err();
        assert_eq!(err.message, MSG_URL_REQUIRED);
    }

    // -- Numbers --

    #[test]
    fn blank_numbers_are_unconstrained() {
        assert_eq!(parse_non_negative("", Field::PriceMax).unwrap(), None);
        assert_eq!(parse_non_negative("  ", Field::SqmMin).unwrap(), None);
        assert_eq!(parse_non_negative_integer("", Field::FloorMin).unwrap(), None);
    }

    #[test]
    fn numbers_must_be_finite_and_non_negative() {
        assert_eq!(parse_non_negative("12.5", Field::SqmMin).unwrap(), Some(12.5));
        assert_eq!(parse_non_negative("0", Field::SqmMin).unwrap(), Some(0.0));
        for bad in ["-1", "abc", "inf", "NaN", "1e400"] {
            let err = parse_non_negative(bad, Field::PriceMax).unwrap_err();
            assert_eq!(err.kind, FieldErrorKind::InvalidRange);
            assert_eq!(err.message, "price max must be a number ≥ 0");
        }
    }

    #[test]
    fn negative_zero_is_folded() {
        let value = parse_non_negative("-0", Field::SqmMin).unwrap().unwrap();
        assert!(value.is_sign_positive());
    }

    #[test]
    fn integers_reject_fractions_and_negatives() {
        assert_eq!(
            parse_non_negative_integer("2", Field::BathroomsMin).unwrap(),
            Some(2)
        );
        assert_eq!(
            parse_non_negative_integer("3.0", Field::FloorMin).unwrap(),
            Some(3)
        );
        for bad in ["1.5", "-1", "two"] {
            let err = parse_non_negative_integer(bad, Field::BathroomsMin).unwrap_err();
            assert_eq!(err.message, "bathrooms min must be an integer ≥ 0");
        }
        let err = parse_non_negative_integer("-2", Field::FloorMin).unwrap_err();
        assert_eq!(err.message, "floor min must be an integer ≥ 0");
    }

    #[test]
    fn large_whole_numbers_pass() {
        assert_eq!(
            parse_non_negative_integer("5000000000", Field::FloorMin).unwrap(),
            Some(5_000_000_000)
        );
        assert_eq!(
            parse_non_negative_integer("9007199254740991", Field::BathroomsMin).unwrap(),
            Some(MAX_WHOLE_NUMBER)
        );
    }

    #[test]
    fn whole_numbers_beyond_json_precision_name_the_cap() {
        let err = parse_non_negative_integer("1e20", Field::FloorMin).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::InvalidRange);
        assert_eq!(err.message, "floor min must be at most 9007199254740991");
    }

    // -- Whole form --

    #[test]
    fn inverted_surface_range_fails_on_max() {
        let errors = validate_inputs(&inputs("https://x.com/listing", "80", "70")).unwrap_err();
        assert_eq!(errors.len(), 1);
        let err = errors.get(Field::SqmMax).unwrap();
        assert_eq!(err.kind, FieldErrorKind::InconsistentRange);
        assert_eq!(err.message, MSG_SQM_INCONSISTENT);
    }

    #[test]
    fn equal_surface_bounds_pass() {
        let parsed = validate_inputs(&inputs("https://x.com", "90", "90")).unwrap();
        assert_eq!(parsed.sqm_min, Some(90.0));
        assert_eq!(parsed.sqm_max, Some(90.0));
    }

    #[test]
    fn range_check_skipped_when_a_bound_is_invalid() {
        let errors = validate_inputs(&inputs("https://x.com", "abc", "70")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_matches!(
            errors.get(Field::SqmMin),
            Some(FieldError { kind: FieldErrorKind::InvalidRange, .. })
        );
    }

    #[test]
    fn empty_form_only_reports_url() {
        let errors = validate_inputs(&RawInputs::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(Field::Url), Some(MSG_URL_REQUIRED));
    }

    #[test]
    fn all_errors_are_collected() {
        let raw = RawInputs {
            url: "nope".into(),
            price_max: "-3".into(),
            sqm_min: "x".into(),
            sqm_max: "-1".into(),
            bathrooms_min: "1.5".into(),
            floor_min: "-2".into(),
        };
        let errors = validate_inputs(&raw).unwrap_err();
        assert_eq!(errors.len(), Field::ALL.len());
    }

    #[test]
    fn valid_form_parses_every_field() {
        let raw = RawInputs {
            url: " https://x.com/1 ".into(),
            price_max: "300000".into(),
            sqm_min: "60".into(),
            sqm_max: "120".into(),
            bathrooms_min: "1".into(),
            floor_min: "0".into(),
        };
        let parsed = validate_inputs(&raw).unwrap();
        assert_eq!(
            parsed,
            ParsedInputs {
                url: "https://x.com/1".into(),
                price_max: Some(300_000.0),
                sqm_min: Some(60.0),
                sqm_max: Some(120.0),
                bathrooms_min: Some(1),
                floor_min: Some(0),
            }
        );
    }

    #[test]
    fn raw_inputs_get_and_set_cover_every_field() {
        let mut raw = RawInputs::default();
        for field in Field::ALL {
            raw.set(field, field.name().to_string());
        }
        for field in Field::ALL {
            assert_eq!(raw.get(field), field.name());
        }
    }

    #[test]
    fn field_errors_serialize_by_input_name() {
        let errors = validate_inputs(&inputs("", "", "")).unwrap_err();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["url"]["message"], MSG_URL_REQUIRED);
        assert_eq!(json["url"]["kind"], "invalid_format");
    }
}
