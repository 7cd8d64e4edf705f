//! Shape validation for catalog payloads
//!
//! The catalog does not always answer with the same envelope, so a payload goes
//! through two steps before it is accepted:
//!
//! 1. [`locate_document`] applies the envelope rules in a fixed order and picks
//!    the candidate document out of the response.
//! 2. [`validate_document`] checks the candidate's top-level shape. Nested
//!    entries are deliberately not inspected.

use crate::error::ValidationError;
use crate::types::ContentDocument;
use serde_json::Value;

/// Why a response envelope did not yield a candidate document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMismatch {
    /// The payload carries `success: false`
    ExplicitFailure,
    /// Neither a `data` field nor a bare document was found
    Unrecognized,
}

impl std::fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeMismatch::ExplicitFailure => f.write_str("API returned success: false"),
            ShapeMismatch::Unrecognized => f.write_str("invalid response structure"),
        }
    }
}

type ShapeRule = fn(&Value) -> Option<Result<&Value, ShapeMismatch>>;

/// Envelope rules, evaluated in order. The first rule that matches decides.
const SHAPE_RULES: [ShapeRule; 3] = [explicit_failure, nested_data, bare_document];

fn explicit_failure(payload: &Value) -> Option<Result<&Value, ShapeMismatch>> {
    match payload.get("success") {
        Some(Value::Bool(false)) => Some(Err(ShapeMismatch::ExplicitFailure)),
        _ => None,
    }
}

fn nested_data(payload: &Value) -> Option<Result<&Value, ShapeMismatch>> {
    payload.get("data").filter(|data| is_truthy(data)).map(Ok)
}

fn bare_document(payload: &Value) -> Option<Result<&Value, ShapeMismatch>> {
    let looks_like_document = payload.get("id").is_some_and(is_truthy)
        && payload.get("title").is_some_and(is_truthy);
    looks_like_document.then_some(Ok(payload))
}

/// Pick the candidate document out of a catalog response.
///
/// Rules, first match wins:
/// 1. `success: false` → [`ShapeMismatch::ExplicitFailure`], even when `data` is populated
/// 2. a non-empty `data` field → that field
/// 3. a payload with both `id` and `title` → the payload itself
/// 4. anything else → [`ShapeMismatch::Unrecognized`]
pub fn locate_document(payload: &Value) -> Result<&Value, ShapeMismatch> {
    SHAPE_RULES
        .iter()
        .find_map(|rule| rule(payload))
        .unwrap_or(Err(ShapeMismatch::Unrecognized))
}

/// Check the top-level shape of a candidate document.
///
/// Required: `slug`, `title`, `description` strings; `id` number; `media`,
/// `checklist`, `sections` arrays (possibly empty); `seo` and `cta_text`
/// non-null objects.
pub fn validate_document(candidate: &Value) -> Result<(), ValidationError> {
    let object = candidate.as_object().ok_or(ValidationError::NotAnObject)?;

    let require = |field: &'static str, expected: &'static str, ok: fn(&Value) -> bool| {
        match object.get(field) {
            None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
            Some(value) if ok(value) => Ok(()),
            Some(_) => Err(ValidationError::WrongType { field, expected }),
        }
    };

    require("slug", "a string", Value::is_string)?;
    require("id", "a number", Value::is_number)?;
    require("title", "a string", Value::is_string)?;
    require("description", "a string", Value::is_string)?;
    require("media", "an array", Value::is_array)?;
    require("checklist", "an array", Value::is_array)?;
    require("seo", "an object", Value::is_object)?;
    require("cta_text", "an object", Value::is_object)?;
    require("sections", "an array", Value::is_array)?;
    Ok(())
}

/// Whether the candidate has the document shape
pub fn is_valid_document(candidate: &Value) -> bool {
    validate_document(candidate).is_ok()
}

/// Validate a candidate and convert it into a [`ContentDocument`].
pub fn parse_document(candidate: Value) -> Result<ContentDocument, ValidationError> {
    validate_document(&candidate)?;
    serde_json::from_value(candidate).map_err(|e| ValidationError::Malformed(e.to_string()))
}

/// JavaScript-style truthiness, which is what the catalog's clients assume.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const REQUIRED_FIELDS: [&str; 9] = [
        "slug",
        "id",
        "title",
        "description",
        "media",
        "checklist",
        "seo",
        "cta_text",
        "sections",
    ];

    fn well_formed() -> Value {
        json!({
            "slug": "ielts-course",
            "id": 153,
            "title": "IELTS Course by Munzereen Shahid",
            "description": "<p>Live course</p>",
            "media": [],
            "checklist": [],
            "seo": {},
            "cta_text": {"name": "Enroll", "value": "enroll"},
            "sections": []
        })
    }

    #[test]
    fn accepts_well_formed_document_with_empty_sequences() {
        assert!(is_valid_document(&well_formed()));
        let doc = parse_document(well_formed()).unwrap();
        assert_eq!(doc.id, 153);
        assert!(doc.media.is_empty());
        assert!(doc.checklist.is_empty());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn omitting_any_single_required_field_fails() {
        for field in REQUIRED_FIELDS {
            let mut candidate = well_formed();
            candidate.as_object_mut().unwrap().remove(field);
            assert_eq!(
                validate_document(&candidate),
                Err(ValidationError::MissingField(field)),
                "removing `{field}` must fail validation"
            );
        }
    }

    #[test]
    fn null_required_field_counts_as_missing() {
        let mut candidate = well_formed();
        candidate["seo"] = Value::Null;
        assert_eq!(
            validate_document(&candidate),
            Err(ValidationError::MissingField("seo"))
        );
    }

    #[test]
    fn wrong_types_are_rejected() {
        let cases = [
            ("slug", json!(5)),
            ("id", json!("153")),
            ("title", json!(["t"])),
            ("description", json!(null)),
            ("media", json!({})),
            ("checklist", json!("none")),
            ("seo", json!("seo")),
            ("cta_text", json!([])),
            ("sections", json!(1)),
        ];
        for (field, value) in cases {
            let mut candidate = well_formed();
            candidate[field] = value;
            assert!(
                !is_valid_document(&candidate),
                "`{field}` with wrong type must fail validation"
            );
        }
    }

    #[test]
    fn non_object_is_rejected() {
        assert_eq!(
            validate_document(&json!([1, 2])),
            Err(ValidationError::NotAnObject)
        );
        assert!(!is_valid_document(&Value::Null));
    }

    #[test]
    fn nested_entries_are_not_validated() {
        let mut candidate = well_formed();
        candidate["media"] = json!([42, "x", {"url": 1}]);
        candidate["sections"] = json!([null]);
        assert!(is_valid_document(&candidate));

        let doc = parse_document(candidate).unwrap();
        assert_eq!(doc.media.len(), 3);
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn explicit_failure_wins_over_populated_data() {
        let payload = json!({"success": false, "data": well_formed()});
        assert_eq!(
            locate_document(&payload),
            Err(ShapeMismatch::ExplicitFailure)
        );
    }

    #[test]
    fn nested_data_is_preferred_over_bare_fields() {
        let payload = json!({"code": 200, "data": well_formed(), "id": 1, "title": "outer"});
        let located = locate_document(&payload).unwrap();
        assert_eq!(located["id"], 153);
    }

    #[test]
    fn success_true_with_data_is_accepted() {
        let payload = json!({"success": true, "data": well_formed()});
        assert!(locate_document(&payload).is_ok());
    }

    #[test]
    fn bare_document_is_used_directly() {
        let payload = well_formed();
        assert_eq!(locate_document(&payload).unwrap(), &payload);
    }

    #[test]
    fn unrecognized_shapes() {
        assert_eq!(
            locate_document(&json!({"message": "ok"})),
            Err(ShapeMismatch::Unrecognized)
        );
        assert_eq!(
            locate_document(&json!({"data": null, "id": 0, "title": "t"})),
            Err(ShapeMismatch::Unrecognized)
        );
        assert_eq!(
            locate_document(&json!("plain string")),
            Err(ShapeMismatch::Unrecognized)
        );
    }
}
