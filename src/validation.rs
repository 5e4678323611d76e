// =============================================================================
// VALIDATION MODULE
// =============================================================================
// Runtime schema for the Doctor record.
//
// Input is an untyped `serde_json::Value`. Every field is checked and every
// problem is collected, so callers get the full list instead of the first
// failure. Fields the schema does not declare are ignored and do not appear
// in the result.
// =============================================================================

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Doctor, Gender};

/// `received` value reported for a field that is not present at all
pub const MISSING: &str = "missing";

// -----------------------------------------------------------------------------
// FAILURE TYPES
// -----------------------------------------------------------------------------

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field name, or `""` for the input as a whole
    pub path: String,

    /// What the field must be, e.g. `integer` or `one of "Nam", "Nữ", "Khác"`
    pub expected: String,

    /// JSON type name, offending literal, or `missing`
    pub received: String,
}

/// All constraints an input violated. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("doctor record failed validation ({} issue(s))", .issues.len())]
pub struct ValidationFailure {
    pub issues: Vec<ValidationIssue>,
}

// -----------------------------------------------------------------------------
// FIELD CHECKS
// -----------------------------------------------------------------------------
// Each helper returns the typed value or pushes an issue and returns None.
// `required` controls whether absence (or null) is itself an issue.

struct FieldChecker<'a> {
    object: &'a Map<String, Value>,
    issues: Vec<ValidationIssue>,
}

impl<'a> FieldChecker<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            issues: Vec::new(),
        }
    }

    fn report(&mut self, path: &str, expected: impl Into<String>, received: impl Into<String>) {
        self.issues.push(ValidationIssue {
            path: path.to_string(),
            expected: expected.into(),
            received: received.into(),
        });
    }

    /// Present, non-null value of `path`. Reports `missing` when required.
    fn lookup(&mut self, path: &str, expected: &str, required: bool) -> Option<&'a Value> {
        let object = self.object;
        match object.get(path) {
            Some(Value::Null) | None if required => {
                let received = if object.contains_key(path) { "null" } else { MISSING };
                self.report(path, expected, received);
                None
            }
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    fn integer(&mut self, path: &str, required: bool) -> Option<i64> {
        const EXPECTED: &str = "integer";
        let value = self.lookup(path, EXPECTED, required)?;
        match as_integer(value) {
            Some(n) => Some(n),
            None => {
                let received = match value {
                    Value::Number(n) => n.to_string(),
                    other => type_name(other).to_string(),
                };
                self.report(path, EXPECTED, received);
                None
            }
        }
    }

    fn string(&mut self, path: &str, required: bool) -> Option<String> {
        const EXPECTED: &str = "string";
        match self.lookup(path, EXPECTED, required)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.report(path, EXPECTED, type_name(other));
                None
            }
        }
    }

    fn gender(&mut self, path: &str) -> Option<Gender> {
        let expected = format!(
            "one of {}",
            Gender::LABELS
                .iter()
                .map(|label| format!("\"{label}\""))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let value = self.lookup(path, &expected, false)?;
        let gender = value.as_str().and_then(Gender::from_label);
        if gender.is_none() {
            self.report(path, expected, value.to_string());
        }
        gender
    }
}

/// Integral JSON numbers, including floats with no fractional part
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then(|| f as i64)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// DOCTOR SCHEMA
// =============================================================================
/// Check `input` against the Doctor schema.
///
/// Returns the typed record with only the declared fields, or every issue
/// found.
///
/// # Example
/// ```ignore
/// let doctor = validate_doctor(&json!({
///     "idNhanVien": 12, "maNhanVien": "NV01", "hoTen": "Nguyen Van A"
/// }))?;
/// assert_eq!(doctor.gioi_tinh, None);
/// ```
pub fn validate_doctor(input: &Value) -> Result<Doctor, ValidationFailure> {
    let Some(object) = input.as_object() else {
        return Err(ValidationFailure {
            issues: vec![ValidationIssue {
                path: String::new(),
                expected: "object".to_string(),
                received: type_name(input).to_string(),
            }],
        });
    };

    let mut checker = FieldChecker::new(object);

    let id_nhan_vien = checker.integer("idNhanVien", true);
    let ma_nhan_vien = checker.string("maNhanVien", true);
    let ho_ten = checker.string("hoTen", true);
    let gioi_tinh = checker.gender("gioiTinh");
    let chuc_vu = checker.integer("chucVu", false);
    let chi_nhanh = checker.integer("chiNhanh", false);

    match (id_nhan_vien, ma_nhan_vien, ho_ten) {
        (Some(id_nhan_vien), Some(ma_nhan_vien), Some(ho_ten)) if checker.issues.is_empty() => {
            Ok(Doctor {
                id_nhan_vien,
                ma_nhan_vien,
                ho_ten,
                gioi_tinh,
                chuc_vu,
                chi_nhanh,
            })
        }
        _ => Err(ValidationFailure {
            issues: checker.issues,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cites(failure: &ValidationFailure, path: &str) -> bool {
        failure.issues.iter().any(|issue| issue.path == path)
    }

    fn valid_input() -> Value {
        json!({
            "idNhanVien": 12,
            "maNhanVien": "NV01",
            "hoTen": "Nguyen Van A",
            "gioiTinh": "Nam"
        })
    }

    #[test]
    fn test_valid_input_echoes_back() {
        let input = valid_input();
        let doctor = validate_doctor(&input).expect("input should be valid");

        assert_eq!(doctor.gioi_tinh, Some(Gender::Male));
        assert_eq!(serde_json::to_value(&doctor).unwrap(), input);
    }

    #[test]
    fn test_all_fields_present() {
        let input = json!({
            "idNhanVien": 3,
            "maNhanVien": "NV03",
            "hoTen": "Le Thi C",
            "gioiTinh": "Khác",
            "chucVu": 2,
            "chiNhanh": 5
        });

        let doctor = validate_doctor(&input).unwrap();
        assert_eq!(doctor.chuc_vu, Some(2));
        assert_eq!(doctor.chi_nhanh, Some(5));
        assert_eq!(serde_json::to_value(&doctor).unwrap(), input);
    }

    #[test]
    fn test_unknown_gender_label_is_cited() {
        let mut input = valid_input();
        input["gioiTinh"] = json!("Other");

        let failure = validate_doctor(&input).unwrap_err();
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].path, "gioiTinh");
        assert_eq!(failure.issues[0].received, "\"Other\"");
        assert!(failure.issues[0].expected.contains("\"Nữ\""));
    }

    #[test]
    fn test_each_missing_required_field_is_cited() {
        for field in ["idNhanVien", "maNhanVien", "hoTen"] {
            let mut input = valid_input();
            input.as_object_mut().unwrap().remove(field);

            let failure = validate_doctor(&input).unwrap_err();
            assert!(cites(&failure, field), "{field} should be cited");
            let issue = failure.issues.iter().find(|i| i.path == field).unwrap();
            assert_eq!(issue.received, MISSING);
        }
    }

    #[test]
    fn test_collects_every_issue() {
        let input = json!({
            "idNhanVien": "12",
            "hoTen": 42,
            "gioiTinh": "male",
            "chucVu": 1.5,
            "chiNhanh": true
        });

        let failure = validate_doctor(&input).unwrap_err();
        let paths: Vec<_> = failure.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            ["idNhanVien", "maNhanVien", "hoTen", "gioiTinh", "chucVu", "chiNhanh"]
        );
        assert_eq!(failure.issues[0].received, "string");
        assert_eq!(failure.issues[4].received, "1.5");
        assert_eq!(failure.issues[5].received, "boolean");
    }

    #[test]
    fn test_absent_optional_fields_stay_absent() {
        let input = json!({"idNhanVien": 1, "maNhanVien": "NV", "hoTen": "X"});
        let doctor = validate_doctor(&input).unwrap();

        assert_eq!(doctor.gioi_tinh, None);
        assert_eq!(doctor.chuc_vu, None);
        assert_eq!(doctor.chi_nhanh, None);
        let value = serde_json::to_value(&doctor).unwrap();
        assert!(value.get("chucVu").is_none());
        assert!(value.get("gioiTinh").is_none());
    }

    #[test]
    fn test_null_optional_treated_as_absent() {
        let mut input = valid_input();
        input["chucVu"] = Value::Null;

        let doctor = validate_doctor(&input).unwrap();
        assert_eq!(doctor.chuc_vu, None);
    }

    #[test]
    fn test_null_required_field_reports_null() {
        let mut input = valid_input();
        input["hoTen"] = Value::Null;

        let failure = validate_doctor(&input).unwrap_err();
        assert_eq!(failure.issues[0].received, "null");
    }

    #[test]
    fn test_unknown_fields_are_stripped() {
        let mut input = valid_input();
        input["password"] = json!("hunter2");

        let doctor = validate_doctor(&input).unwrap();
        assert_eq!(serde_json::to_value(&doctor).unwrap(), valid_input());
    }

    #[test]
    fn test_integral_float_is_accepted() {
        let mut input = valid_input();
        input["idNhanVien"] = json!(12.0);

        assert_eq!(validate_doctor(&input).unwrap().id_nhan_vien, 12);
    }

    #[test]
    fn test_non_object_input_fails_at_root() {
        let failure = validate_doctor(&json!([1, 2])).unwrap_err();
        assert_eq!(
            failure.issues,
            vec![ValidationIssue {
                path: String::new(),
                expected: "object".to_string(),
                received: "array".to_string(),
            }]
        );
    }

    #[test]
    fn test_failure_message_counts_issues() {
        let failure = validate_doctor(&json!({})).unwrap_err();
        assert_eq!(
            failure.to_string(),
            "doctor record failed validation (3 issue(s))"
        );
    }

    #[test]
    fn test_each_gender_label_is_accepted() {
        let cases = [
            ("Nam", Gender::Male),
            ("Nữ", Gender::Female),
            ("Khác", Gender::Other),
        ];

        for (label, gender) in cases {
            let mut input = valid_input();
            input["gioiTinh"] = json!(label);

            let doctor = validate_doctor(&input).unwrap();
            assert_eq!(doctor.gioi_tinh, Some(gender));
            assert_eq!(serde_json::to_value(&doctor).unwrap()["gioiTinh"], label);
        }
    }

    #[test]
    fn test_gender_match_is_exact() {
        // "Nữ" in decomposed form: u + combining horn + combining tilde
        let decomposed = "Nu\u{031B}\u{0303}";
        assert_ne!(decomposed, "Nữ");

        for label in [decomposed, "nam", "NAM", " Nam", "Khac"] {
            let mut input = valid_input();
            input["gioiTinh"] = json!(label);

            let failure = validate_doctor(&input).unwrap_err();
            assert!(cites(&failure, "gioiTinh"), "{label:?} should be rejected");
        }
    }
}
