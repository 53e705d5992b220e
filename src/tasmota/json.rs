//! Field extraction over a parsed `serde_json::Value` tree.
//!
//! Every helper fails on the first violated precondition and never substitutes
//! a default: a missing member is `MissingField`, a member of the wrong JSON
//! type is `WrongType`.

use serde_json::Value;

use super::TranslateError;

pub fn field<'a>(object: &'a Value, name: &str) -> Result<&'a Value, TranslateError> {
    object.get(name).ok_or_else(|| TranslateError::MissingField {
        field: name.to_string(),
    })
}

pub fn object_field<'a>(object: &'a Value, name: &str) -> Result<&'a Value, TranslateError> {
    let value = field(object, name)?;
    if !value.is_object() {
        return Err(wrong_type(name, "an object"));
    }
    Ok(value)
}

pub fn string_field<'a>(object: &'a Value, name: &str) -> Result<&'a str, TranslateError> {
    field(object, name)?
        .as_str()
        .ok_or_else(|| wrong_type(name, "a string"))
}

/// Fails with `WrongType` both when `array` isn't an array and when it is too short.
pub fn array_element(array: &Value, index: usize) -> Result<&Value, TranslateError> {
    array
        .as_array()
        .and_then(|items| items.get(index))
        .ok_or_else(|| wrong_type(&format!("[{index}]"), "an array element"))
}

pub fn string_element(array: &Value, index: usize) -> Result<&str, TranslateError> {
    array_element(array, index)?
        .as_str()
        .ok_or_else(|| wrong_type(&format!("[{index}]"), "a string"))
}

/// Only JSON integers in the `i32` range are accepted: `42.0` and `"42"` are rejected.
pub fn int32_field(object: &Value, name: &str) -> Result<i32, TranslateError> {
    field(object, name)?
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| wrong_type(name, "an integer"))
}

fn wrong_type(field: &str, expected: &'static str) -> TranslateError {
    TranslateError::WrongType {
        field: field.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn field_reports_missing_member() {
        let doc = json!({"a": 1});
        assert_matches!(
            field(&doc, "b"),
            Err(TranslateError::MissingField { field }) if field == "b"
        );
    }

    #[test]
    fn field_on_non_object_is_missing() {
        let doc = json!([1, 2]);
        assert_matches!(field(&doc, "a"), Err(TranslateError::MissingField { .. }));
    }

    #[test]
    fn object_field_checks_missing_before_type() {
        let doc = json!({"StatusSNS": 3});
        assert_matches!(
            object_field(&doc, "ENERGY"),
            Err(TranslateError::MissingField { field }) if field == "ENERGY"
        );
        assert_matches!(
            object_field(&doc, "StatusSNS"),
            Err(TranslateError::WrongType { field, expected: "an object" }) if field == "StatusSNS"
        );
    }

    #[test]
    fn string_field_returns_borrowed_text() {
        let doc = json!({"t": "sonoff1", "n": 1});
        assert_eq!(string_field(&doc, "t").unwrap(), "sonoff1");
        assert_matches!(string_field(&doc, "n"), Err(TranslateError::WrongType { .. }));
    }

    #[test_case(json!("plug"), 0 ; "not an array")]
    #[test_case(json!([]), 0 ; "empty array")]
    #[test_case(json!(["a"]), 1 ; "index past end")]
    fn array_element_rejects(value: Value, index: usize) {
        assert_matches!(
            array_element(&value, index),
            Err(TranslateError::WrongType { .. })
        );
    }

    #[test]
    fn string_element_checks_element_type() {
        let value = json!(["Kitchen", null]);
        assert_eq!(string_element(&value, 0).unwrap(), "Kitchen");
        assert_matches!(
            string_element(&value, 1),
            Err(TranslateError::WrongType { field, .. }) if field == "[1]"
        );
    }

    #[test_case(json!({"Power": 42}), Some(42) ; "integer")]
    #[test_case(json!({"Power": -7}), Some(-7) ; "negative integer")]
    #[test_case(json!({"Power": 42.0}), None ; "float")]
    #[test_case(json!({"Power": "42"}), None ; "string")]
    #[test_case(json!({"Power": 4_294_967_296_i64}), None ; "out of i32 range")]
    fn int32_field_accepts_only_integers(doc: Value, expected: Option<i32>) {
        match expected {
            Some(n) => assert_eq!(int32_field(&doc, "Power").unwrap(), n),
            None => assert_matches!(
                int32_field(&doc, "Power"),
                Err(TranslateError::WrongType { expected: "an integer", .. })
            ),
        }
    }
}
