//! Located shape probes
//!
//! Each probe takes the object being read and its own location (`parent`),
//! so a failure reports the full path of the offending field.
//!
//! - `require_*`: the field must be present and of the given type
//! - `optional_*`: absence is `Ok(None)`; a present field of the wrong type is
//!   still an error
//! - `nullable_*`: like `optional_*`, with an explicit `null` read as absent

use crate::error::ShapeError;
use crate::Object;
use serde_json::Value;

/// Join a parent location and a key
#[must_use]
pub fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}/{key}")
    }
}

/// View `value` as an object
///
/// # Errors
/// [`ShapeError::WrongType`] when `value` is not an object.
pub fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, ShapeError> {
    value
        .as_object()
        .ok_or_else(|| ShapeError::wrong_type(path, "object", value))
}

/// View `value` as a mutable object
///
/// # Errors
/// [`ShapeError::WrongType`] when `value` is not an object.
pub fn as_object_mut<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Object, ShapeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ShapeError::wrong_type(path, "object", other)),
    }
}

/// View `value` as a mutable array
///
/// # Errors
/// [`ShapeError::WrongType`] when `value` is not an array.
pub fn as_array_mut<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Vec<Value>, ShapeError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(ShapeError::wrong_type(path, "array", other)),
    }
}

/// Field that must be present
///
/// # Errors
/// [`ShapeError::Missing`] when absent.
pub fn require<'a>(obj: &'a Object, key: &str, parent: &str) -> Result<&'a Value, ShapeError> {
    obj.get(key).ok_or_else(|| ShapeError::missing(join(parent, key)))
}

/// Mutable field that must be present
///
/// # Errors
/// [`ShapeError::Missing`] when absent.
pub fn require_mut<'a>(
    obj: &'a mut Object,
    key: &str,
    parent: &str,
) -> Result<&'a mut Value, ShapeError> {
    obj.get_mut(key)
        .ok_or_else(|| ShapeError::missing(join(parent, key)))
}

/// Object field that must be present
///
/// # Errors
/// Missing or not an object.
pub fn require_object<'a>(obj: &'a Object, key: &str, parent: &str) -> Result<&'a Object, ShapeError> {
    as_object(require(obj, key, parent)?, &join(parent, key))
}

/// Mutable object field that must be present
///
/// # Errors
/// Missing or not an object.
pub fn require_object_mut<'a>(
    obj: &'a mut Object,
    key: &str,
    parent: &str,
) -> Result<&'a mut Object, ShapeError> {
    let path = join(parent, key);
    as_object_mut(require_mut(obj, key, parent)?, &path)
}

/// Array field that must be present
///
/// # Errors
/// Missing or not an array.
pub fn require_array<'a>(
    obj: &'a Object,
    key: &str,
    parent: &str,
) -> Result<&'a Vec<Value>, ShapeError> {
    let value = require(obj, key, parent)?;
    value
        .as_array()
        .ok_or_else(|| ShapeError::wrong_type(join(parent, key), "array", value))
}

/// String field that must be present
///
/// # Errors
/// Missing or not a string.
pub fn require_str<'a>(obj: &'a Object, key: &str, parent: &str) -> Result<&'a str, ShapeError> {
    let value = require(obj, key, parent)?;
    value
        .as_str()
        .ok_or_else(|| ShapeError::wrong_type(join(parent, key), "string", value))
}

/// Optional string field
///
/// # Errors
/// Present but not a string.
pub fn optional_str<'a>(
    obj: &'a Object,
    key: &str,
    parent: &str,
) -> Result<Option<&'a str>, ShapeError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(ShapeError::wrong_type(join(parent, key), "string", other)),
    }
}

/// Optional array field
///
/// # Errors
/// Present but not an array.
pub fn optional_array<'a>(
    obj: &'a Object,
    key: &str,
    parent: &str,
) -> Result<Option<&'a Vec<Value>>, ShapeError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(ShapeError::wrong_type(join(parent, key), "array", other)),
    }
}

/// Optional mutable object field
///
/// # Errors
/// Present but not an object.
pub fn optional_object_mut<'a>(
    obj: &'a mut Object,
    key: &str,
    parent: &str,
) -> Result<Option<&'a mut Object>, ShapeError> {
    match obj.get_mut(key) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(ShapeError::wrong_type(join(parent, key), "object", other)),
    }
}

/// Optional mutable object field where `null` counts as absent
///
/// # Errors
/// Present, not `null` and not an object.
pub fn nullable_object_mut<'a>(
    obj: &'a mut Object,
    key: &str,
    parent: &str,
) -> Result<Option<&'a mut Object>, ShapeError> {
    match obj.get_mut(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(ShapeError::wrong_type(join(parent, key), "object", other)),
    }
}

/// Optional mutable array field
///
/// # Errors
/// Present but not an array.
pub fn optional_array_mut<'a>(
    obj: &'a mut Object,
    key: &str,
    parent: &str,
) -> Result<Option<&'a mut Vec<Value>>, ShapeError> {
    match obj.get_mut(key) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(ShapeError::wrong_type(join(parent, key), "array", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn join_paths() {
        assert_eq!(join("", "props"), "props");
        assert_eq!(join("props", "schema"), "props/schema");
    }

    #[test]
    fn require_reports_full_path() {
        let value = json!({"schema": {}});
        let props = value.as_object().unwrap();
        let schema = require_object(props, "schema", "props").unwrap();

        let err = require_str(schema, "url", "props/schema").unwrap_err();
        assert_eq!(err, ShapeError::missing("props/schema/url"));
    }

    #[test]
    fn optional_tolerates_absence_only() {
        let mut value = json!({"list": {}, "obj": []});
        let map = value.as_object_mut().unwrap();

        assert!(optional_array_mut(map, "absent", "").unwrap().is_none());
        assert!(optional_array_mut(map, "list", "").is_err());
        assert!(optional_object_mut(map, "obj", "").is_err());
        assert!(optional_str(map, "absent", "").unwrap().is_none());
    }

    #[test]
    fn nullable_reads_null_as_absent() {
        let mut value = json!({"storage": null, "dlr": {"a": 1}, "vckit": "x"});
        let map = value.as_object_mut().unwrap();

        assert!(nullable_object_mut(map, "storage", "p").unwrap().is_none());
        assert!(nullable_object_mut(map, "absent", "p").unwrap().is_none());
        assert!(nullable_object_mut(map, "dlr", "p").unwrap().is_some());
        assert_eq!(
            nullable_object_mut(map, "vckit", "p").unwrap_err(),
            ShapeError::wrong_type("p/vckit", "object", &json!("x"))
        );
        assert!(optional_object_mut(map, "storage", "p").is_err());
    }
}
