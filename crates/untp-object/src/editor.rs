//! Order-preserving edit primitives
//!
//! All three operations treat an absent field as "nothing to do" and never
//! fail on absence. Removal always uses `shift_remove` so the relative order
//! of the surviving keys is untouched.

use crate::error::ShapeError;
use crate::Object;
use serde_json::Value;

/// Rename `old_key` to `new_key`, keeping its ordinal position
///
/// Returns the renamed value, or `None` (and leaves `obj` untouched) when
/// `old_key` is absent. If `new_key` already exists elsewhere in the object,
/// the renamed entry keeps whichever of the two positions comes first and
/// carries the value that was under `old_key`.
pub fn rename_key_preserving_order<'a>(
    obj: &'a mut Object,
    old_key: &str,
    new_key: &str,
) -> Option<&'a mut Value> {
    if !obj.contains_key(old_key) {
        return None;
    }
    if old_key != new_key {
        let entries = std::mem::take(obj);
        let mut renamed = None;
        for (key, value) in entries {
            if key == old_key {
                renamed = Some(value);
                obj.insert(new_key.to_owned(), Value::Null);
            } else if key == new_key && renamed.is_some() {
                // Later duplicate of the target name: the old key's value wins.
                continue;
            } else {
                obj.insert(key, value);
            }
        }
        if let Some(value) = renamed {
            obj.insert(new_key.to_owned(), value);
        }
    }
    obj.get_mut(new_key)
}

/// Remove every name in `fields` from `value`
///
/// - array: removed from each object element, other elements untouched
/// - object: removed directly
/// - anything else: unchanged
///
/// Idempotent.
pub fn strip_fields<'a>(value: &'a mut Value, fields: &[&str]) -> &'a mut Value {
    match value {
        Value::Array(items) => {
            for item in items.iter_mut() {
                if let Value::Object(map) = item {
                    strip_object(map, fields);
                }
            }
        }
        Value::Object(map) => strip_object(map, fields),
        _ => {}
    }
    value
}

fn strip_object(map: &mut Object, fields: &[&str]) {
    for field in fields {
        map.shift_remove(*field);
    }
}

/// Remove the object at `field` and merge its entries into `obj`
///
/// Keys already in `obj` are overwritten by the nested value in place; new
/// keys are appended in nested order. No-op when `field` is absent.
///
/// # Errors
/// [`ShapeError::WrongType`] if the value at `field` is not an object. `obj`
/// is left unchanged in that case.
pub fn flatten_into<'a>(obj: &'a mut Object, field: &str) -> Result<&'a mut Object, ShapeError> {
    if let Some(other) = obj.get(field).filter(|value| !value.is_object()) {
        return Err(ShapeError::wrong_type(field, "object", other));
    }
    if let Some(Value::Object(nested)) = obj.shift_remove(field) {
        for (key, value) in nested {
            obj.insert(key, value);
        }
    }
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn keys(map: &Object) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn rename_keeps_position() {
        let mut map = object(json!({"a": 1, "b": [2], "c": 3}));
        let renamed = rename_key_preserving_order(&mut map, "b", "x").cloned();

        assert_eq!(renamed, Some(json!([2])));
        assert_eq!(keys(&map), ["a", "x", "c"]);
        assert_eq!(map["x"], json!([2]));
    }

    #[test]
    fn rename_absent_is_noop() {
        let mut map = object(json!({"a": 1}));
        assert!(rename_key_preserving_order(&mut map, "missing", "x").is_none());
        assert_eq!(map, object(json!({"a": 1})));
    }

    #[test]
    fn rename_returns_mutable_slot() {
        let mut map = object(json!({"otherIdentifier": [{"id": "y", "type": ["Identifier"]}]}));
        if let Some(value) = rename_key_preserving_order(&mut map, "otherIdentifier", "alias") {
            strip_fields(value, &["type"]);
        }
        assert_eq!(Value::Object(map), json!({"alias": [{"id": "y"}]}));
    }

    #[test]
    fn rename_onto_existing_key() {
        let mut map = object(json!({"old": 1, "mid": 2, "new": 3}));
        rename_key_preserving_order(&mut map, "old", "new");
        assert_eq!(keys(&map), ["new", "mid"]);
        assert_eq!(map["new"], json!(1));

        let mut map = object(json!({"new": 3, "mid": 2, "old": 1}));
        rename_key_preserving_order(&mut map, "old", "new");
        assert_eq!(keys(&map), ["new", "mid"]);
        assert_eq!(map["new"], json!(1));
    }

    #[test]
    fn strip_array_elements() {
        let mut value = json!([
            {"id": "a", "type": ["Identifier"], "idScheme": {}},
            "untouched",
            {"id": "b"}
        ]);
        strip_fields(&mut value, &["type", "idScheme"]);
        assert_eq!(value, json!([{"id": "a"}, "untouched", {"id": "b"}]));
    }

    #[test]
    fn strip_object_keeps_order() {
        let mut value = json!({"z": 1, "type": 2, "a": 3, "m": 4});
        strip_fields(&mut value, &["type"]);
        assert_eq!(keys(value.as_object().unwrap()), ["z", "a", "m"]);
    }

    #[test]
    fn strip_scalar_unchanged() {
        let mut value = json!("type");
        strip_fields(&mut value, &["type"]);
        assert_eq!(value, json!("type"));
    }

    #[test]
    fn flatten_nested_wins() {
        let mut map = object(json!({"a": 1, "nested": {"a": 2, "b": 3}}));
        flatten_into(&mut map, "nested").unwrap();
        assert_eq!(Value::Object(map), json!({"a": 2, "b": 3}));
    }

    #[test]
    fn flatten_absent_is_noop() {
        let mut map = object(json!({"a": 1}));
        flatten_into(&mut map, "nested").unwrap();
        assert_eq!(Value::Object(map), json!({"a": 1}));
    }

    #[test]
    fn flatten_rejects_non_object() {
        let mut map = object(json!({"nested": [1, 2]}));
        let err = flatten_into(&mut map, "nested").unwrap_err();
        assert!(matches!(err, ShapeError::WrongType { expected: "object", .. }));
        assert_eq!(Value::Object(map), json!({"nested": [1, 2]}));
    }
}
