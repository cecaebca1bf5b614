//! Component discriminators and form-props resolution

use crate::error::ClassifyError;
use serde_json::Value;
use untp_object::{shape, Object};

/// `type` of components that carry credential data
pub const ENTRY_DATA: &str = "EntryData";

/// `name` of components that wrap their form in `props.nestedComponents`
pub const LOCAL_STORAGE_LOADER: &str = "LocalStorageLoader";

/// Whether `component` is an `EntryData` component
#[must_use]
pub fn is_entry_data(component: &Object) -> bool {
    component.get("type").and_then(Value::as_str) == Some(ENTRY_DATA)
}

/// Whether `component` is a `LocalStorageLoader`
#[must_use]
pub fn is_loader(component: &Object) -> bool {
    component.get("name").and_then(Value::as_str) == Some(LOCAL_STORAGE_LOADER)
}

/// Short `type/name` label for logs and error locations
#[must_use]
pub fn label(component: &Object) -> String {
    let field = |key: &str| {
        component
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_owned()
    };
    format!("{}/{}", field("type"), field("name"))
}

/// Props holding `schema` and `data`, with their location
///
/// For a loader this is the single nested component's `props`; otherwise the
/// component's own `props`.
///
/// # Errors
/// [`ClassifyError::MultipleNestedComponents`] when a loader does not hold
/// exactly one nested component; [`ClassifyError::Shape`] when `props` or
/// `nestedComponents` is missing or mistyped.
pub fn form_props<'a>(component: &'a Object, path: &str) -> Result<(&'a Object, String), ClassifyError> {
    let props_path = shape::join(path, "props");
    let props = shape::require_object(component, "props", path)?;
    if !is_loader(component) {
        return Ok((props, props_path));
    }
    let nested = shape::require_array(props, "nestedComponents", &props_path)?;
    let [single] = nested.as_slice() else {
        return Err(ClassifyError::MultipleNestedComponents { found: nested.len() });
    };
    let single_path = format!("{props_path}/nestedComponents/0");
    let single = shape::as_object(single, &single_path)?;
    let inner = shape::require_object(single, "props", &single_path)?;
    Ok((inner, shape::join(&single_path, "props")))
}

/// Mutable variant of [`form_props`]
///
/// # Errors
/// As [`form_props`].
pub fn form_props_mut<'a>(
    component: &'a mut Object,
    path: &str,
) -> Result<(&'a mut Object, String), ClassifyError> {
    let loader = is_loader(component);
    let props_path = shape::join(path, "props");
    let props = shape::require_object_mut(component, "props", path)?;
    if !loader {
        return Ok((props, props_path));
    }
    let nested_path = shape::join(&props_path, "nestedComponents");
    let nested = shape::as_array_mut(
        shape::require_mut(props, "nestedComponents", &props_path)?,
        &nested_path,
    )?;
    let found = nested.len();
    let [single] = nested.as_mut_slice() else {
        return Err(ClassifyError::MultipleNestedComponents { found });
    };
    let single_path = format!("{nested_path}/0");
    let single = shape::as_object_mut(single, &single_path)?;
    let inner = shape::require_object_mut(single, "props", &single_path)?;
    Ok((inner, shape::join(&single_path, "props")))
}

/// The `schema.url` string of a component's form
///
/// # Errors
/// As [`form_props`], plus a missing or non-string `schema.url`.
pub fn schema_reference<'a>(component: &'a Object, path: &str) -> Result<&'a str, ClassifyError> {
    let (props, props_path) = form_props(component, path)?;
    let schema_path = shape::join(&props_path, "schema");
    let schema = shape::require_object(props, "schema", &props_path)?;
    Ok(shape::require_str(schema, "url", &schema_path)?)
}
