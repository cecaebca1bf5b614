//! Shape errors for JSON trees

use serde_json::Value;

/// A JSON value did not have the shape a migration step relies on
///
/// `path` is a slash-separated location such as `props/data/credentialSubject`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// A field assumed present was absent
    #[error("missing field at {path}")]
    Missing {
        /// Location of the missing field
        path: String,
    },

    /// A field had an incompatible JSON type
    #[error("expected {expected} at {path}, found {found}")]
    WrongType {
        /// Location of the offending value
        path: String,
        /// JSON type the step needs
        expected: &'static str,
        /// JSON type actually present
        found: &'static str,
    },
}

impl ShapeError {
    /// Create missing-field error
    #[inline]
    #[must_use]
    pub fn missing(path: impl Into<String>) -> Self {
        Self::Missing { path: path.into() }
    }

    /// Create wrong-type error for `found`
    #[inline]
    #[must_use]
    pub fn wrong_type(path: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Self::WrongType {
            path: path.into(),
            expected,
            found: type_name(found),
        }
    }

    /// Location the error refers to
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Missing { path } | Self::WrongType { path, .. } => path,
        }
    }

    /// Re-anchor a relative location under `parent`
    #[must_use]
    pub fn within(mut self, parent: &str) -> Self {
        if !parent.is_empty() {
            let (Self::Missing { path } | Self::WrongType { path, .. }) = &mut self;
            *path = format!("{parent}/{path}");
        }
        self
    }
}

/// JSON type name of a value
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
