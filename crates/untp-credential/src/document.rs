//! App-config document wrapper
//!
//! The document is `{"apps": [{"features": [{"components": [...], "services": [...]}]}]}`.
//! Everything below the feature level stays a generic JSON tree; this module
//! only knows how to reach the features.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use untp_object::{shape, Object, ShapeError};

/// Where a feature sits in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureLocation {
    /// Index into `apps`
    pub app: usize,
    /// Index into the app's `features`
    pub feature: usize,
    /// Feature `name`, when it is a string
    pub name: Option<String>,
}

impl FeatureLocation {
    /// Slash-separated path of the feature
    #[must_use]
    pub fn path(&self) -> String {
        format!("apps/{}/features/{}", self.app, self.feature)
    }

    fn of(app: usize, feature: usize, value: &Object) -> Self {
        Self {
            app,
            feature,
            name: value.get("name").and_then(Value::as_str).map(str::to_owned),
        }
    }
}

impl fmt::Display for FeatureLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app {} feature {}", self.app, self.feature)?;
        if let Some(name) = &self.name {
            write!(f, " ({name})")?;
        }
        Ok(())
    }
}

/// A loaded app-config document
///
/// Owns the whole tree for the duration of a run; migration mutates it in
/// place.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl ConfigDocument {
    /// Wrap a parsed JSON value
    ///
    /// # Errors
    /// [`ShapeError::WrongType`] when the root is not an object.
    pub fn from_value(root: Value) -> Result<Self, ShapeError> {
        shape::as_object(&root, "")?;
        Ok(Self { root })
    }

    /// Borrow the JSON tree
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Give back the JSON tree
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Number of apps (0 when `apps` is absent)
    #[must_use]
    pub fn app_count(&self) -> usize {
        self.root
            .get("apps")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Every feature with its location, in document order
    ///
    /// Absent `apps`/`features` lists contribute nothing.
    ///
    /// # Errors
    /// An app, feature or list of the wrong JSON type.
    pub fn features(&self) -> Result<Vec<(FeatureLocation, &Object)>, ShapeError> {
        let root = shape::as_object(&self.root, "")?;
        let mut out = Vec::new();
        let Some(apps) = shape::optional_array(root, "apps", "")? else {
            return Ok(out);
        };
        for (app_index, app) in apps.iter().enumerate() {
            let app_path = format!("apps/{app_index}");
            let app = shape::as_object(app, &app_path)?;
            let Some(features) = shape::optional_array(app, "features", &app_path)? else {
                continue;
            };
            for (feature_index, feature) in features.iter().enumerate() {
                let location = FeatureLocation {
                    app: app_index,
                    feature: feature_index,
                    name: None,
                };
                let feature = shape::as_object(feature, &location.path())?;
                out.push((FeatureLocation::of(app_index, feature_index, feature), feature));
            }
        }
        Ok(out)
    }

    /// Visit every feature mutably, in document order
    ///
    /// Stops at the first error returned by `visit`.
    ///
    /// # Errors
    /// Shape faults while walking, or whatever `visit` returns.
    pub fn visit_features_mut<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        E: From<ShapeError>,
        F: FnMut(FeatureLocation, &mut Object) -> Result<(), E>,
    {
        let root = shape::as_object_mut(&mut self.root, "")?;
        let Some(apps) = shape::optional_array_mut(root, "apps", "")? else {
            return Ok(());
        };
        for (app_index, app) in apps.iter_mut().enumerate() {
            let app_path = format!("apps/{app_index}");
            let app = shape::as_object_mut(app, &app_path)?;
            let Some(features) = shape::optional_array_mut(app, "features", &app_path)? else {
                continue;
            };
            for (feature_index, feature) in features.iter_mut().enumerate() {
                let path = format!("{app_path}/features/{feature_index}");
                let feature = shape::as_object_mut(feature, &path)?;
                visit(FeatureLocation::of(app_index, feature_index, feature), feature)?;
            }
        }
        Ok(())
    }
}
