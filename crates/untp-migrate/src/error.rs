//! Migration errors
//!
//! Every variant is fatal for the document: no output is written.

use serde::Serialize;
use std::fmt;
use untp_credential::{ClassifyError, FeatureLocation};
use untp_object::ShapeError;
use untp_transform::{TargetError, TransformError};

/// Component or service inside a feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Item {
    /// Entry of the feature's `components`
    Component {
        /// Index into `components`
        index: usize,
        /// `type/name` label
        label: String,
    },
    /// Entry of the feature's `services`
    Service {
        /// Index into `services`
        index: usize,
        /// Service `name`
        name: String,
    },
}

/// Where in the input document a fault occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Enclosing feature
    pub feature: FeatureLocation,
    /// Offending component or service
    pub item: Item,
}

impl Location {
    /// Location of a component
    #[must_use]
    pub fn component(feature: &FeatureLocation, index: usize, label: String) -> Self {
        Self {
            feature: feature.clone(),
            item: Item::Component { index, label },
        }
    }

    /// Location of a service
    #[must_use]
    pub fn service(feature: &FeatureLocation, index: usize, name: &str) -> Self {
        Self {
            feature: feature.clone(),
            item: Item::Service {
                index,
                name: name.to_owned(),
            },
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Item::Component { index, label } => {
                write!(f, "{}, component {index} ({label})", self.feature)
            }
            Item::Service { index, name } => write!(f, "{}, service {index} ({name})", self.feature),
        }
    }
}

/// Migration failure
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Input could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Input path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Input is not JSON
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Input path
        path: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Output could not be serialised
    #[error("failed to serialise output: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Output could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// Output path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Target profile could not be loaded
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Document structure above the feature level is malformed
    #[error("malformed document: {0}")]
    Document(#[from] ShapeError),

    /// A feature's components could not be classified
    #[error("{feature}: {source}")]
    Classify {
        /// Feature being classified
        feature: FeatureLocation,
        /// Underlying error
        #[source]
        source: ClassifyError,
    },

    /// A feature's effective type has no transformer for its services
    #[error("{feature}: {source}")]
    Dispatch {
        /// Feature being migrated
        feature: FeatureLocation,
        /// Underlying error
        #[source]
        source: TransformError,
    },

    /// A component could not be migrated
    #[error("{location}: {source}")]
    Component {
        /// Offending component
        location: Location,
        /// Underlying error
        #[source]
        source: TransformError,
    },

    /// A service could not be migrated
    #[error("{location}: {source}")]
    Service {
        /// Offending service
        location: Location,
        /// Underlying error
        #[source]
        source: TransformError,
    },
}

impl MigrationError {
    /// Fault location inside the document, if the error has one
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Component { location, .. } | Self::Service { location, .. } => Some(location),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use untp_credential::CredentialType;

    fn feature() -> FeatureLocation {
        FeatureLocation {
            app: 0,
            feature: 2,
            name: Some("Issue DFR".to_owned()),
        }
    }

    #[test]
    fn component_error_names_location() {
        let err = MigrationError::Component {
            location: Location::component(&feature(), 1, "EntryData/JsonForm".to_owned()),
            source: TransformError::UnsupportedCredentialType(CredentialType::Dia),
        };
        assert_eq!(
            err.to_string(),
            "app 0 feature 2 (Issue DFR), component 1 (EntryData/JsonForm): \
             no transformer registered for credential type DIA"
        );
        assert!(err.location().is_some());
    }

    #[test]
    fn service_location_display() {
        let location = Location::service(&feature(), 0, "processDFR");
        assert_eq!(location.to_string(), "app 0 feature 2 (Issue DFR), service 0 (processDFR)");
    }
}
