//! Transformation errors

use untp_credential::{ClassifyError, CredentialType};
use untp_object::ShapeError;

/// Transformer failure
///
/// Absent optional fields never produce an error; these are all fatal for
/// the document being migrated.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Classifier produced a type the registry does not know
    #[error("no transformer registered for credential type {0}")]
    UnsupportedCredentialType(CredentialType),

    /// A field had an incompatible shape
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The component's form props could not be resolved
    #[error(transparent)]
    Form(#[from] ClassifyError),
}

/// Target profile loading errors
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// Profile file could not be read
    #[error("failed to read target profile {path}: {source}")]
    Read {
        /// Profile path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Profile file is not a valid profile
    #[error("invalid target profile {path}: {source}")]
    Parse {
        /// Profile path
        path: String,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Render template asset could not be read
    #[error("failed to read render template {path}: {source}")]
    Template {
        /// Template path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}
