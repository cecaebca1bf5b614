//! UNTP Credential Classification
//!
//! Recognises which credential family an app-config component describes.
//!
//! # Core Concepts
//!
//! - [`CredentialType`]: DFR, DTE, DPP, DCC, DIA
//! - [`CredentialClassifier`]: ordered `(substring, type)` rules over `schema.url`
//! - [`FeatureTypePolicy`]: how several classified components settle a feature's type
//! - [`ConfigDocument`]: the loaded document and its feature walk
//!
//! # Example
//!
//! ```rust
//! use untp_credential::{CredentialClassifier, CredentialType};
//!
//! let classifier = CredentialClassifier::with_defaults();
//! let url = "https://jargon.sh/user/unece/DigitalFacilityRecord/v/0.5.0/FacilityRecord.json";
//! assert_eq!(classifier.match_reference(url), Some(CredentialType::Dfr));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod classifier;
pub mod component;
mod credential_type;
mod document;
mod error;

// Re-exports
pub use classifier::{
    classify_feature, ClassificationRule, CredentialClassifier, FeatureClassification,
    FeatureTypePolicy,
};
pub use credential_type::{CredentialType, ParseCredentialTypeError};
pub use document::{ConfigDocument, FeatureLocation};
pub use error::ClassifyError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
