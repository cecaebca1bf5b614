//! UNTP App-Config Migration
//!
//! Walks an app-config document, classifies each feature's components and
//! hands them, and the feature's in-scope services, to the matching
//! credential transformer.
//!
//! # Core Concepts
//!
//! - [`Migrator`]: the config walker; consumes a document, returns it migrated
//!   together with a [`MigrationReport`]
//! - [`MigrationOptions`]: service-name scope and feature type policy
//! - [`extract_features`]: per-credential-type feature subsets for testing
//! - [`load_document`] / [`write_document`]: whole-document, atomic I/O
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use untp_credential::ConfigDocument;
//! use untp_migrate::Migrator;
//! use untp_transform::MigrationTarget;
//!
//! let document = ConfigDocument::from_value(json!({
//!     "apps": [{"features": [{
//!         "name": "Events",
//!         "components": [{
//!             "type": "EntryData",
//!             "props": {"schema": {"url": "https://x/traceabilityEvents/v/0.5.0/schema.json"}}
//!         }],
//!         "services": [{"name": "processEvent", "parameters": [{"storage": {"url": "old"}}]}]
//!     }]}]
//! }))
//! .unwrap();
//!
//! let (migrated, report) = Migrator::new(&MigrationTarget::v0_6_0()).migrate(document).unwrap();
//! assert_eq!(report.services_transformed(), 1);
//! assert_eq!(
//!     migrated.as_value()["apps"][0]["features"][0]["services"][0]["parameters"][0]["storage"]["url"],
//!     json!("http://localhost:3334/api/1.0.0/documents")
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod extract;
mod io;
mod options;
mod report;
mod walker;

use std::path::Path;

// Re-exports
pub use error::{Item, Location, MigrationError};
pub use extract::extract_features;
pub use io::{load_document, to_pretty_json, write_document, write_json_atomic};
pub use options::{MigrationOptions, DEFAULT_SERVICE_PREFIX};
pub use report::{FeatureOutcome, FeatureReport, MigrationReport, MigrationWarning};
pub use walker::Migrator;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Migrate the document at `input`, writing it to `output` unless `None`
///
/// Nothing is written unless the whole document migrated.
///
/// # Errors
/// Any [`MigrationError`]; `output` is then left as it was.
pub fn migrate_file(
    migrator: &Migrator,
    input: &Path,
    output: Option<&Path>,
) -> Result<MigrationReport, MigrationError> {
    let document = load_document(input)?;
    let (migrated, report) = migrator.migrate(document)?;
    match output {
        Some(path) => {
            write_document(path, &migrated)?;
            tracing::info!(input = %input.display(), output = %path.display(), "Migrated document written");
        }
        None => tracing::info!(input = %input.display(), "Dry run; nothing written"),
    }
    Ok(report)
}
