//! UNTP Credential Transformers
//!
//! Per-credential-type migrations of app-config components and services,
//! driven by a versioned [`MigrationTarget`].
//!
//! # Core Concepts
//!
//! - [`CredentialTransformer`]: component and service edits for one credential type
//! - [`TransformerRegistry`]: credential type → transformer
//! - [`GeneralMigrator`]: endpoint rewrites shared by every in-scope service
//! - [`MigrationTarget`]: every literal a migration writes, loadable from TOML
//!
//! # Transformers
//!
//! | Type | Transformer | Component | Service |
//! |------|-------------|-----------|---------|
//! | DFR | [`FacilityRecordTransformer`] | payload restructure | context, templates, issuer |
//! | DTE | [`TraceabilityEventTransformer`] | schema bump | none |
//! | DPP, DCC | [`SchemaBumpTransformer`] | schema bump, envelope strip | none |
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use untp_credential::CredentialType;
//! use untp_transform::{MigrationTarget, TransformerRegistry};
//!
//! let registry = TransformerRegistry::with_defaults(&MigrationTarget::v0_6_0());
//! let transformer = registry.resolve(CredentialType::Dte).unwrap();
//!
//! let mut component = json!({
//!     "type": "EntryData",
//!     "props": {"schema": {"url": "https://x/traceabilityEvents/v/0.5.0/schema.json"}}
//! });
//! transformer
//!     .transform_component(component.as_object_mut().unwrap(), "components/0")
//!     .unwrap();
//! assert_eq!(
//!     component["props"]["schema"]["url"],
//!     json!("https://x/traceabilityEvents/v/0.6.0/schema.json")
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod facility_record;
mod general;
mod registry;
mod schema_bump;
mod target;
mod traceability_event;
mod transformer;

// Re-exports
pub use error::{TargetError, TransformError};
pub use facility_record::FacilityRecordTransformer;
pub use general::GeneralMigrator;
pub use registry::TransformerRegistry;
pub use schema_bump::SchemaBumpTransformer;
pub use target::{
    ConformityDefaults, EndpointPolicy, EndpointTargets, FacilityRecordTarget, MigrationTarget,
    DFR_RENDER_TEMPLATE_V0_6_0,
};
pub use traceability_event::TraceabilityEventTransformer;
pub use transformer::{
    bump_schema_version, migrate_embedded_services, ComponentOutcome, CredentialTransformer,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
