//! Versioned migration target
//!
//! Every literal a migration writes lives here, so moving to another schema
//! version is a new profile rather than new code. [`MigrationTarget::v0_6_0`]
//! is built in; other profiles are TOML files:
//!
//! ```toml
//! source-version = "0.5.0"
//! version = "0.6.0"
//! endpoint-policy = "overwrite"
//!
//! [endpoints]
//! storage-url = "http://localhost:3334/api/1.0.0/documents"
//! dlr-api-url = "http://localhost:3000/api/1.0.0"
//! link-register-path = "resolver"
//!
//! [facility-record]
//! context = ["https://www.w3.org/ns/credentials/v2", "https://test.uncefact.org/vocabulary/untp/dfr/0.6.0/"]
//! service-context = ["https://test.uncefact.org/vocabulary/untp/dfr/0.6.0/"]
//! schema-url = "https://jargon.sh/user/unece/DigitalFacilityRecord/v/0.6.0/artefacts/jsonSchemas/FacilityRecord.json?class=FacilityRecord"
//! render-template-path = "dfr.hbs"
//! ```

use crate::error::TargetError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Facility-record render template for 0.6.0, kept as an opaque asset
pub const DFR_RENDER_TEMPLATE_V0_6_0: &str = include_str!("../assets/dfr-0.6.0.hbs");

/// Complete target configuration for one schema-version migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MigrationTarget {
    /// Version migrated from, e.g. `0.5.0`
    pub source_version: String,
    /// Version migrated to, e.g. `0.6.0`
    pub version: String,
    /// Shared service endpoints
    pub endpoints: EndpointTargets,
    /// How existing endpoint values are treated
    #[serde(default)]
    pub endpoint_policy: EndpointPolicy,
    /// Facility-record literals
    pub facility_record: FacilityRecordTarget,
}

/// Type-agnostic endpoint literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EndpointTargets {
    /// `storage.url`
    pub storage_url: String,
    /// `dlr.dlrAPIUrl`
    pub dlr_api_url: String,
    /// `dlr.linkRegisterPath`
    pub link_register_path: String,
}

/// Endpoint rewrite policy
///
/// Both variants are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointPolicy {
    /// Always write the literal
    #[default]
    Overwrite,
    /// Keep a string that already contains the literal, otherwise write it
    PreserveCurrent,
}

/// Facility-record literals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FacilityRecordTarget {
    /// JSON-LD `@context` of the credential payload
    pub context: Vec<String>,
    /// `context` of the `digitalFacilityRecord` service configuration
    pub service_context: Vec<String>,
    /// `schema.url` of the form
    pub schema_url: String,
    /// Defaults injected into conformity claims
    #[serde(default)]
    pub conformity: ConformityDefaults,
    /// External template file, relative to the profile file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_template_path: Option<PathBuf>,
    /// Resolved template text
    #[serde(skip, default = "builtin_render_template")]
    pub render_template: String,
}

/// Placeholder values for conformity criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConformityDefaults {
    /// Criterion `description`
    pub description: String,
    /// Claim and criterion `conformityTopic`
    pub topic: String,
    /// Criterion `status`
    pub status: String,
}

impl Default for ConformityDefaults {
    fn default() -> Self {
        Self {
            description: "Default description".to_owned(),
            topic: "environment.emissions".to_owned(),
            status: "proposed".to_owned(),
        }
    }
}

fn builtin_render_template() -> String {
    DFR_RENDER_TEMPLATE_V0_6_0.to_owned()
}

impl MigrationTarget {
    /// Built-in 0.5.0 → 0.6.0 profile
    #[must_use]
    pub fn v0_6_0() -> Self {
        Self {
            source_version: "0.5.0".to_owned(),
            version: "0.6.0".to_owned(),
            endpoints: EndpointTargets {
                storage_url: "http://localhost:3334/api/1.0.0/documents".to_owned(),
                dlr_api_url: "http://localhost:3000/api/1.0.0".to_owned(),
                link_register_path: "resolver".to_owned(),
            },
            endpoint_policy: EndpointPolicy::Overwrite,
            facility_record: FacilityRecordTarget {
                context: vec![
                    "https://www.w3.org/ns/credentials/v2".to_owned(),
                    "https://test.uncefact.org/vocabulary/untp/dfr/0.6.0/".to_owned(),
                ],
                service_context: vec!["https://test.uncefact.org/vocabulary/untp/dfr/0.6.0/".to_owned()],
                schema_url: "https://jargon.sh/user/unece/DigitalFacilityRecord/v/0.6.0/artefacts/jsonSchemas/FacilityRecord.json?class=FacilityRecord".to_owned(),
                conformity: ConformityDefaults::default(),
                render_template_path: None,
                render_template: builtin_render_template(),
            },
        }
    }

    /// With endpoint policy
    #[inline]
    #[must_use]
    pub fn with_endpoint_policy(mut self, policy: EndpointPolicy) -> Self {
        self.endpoint_policy = policy;
        self
    }

    /// With render template text
    #[inline]
    #[must_use]
    pub fn with_render_template(mut self, template: impl Into<String>) -> Self {
        self.facility_record.render_template = template.into();
        self
    }

    /// Parse a profile; a `render-template-path` is resolved against `base_dir`
    ///
    /// # Errors
    /// Invalid TOML or an unreadable template file.
    pub fn from_toml_str(text: &str, origin: &str, base_dir: &Path) -> Result<Self, TargetError> {
        let mut target: Self = toml::from_str(text).map_err(|source| TargetError::Parse {
            path: origin.to_owned(),
            source,
        })?;
        if let Some(relative) = &target.facility_record.render_template_path {
            let path = base_dir.join(relative);
            target.facility_record.render_template =
                std::fs::read_to_string(&path).map_err(|source| TargetError::Template {
                    path: path.display().to_string(),
                    source,
                })?;
        }
        Ok(target)
    }

    /// Load a profile file
    ///
    /// # Errors
    /// Unreadable or invalid profile, or an unreadable template file.
    pub fn load(path: &Path) -> Result<Self, TargetError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| TargetError::Read {
            path: origin.clone(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let target = Self::from_toml_str(&text, &origin, base_dir)?;
        tracing::debug!(profile = %origin, version = %target.version, "Loaded migration target");
        Ok(target)
    }
}

impl Default for MigrationTarget {
    fn default() -> Self {
        Self::v0_6_0()
    }
}
