//! Migration report

use serde::Serialize;
use std::fmt;
use untp_credential::{CredentialType, FeatureLocation};

/// What happened to one feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum FeatureOutcome {
    /// Components classified; services dispatched to this type's transformer
    Migrated {
        /// Effective credential type
        credential_type: CredentialType,
    },
    /// No component classified; services left untouched
    NoCredentialType,
}

/// Per-feature entry of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureReport {
    /// Feature location
    pub location: FeatureLocation,
    /// Outcome
    #[serde(flatten)]
    pub outcome: FeatureOutcome,
    /// Components transformed in this feature
    pub components: usize,
    /// Services transformed in this feature
    pub services: usize,
}

/// Non-fatal condition met during the walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "kebab-case")]
pub enum MigrationWarning {
    /// A loader held other than one nested component; the component was skipped
    MultipleNestedComponents {
        /// Enclosing feature
        feature: FeatureLocation,
        /// Index into `components`
        component: usize,
        /// Nested components present
        found: usize,
    },
    /// A component was already at the target version and was left unchanged
    AlreadyMigrated {
        /// Enclosing feature
        feature: FeatureLocation,
        /// Index into `components`
        component: usize,
        /// Credential type the component classified as
        credential_type: CredentialType,
    },
}

impl fmt::Display for MigrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleNestedComponents {
                feature,
                component,
                found,
            } => write!(
                f,
                "{feature}, component {component}: expected exactly one nested component, found {found}"
            ),
            Self::AlreadyMigrated {
                feature,
                component,
                credential_type,
            } => write!(
                f,
                "{feature}, component {component}: {credential_type} form already migrated; left unchanged"
            ),
        }
    }
}

/// Summary of one migration run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Version migrated from
    pub source_version: String,
    /// Version migrated to
    pub target_version: String,
    /// Apps in the document
    pub apps: usize,
    /// Per-feature outcomes, in document order
    pub features: Vec<FeatureReport>,
    /// Non-fatal conditions
    pub warnings: Vec<MigrationWarning>,
}

impl MigrationReport {
    /// Total components transformed
    #[must_use]
    pub fn components_transformed(&self) -> usize {
        self.features.iter().map(|feature| feature.components).sum()
    }

    /// Total services transformed
    #[must_use]
    pub fn services_transformed(&self) -> usize {
        self.features.iter().map(|feature| feature.services).sum()
    }

    /// Features that received a credential type
    #[must_use]
    pub fn migrated_features(&self) -> usize {
        self.features
            .iter()
            .filter(|feature| matches!(feature.outcome, FeatureOutcome::Migrated { .. }))
            .count()
    }

    /// Pretty JSON rendering
    ///
    /// # Errors
    /// Serialisation failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Migration {} -> {}", self.source_version, self.target_version)?;
        writeln!(f, "  Apps: {}", self.apps)?;
        writeln!(
            f,
            "  Features: {} ({} migrated)",
            self.features.len(),
            self.migrated_features()
        )?;
        writeln!(f, "  Components transformed: {}", self.components_transformed())?;
        writeln!(f, "  Services transformed: {}", self.services_transformed())?;
        write!(f, "  Warnings: {}", self.warnings.len())?;
        for warning in &self.warnings {
            write!(f, "\n    - {warning}")?;
        }
        Ok(())
    }
}
