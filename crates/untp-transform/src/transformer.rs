//! Credential transformer trait and shared steps

use crate::error::TransformError;
use crate::general::GeneralMigrator;
use std::fmt;
use untp_credential::CredentialType;
use untp_object::{shape, Object};

/// Result of transforming one component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentOutcome {
    /// Component edited in place
    Migrated,
    /// Component already at the target version; left unchanged apart from
    /// its embedded services
    AlreadyCurrent,
}

/// Migration logic for one credential type
///
/// Implementations treat every absent optional field as "nothing to
/// migrate"; only fields of an incompatible shape are errors.
pub trait CredentialTransformer: Send + Sync + fmt::Debug {
    /// Credential type this transformer handles
    fn credential_type(&self) -> CredentialType;

    /// Transformer name (for logs)
    fn name(&self) -> &'static str;

    /// Migrate one component located at `path`, in place
    ///
    /// # Errors
    /// Shape faults in the component.
    fn transform_component(&self, component: &mut Object, path: &str) -> Result<ComponentOutcome, TransformError>;

    /// Apply type-specific edits to one in-scope service located at `path`
    ///
    /// Runs before the general endpoint migration.
    ///
    /// # Errors
    /// Shape faults in the service.
    fn transform_service(&self, service: &mut Object, path: &str) -> Result<(), TransformError>;
}

/// Run the general migration over a `services` array embedded in a component
///
/// # Errors
/// `services` that is not an array of objects, or a general-migration fault.
pub fn migrate_embedded_services(
    general: &GeneralMigrator,
    component: &mut Object,
    path: &str,
) -> Result<(), TransformError> {
    let Some(services) = shape::optional_array_mut(component, "services", path)? else {
        return Ok(());
    };
    for (index, service) in services.iter_mut().enumerate() {
        let service_path = format!("{path}/services/{index}");
        let service = shape::as_object_mut(service, &service_path)?;
        general.migrate_service_parameters(service, &service_path)?;
    }
    Ok(())
}

/// Replace the version segment of a schema URL
///
/// Prefers the `/v/<from>/` form used by published schemas and falls back to
/// a bare `/<from>/` segment. Returns `None` when neither is present.
#[must_use]
pub fn bump_schema_version(url: &str, from: &str, to: &str) -> Option<String> {
    let versioned = format!("/v/{from}/");
    if url.contains(&versioned) {
        return Some(url.replace(&versioned, &format!("/v/{to}/")));
    }
    let bare = format!("/{from}/");
    url.contains(&bare).then(|| url.replace(&bare, &format!("/{to}/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::MigrationTarget;
    use serde_json::json;

    #[test]
    fn bump_prefers_versioned_segment() {
        assert_eq!(
            bump_schema_version("https://x/DigitalProductPassport/v/0.5.0/a.json", "0.5.0", "0.6.0").as_deref(),
            Some("https://x/DigitalProductPassport/v/0.6.0/a.json")
        );
        assert_eq!(
            bump_schema_version("https://x/traceabilityEvents/0.5.0/a.json", "0.5.0", "0.6.0").as_deref(),
            Some("https://x/traceabilityEvents/0.6.0/a.json")
        );
        assert_eq!(bump_schema_version("https://x/a.json", "0.5.0", "0.6.0"), None);
    }

    #[test]
    fn embedded_services_are_migrated() {
        let mut component = json!({
            "type": "EntryData",
            "services": [{"parameters": [{"storage": {"url": "old"}}]}]
        });
        let general = GeneralMigrator::new(&MigrationTarget::v0_6_0());
        migrate_embedded_services(&general, component.as_object_mut().unwrap(), "c").unwrap();
        assert_eq!(
            component["services"][0]["parameters"][0]["storage"]["url"],
            json!("http://localhost:3334/api/1.0.0/documents")
        );
    }
}
