//! Digital Traceability Event migration
//!
//! Only the form's schema reference moves to the target version; event
//! payloads and services carry no version-specific fields.

use crate::error::TransformError;
use crate::general::GeneralMigrator;
use crate::target::MigrationTarget;
use crate::transformer::{
    bump_schema_version, migrate_embedded_services, ComponentOutcome, CredentialTransformer,
};
use serde_json::Value;
use untp_credential::component::form_props_mut;
use untp_credential::CredentialType;
use untp_object::{shape, Object};

/// Traceability-event transformer
#[derive(Debug, Clone)]
pub struct TraceabilityEventTransformer {
    source_version: String,
    version: String,
    general: GeneralMigrator,
}

impl TraceabilityEventTransformer {
    /// Create transformer for `target`
    #[must_use]
    pub fn new(target: &MigrationTarget) -> Self {
        Self {
            source_version: target.source_version.clone(),
            version: target.version.clone(),
            general: GeneralMigrator::new(target),
        }
    }
}

/// Bump `schema.url` of the form props at `props_path`, if versioned
pub(crate) fn bump_form_schema(
    props: &mut Object,
    props_path: &str,
    from: &str,
    to: &str,
) -> Result<(), TransformError> {
    let schema_path = shape::join(props_path, "schema");
    let schema = shape::require_object_mut(props, "schema", props_path)?;
    let url = shape::require_str(schema, "url", &schema_path)?;
    match bump_schema_version(url, from, to) {
        Some(bumped) => {
            schema.insert("url".to_owned(), Value::String(bumped));
        }
        None => tracing::debug!(path = %schema_path, url, "Schema URL carries no source version"),
    }
    Ok(())
}

impl CredentialTransformer for TraceabilityEventTransformer {
    fn credential_type(&self) -> CredentialType {
        CredentialType::Dte
    }

    fn name(&self) -> &'static str {
        "traceability-event"
    }

    fn transform_component(&self, component: &mut Object, path: &str) -> Result<ComponentOutcome, TransformError> {
        migrate_embedded_services(&self.general, component, path)?;
        let (props, props_path) = form_props_mut(component, path)?;
        bump_form_schema(props, &props_path, &self.source_version, &self.version)?;
        Ok(ComponentOutcome::Migrated)
    }

    fn transform_service(&self, _service: &mut Object, _path: &str) -> Result<(), TransformError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use untp_test_utils::{entry_data, local_storage_loader, nested_form, process_service, DTE_SCHEMA_URL};

    fn transformer() -> TraceabilityEventTransformer {
        TraceabilityEventTransformer::new(&MigrationTarget::v0_6_0())
    }

    #[test]
    fn bumps_schema_and_keeps_payload() {
        let mut component = entry_data("JsonForm", DTE_SCHEMA_URL);
        component["props"]["data"] = json!({"type": ["TransformationEvent"], "eventID": "e-1"});
        transformer()
            .transform_component(component.as_object_mut().unwrap(), "components/0")
            .unwrap();

        assert_eq!(
            component["props"]["schema"]["url"],
            json!("https://test.uncefact.org/vocabulary/untp/traceabilityEvents/v/0.6.0/schema.json")
        );
        assert_eq!(
            component["props"]["data"],
            json!({"type": ["TransformationEvent"], "eventID": "e-1"})
        );
    }

    #[test]
    fn loader_bumps_nested_form() {
        let mut component = local_storage_loader(vec![nested_form(DTE_SCHEMA_URL)]);
        transformer()
            .transform_component(component.as_object_mut().unwrap(), "components/2")
            .unwrap();
        let url = component["props"]["nestedComponents"][0]["props"]["schema"]["url"]
            .as_str()
            .unwrap();
        assert!(url.contains("/v/0.6.0/"));
    }

    #[test]
    fn unversioned_url_is_untouched() {
        let mut component = entry_data("JsonForm", "https://example.com/traceabilityEvents/schema.json");
        let before = component.clone();
        transformer()
            .transform_component(component.as_object_mut().unwrap(), "c")
            .unwrap();
        assert_eq!(component, before);
    }

    #[test]
    fn services_pass_through() {
        let mut service = process_service("processDTE");
        let before = service.clone();
        transformer()
            .transform_service(service.as_object_mut().unwrap(), "services/0")
            .unwrap();
        assert_eq!(service, before);
    }
}
