//! Draft migration for credential types without dedicated edits
//!
//! Used for product passports and conformity credentials: the schema
//! reference is bumped and the payload loses its credential envelope, with
//! `credentialSubject` merged up into `data`.

use crate::error::TransformError;
use crate::general::GeneralMigrator;
use crate::target::MigrationTarget;
use crate::traceability_event::bump_form_schema;
use crate::transformer::{migrate_embedded_services, ComponentOutcome, CredentialTransformer};
use untp_credential::component::form_props_mut;
use untp_credential::CredentialType;
use untp_object::{flatten_into, shape, strip_fields, Object};

const PAYLOAD_ENVELOPE: &[&str] = &["type", "@context", "issuer"];

/// Schema-bump transformer for one credential type
#[derive(Debug, Clone)]
pub struct SchemaBumpTransformer {
    credential_type: CredentialType,
    source_version: String,
    version: String,
    general: GeneralMigrator,
}

impl SchemaBumpTransformer {
    /// Create transformer handling `credential_type`
    #[must_use]
    pub fn new(credential_type: CredentialType, target: &MigrationTarget) -> Self {
        Self {
            credential_type,
            source_version: target.source_version.clone(),
            version: target.version.clone(),
            general: GeneralMigrator::new(target),
        }
    }
}

impl CredentialTransformer for SchemaBumpTransformer {
    fn credential_type(&self) -> CredentialType {
        self.credential_type
    }

    fn name(&self) -> &'static str {
        "schema-bump"
    }

    fn transform_component(&self, component: &mut Object, path: &str) -> Result<ComponentOutcome, TransformError> {
        migrate_embedded_services(&self.general, component, path)?;
        let (props, props_path) = form_props_mut(component, path)?;
        bump_form_schema(props, &props_path, &self.source_version, &self.version)?;

        let data_path = shape::join(&props_path, "data");
        let Some(data) = props.get_mut("data") else {
            return Ok(ComponentOutcome::Migrated);
        };
        strip_fields(data, PAYLOAD_ENVELOPE);
        flatten_into(shape::as_object_mut(data, &data_path)?, "credentialSubject")
            .map_err(|err| err.within(&data_path))?;
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
    use untp_test_utils::{entry_data, DPP_SCHEMA_URL};

    #[test]
    fn draft_product_passport() {
        let mut component = entry_data("JsonForm", DPP_SCHEMA_URL);
        component["props"]["data"] = json!({
            "@context": ["https://www.w3.org/ns/credentials/v2"],
            "type": ["DigitalProductPassport"],
            "id": "urn:dpp:1",
            "issuer": {"id": "did:web:x"},
            "credentialSubject": {"product": {"name": "Ore"}}
        });
        let transformer = SchemaBumpTransformer::new(CredentialType::Dpp, &MigrationTarget::v0_6_0());
        transformer
            .transform_component(component.as_object_mut().unwrap(), "components/0")
            .unwrap();

        assert_eq!(transformer.credential_type(), CredentialType::Dpp);
        assert!(component["props"]["schema"]["url"]
            .as_str()
            .unwrap()
            .contains("/DigitalProductPassport/v/0.6.0/"));
        assert_eq!(
            component["props"]["data"],
            json!({"id": "urn:dpp:1", "product": {"name": "Ore"}})
        );
    }

    #[test]
    fn non_object_data_is_fatal() {
        let mut component = entry_data("JsonForm", DPP_SCHEMA_URL);
        component["props"]["data"] = json!("raw");
        let err = SchemaBumpTransformer::new(CredentialType::Dcc, &MigrationTarget::v0_6_0())
            .transform_component(component.as_object_mut().unwrap(), "c")
            .unwrap_err();
        assert!(err.to_string().contains("c/props/data"));
    }
}
