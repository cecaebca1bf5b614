//! Digital Facility Record migration
//!
//! Component edits, in order, on the form's `data` and `schema`:
//!
//! 1. `@context` replaced with the target context
//! 2. `credentialSubject` split into `facility` (tagged `FacilityRecord`, then
//!    the subject's own types) and `conformityClaim`
//! 3. `otherIdentifier` renamed to `facilityAlsoKnownAs` on the issuer and the facility;
//!    facility aliases lose `type` and `idScheme`
//! 4. `operatedByParty` loses `type` and `idScheme`
//! 5. conformity claims and their criteria receive default fields
//! 6. `schema.url` set to the target schema
//! 7. `type`, `@context`, `issuer` dropped from `data`, then `credentialSubject` flattened into it
//!
//! Service edits on each parameter block:
//!
//! 8. `digitalFacilityRecord.context` set to the target service context
//! 9. every `renderTemplate` entry gets the target template and a single `type` key
//! 10. `vckit.issuer.otherIdentifier` renamed to `issuerAlsoKnownAs`
//!
//! A form whose schema is already the target schema, or carries no source
//! version, is reported as [`ComponentOutcome::AlreadyCurrent`] and left alone.

use crate::error::TransformError;
use crate::general::GeneralMigrator;
use crate::target::{FacilityRecordTarget, MigrationTarget};
use crate::transformer::{migrate_embedded_services, ComponentOutcome, CredentialTransformer};
use serde_json::{json, Value};
use untp_credential::component::form_props_mut;
use untp_credential::CredentialType;
use untp_object::{flatten_into, rename_key_preserving_order, shape, strip_fields, Object};

const IDENTIFIER_NOISE: &[&str] = &["type", "idScheme"];
const PAYLOAD_ENVELOPE: &[&str] = &["type", "@context", "issuer"];

/// Facility-record transformer
#[derive(Debug, Clone)]
pub struct FacilityRecordTransformer {
    source_version: String,
    target: FacilityRecordTarget,
    general: GeneralMigrator,
}

impl FacilityRecordTransformer {
    /// Create transformer for `target`
    #[must_use]
    pub fn new(target: &MigrationTarget) -> Self {
        Self {
            source_version: target.source_version.clone(),
            target: target.facility_record.clone(),
            general: GeneralMigrator::new(target),
        }
    }

    fn is_current(&self, schema_url: &str) -> bool {
        schema_url == self.target.schema_url || !schema_url.contains(&self.source_version)
    }

    fn restructure_payload(&self, data: &mut Object, path: &str) -> Result<(), TransformError> {
        data.insert("@context".to_owned(), json!(self.target.context));

        let subject_path = shape::join(path, "credentialSubject");
        let subject = data
            .entry("credentialSubject")
            .or_insert_with(|| Value::Object(Object::new()));
        let subject = shape::as_object_mut(subject, &subject_path)?;
        split_subject(subject);

        if let Some(issuer) = shape::optional_object_mut(data, "issuer", path)? {
            rename_key_preserving_order(issuer, "otherIdentifier", "facilityAlsoKnownAs");
        }

        let subject = shape::require_object_mut(data, "credentialSubject", path)?;
        let facility = shape::require_object_mut(subject, "facility", &subject_path)?;
        if let Some(aliases) = rename_key_preserving_order(facility, "otherIdentifier", "facilityAlsoKnownAs") {
            strip_fields(aliases, IDENTIFIER_NOISE);
        }
        if let Some(party) = facility.get_mut("operatedByParty") {
            strip_fields(party, IDENTIFIER_NOISE);
        }

        self.fill_conformity_claims(subject, &subject_path)
    }

    fn fill_conformity_claims(&self, subject: &mut Object, path: &str) -> Result<(), TransformError> {
        let defaults = &self.target.conformity;
        let claims_path = shape::join(path, "conformityClaim");
        let claims = shape::as_array_mut(
            shape::require_mut(subject, "conformityClaim", path)?,
            &claims_path,
        )?;
        for (index, claim) in claims.iter_mut().enumerate() {
            let claim_path = format!("{claims_path}/{index}");
            let claim = shape::as_object_mut(claim, &claim_path)?;
            if let Some(criteria) = shape::optional_array_mut(claim, "assessmentCriteria", &claim_path)? {
                for (position, criterion) in criteria.iter_mut().enumerate() {
                    let criterion_path = format!("{claim_path}/assessmentCriteria/{position}");
                    let criterion = shape::as_object_mut(criterion, &criterion_path)?;
                    criterion
                        .entry("description")
                        .or_insert_with(|| json!(defaults.description));
                    criterion
                        .entry("conformityTopic")
                        .or_insert_with(|| json!(defaults.topic));
                    criterion.entry("status").or_insert_with(|| json!(defaults.status));
                    criterion.entry("subCriterion").or_insert_with(|| json!([]));
                }
            }
            claim.insert("conformityTopic".to_owned(), json!(defaults.topic));
        }
        Ok(())
    }

    fn migrate_render_templates(&self, config: &mut Object, path: &str) -> Result<(), TransformError> {
        let Some(templates) = shape::optional_array_mut(config, "renderTemplate", path)? else {
            return Ok(());
        };
        for (index, entry) in templates.iter_mut().enumerate() {
            let entry = shape::as_object_mut(entry, &format!("{path}/renderTemplate/{index}"))?;
            entry.insert(
                "template".to_owned(),
                Value::String(self.target.render_template.clone()),
            );
            // Exactly one `type` key survives.
            if entry.contains_key("type") {
                entry.shift_remove("@type");
            } else {
                rename_key_preserving_order(entry, "@type", "type");
            }
        }
        Ok(())
    }
}

/// `{type, ..fields, conformityClaim}` → `{facility: {type: [FacilityRecord, ..type], ..fields}, conformityClaim}`
fn split_subject(subject: &mut Object) {
    let mut fields = std::mem::take(subject);
    let claims = fields
        .shift_remove("conformityClaim")
        .unwrap_or_else(|| json!([]));

    let existing = match fields.shift_remove("type") {
        Some(Value::Array(existing)) => existing,
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    };
    let mut types = vec![json!("FacilityRecord")];
    for entry in existing {
        if !types.contains(&entry) {
            types.push(entry);
        }
    }

    let mut facility = Object::new();
    facility.insert("type".to_owned(), Value::Array(types));
    facility.extend(fields);

    subject.insert("facility".to_owned(), Value::Object(facility));
    subject.insert("conformityClaim".to_owned(), claims);
}

impl CredentialTransformer for FacilityRecordTransformer {
    fn credential_type(&self) -> CredentialType {
        CredentialType::Dfr
    }

    fn name(&self) -> &'static str {
        "facility-record"
    }

    fn transform_component(&self, component: &mut Object, path: &str) -> Result<ComponentOutcome, TransformError> {
        migrate_embedded_services(&self.general, component, path)?;

        let (props, props_path) = form_props_mut(component, path)?;
        let schema_path = shape::join(&props_path, "schema");
        let schema_url = shape::require_str(
            shape::require_object(props, "schema", &props_path)?,
            "url",
            &schema_path,
        )?;
        if self.is_current(schema_url) {
            tracing::debug!(path, schema_url, "Facility record already current");
            return Ok(ComponentOutcome::AlreadyCurrent);
        }

        let data_path = shape::join(&props_path, "data");

        let data = shape::require_object_mut(props, "data", &props_path)?;
        self.restructure_payload(data, &data_path)?;

        let schema = shape::require_object_mut(props, "schema", &props_path)?;
        schema.insert("url".to_owned(), Value::String(self.target.schema_url.clone()));

        let data = shape::require_mut(props, "data", &props_path)?;
        strip_fields(data, PAYLOAD_ENVELOPE);
        flatten_into(shape::as_object_mut(data, &data_path)?, "credentialSubject")
            .map_err(|err| err.within(&data_path))?;

        tracing::debug!(path, "Facility record component migrated");
        Ok(ComponentOutcome::Migrated)
    }

    fn transform_service(&self, service: &mut Object, path: &str) -> Result<(), TransformError> {
        let Some(parameters) = shape::optional_array_mut(service, "parameters", path)? else {
            return Ok(());
        };
        for (index, parameter) in parameters.iter_mut().enumerate() {
            let parameter_path = format!("{path}/parameters/{index}");
            let parameter = shape::as_object_mut(parameter, &parameter_path)?;

            let config_path = shape::join(&parameter_path, "digitalFacilityRecord");
            if let Some(config) = shape::nullable_object_mut(parameter, "digitalFacilityRecord", &parameter_path)? {
                config.insert("context".to_owned(), json!(self.target.service_context));
                self.migrate_render_templates(config, &config_path)?;
            }

            if let Some(vckit) = shape::nullable_object_mut(parameter, "vckit", &parameter_path)? {
                // Issuer may be a bare DID string.
                if let Some(Value::Object(issuer)) = vckit.get_mut("issuer") {
                    rename_key_preserving_order(issuer, "otherIdentifier", "issuerAlsoKnownAs");
                }
            }
        }
        Ok(())
    }
}
