//! Dispatch through the default registry

use pretty_assertions::assert_eq;
use serde_json::json;
use untp_credential::{CredentialClassifier, CredentialType};
use untp_test_utils::{dfr_component, local_storage_loader, nested_form, process_service, DFR_SCHEMA_URL};
use untp_transform::{MigrationTarget, TransformError, TransformerRegistry};

#[test]
fn classified_component_and_service_migrate() {
    let target = MigrationTarget::v0_6_0();
    let registry = TransformerRegistry::with_defaults(&target);
    let classifier = CredentialClassifier::with_defaults();

    let mut component = dfr_component();
    let credential_type = classifier.classify(&component, "components/0").unwrap().unwrap();
    let transformer = registry.resolve(credential_type).unwrap();
    transformer
        .transform_component(component.as_object_mut().unwrap(), "components/0")
        .unwrap();

    let data = component["props"]["data"].as_object().unwrap();
    assert_eq!(data["facility"]["facilityAlsoKnownAs"], json!([{"id": "y"}]));
    assert!(!data.contains_key("credentialSubject"));

    let mut service = process_service("processDFR");
    transformer
        .transform_service(service.as_object_mut().unwrap(), "services/0")
        .unwrap();
    assert_eq!(
        service["parameters"][0]["digitalFacilityRecord"]["renderTemplate"][0]["template"],
        json!(target.facility_record.render_template)
    );
}

#[test]
fn embedded_services_follow_general_migration() {
    let registry = TransformerRegistry::with_defaults(&MigrationTarget::v0_6_0());
    let mut form = nested_form(DFR_SCHEMA_URL);
    form["props"]["data"] = untp_test_utils::dfr_data();
    let mut component = local_storage_loader(vec![form]);
    component["services"] = json!([{"parameters": [{"dlr": {"dlrAPIUrl": "http://old"}}]}]);

    registry
        .resolve(CredentialType::Dfr)
        .unwrap()
        .transform_component(component.as_object_mut().unwrap(), "components/0")
        .unwrap();
    assert_eq!(
        component["services"][0]["parameters"][0]["dlr"]["dlrAPIUrl"],
        json!("http://localhost:3000/api/1.0.0")
    );
}

#[test]
fn loader_with_two_forms_cannot_be_transformed() {
    let registry = TransformerRegistry::with_defaults(&MigrationTarget::v0_6_0());
    let mut component = local_storage_loader(vec![nested_form(DFR_SCHEMA_URL), nested_form(DFR_SCHEMA_URL)]);
    let err = registry
        .resolve(CredentialType::Dfr)
        .unwrap()
        .transform_component(component.as_object_mut().unwrap(), "components/0")
        .unwrap_err();
    assert!(matches!(err, TransformError::Form(_)));
}
