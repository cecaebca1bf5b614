//! Feature extraction for targeted testing

use crate::error::MigrationError;
use serde_json::Value;
use untp_credential::{
    classify_feature, ConfigDocument, CredentialClassifier, CredentialType, FeatureTypePolicy,
};

/// Copies of every feature whose effective type is `credential_type`
///
/// Each copy's `name` gets a ` <n>` suffix, `n` counting matches from 1
/// across the whole document so same-named features stay distinct. A
/// feature without a string `name` is copied as is but still counted.
///
/// # Errors
/// Malformed document or component shapes.
pub fn extract_features(
    document: &ConfigDocument,
    credential_type: CredentialType,
    classifier: &CredentialClassifier,
    policy: FeatureTypePolicy,
) -> Result<Vec<Value>, MigrationError> {
    let mut extracted = Vec::new();
    for (location, feature) in document.features()? {
        let classification = classify_feature(classifier, policy, feature, &location.path())
            .map_err(|source| MigrationError::Classify {
                feature: location.clone(),
                source,
            })?;
        for (component, err) in &classification.skipped {
            tracing::warn!(feature = %location, component, "{err}");
        }
        if classification.credential_type != Some(credential_type) {
            continue;
        }

        let sequence = extracted.len() + 1;
        let mut copy = feature.clone();
        if let Some(Value::String(name)) = copy.get_mut("name") {
            *name = format!("{name} {sequence}");
        }
        tracing::debug!(feature = %location, sequence, "Feature extracted");
        extracted.push(Value::Object(copy));
    }
    tracing::info!(%credential_type, count = extracted.len(), "Extraction complete");
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use untp_test_utils::{document, entry_data, feature, DFR_SCHEMA_URL, DTE_SCHEMA_URL};

    fn extract(value: Value, credential_type: CredentialType) -> Vec<Value> {
        extract_features(
            &ConfigDocument::from_value(value).unwrap(),
            credential_type,
            &CredentialClassifier::with_defaults(),
            FeatureTypePolicy::LastWins,
        )
        .unwrap()
    }

    #[test]
    fn numbers_matches_across_document() {
        let input = json!({
            "apps": [
                {"features": [
                    feature("Issue", vec![entry_data("F", DFR_SCHEMA_URL)], vec![]),
                    feature("Event", vec![entry_data("F", DTE_SCHEMA_URL)], vec![])
                ]},
                {"features": [
                    feature("Issue", vec![entry_data("F", DFR_SCHEMA_URL)], vec![])
                ]}
            ]
        });
        let names: Vec<Value> = extract(input, CredentialType::Dfr)
            .into_iter()
            .map(|feature| feature["name"].clone())
            .collect();
        assert_eq!(names, [json!("Issue 1"), json!("Issue 2")]);
    }

    #[test]
    fn source_document_is_unchanged() {
        let input = document(vec![feature("Event", vec![entry_data("F", DTE_SCHEMA_URL)], vec![])]);
        let document = ConfigDocument::from_value(input.clone()).unwrap();
        let extracted = extract_features(
            &document,
            CredentialType::Dte,
            &CredentialClassifier::with_defaults(),
            FeatureTypePolicy::FirstWins,
        )
        .unwrap();

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0]["components"], input["apps"][0]["features"][0]["components"]);
        assert_eq!(document.as_value(), &input);
    }

    #[test]
    fn no_matches() {
        let input = document(vec![feature("Event", vec![entry_data("F", DTE_SCHEMA_URL)], vec![])]);
        assert!(extract(input, CredentialType::Dpp).is_empty());
    }
}
