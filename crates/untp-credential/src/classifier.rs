//! Credential classifier
//!
//! Maps a component's schema reference to a [`CredentialType`] by substring
//! rules evaluated in order. The first matching rule wins; no match means the
//! component is unknown and left alone.

use crate::component::{is_entry_data, schema_reference};
use crate::credential_type::CredentialType;
use crate::error::ClassifyError;
use serde_json::Value;
use untp_object::{shape, Object};

/// One `(substring, type)` classification rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    /// Substring searched for in the schema reference
    pub needle: String,
    /// Type assigned on match
    pub credential_type: CredentialType,
}

impl ClassificationRule {
    /// Create new rule
    #[inline]
    #[must_use]
    pub fn new(needle: impl Into<String>, credential_type: CredentialType) -> Self {
        Self {
            needle: needle.into(),
            credential_type,
        }
    }

    /// Whether `reference` matches this rule
    #[inline]
    #[must_use]
    pub fn matches(&self, reference: &str) -> bool {
        reference.contains(self.needle.as_str())
    }
}

/// Ordered rule list over schema references
#[derive(Debug, Clone, Default)]
pub struct CredentialClassifier {
    rules: Vec<ClassificationRule>,
}

impl CredentialClassifier {
    /// Create classifier with the given rules, in priority order
    #[inline]
    #[must_use]
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// Create classifier with the built-in rules
    ///
    /// Order: facility record, traceability event (both spellings), product
    /// passport, conformity credential. Identity anchors have no default rule.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(vec![
            ClassificationRule::new("DigitalFacilityRecord", CredentialType::Dfr),
            ClassificationRule::new("traceabilityEvents", CredentialType::Dte),
            ClassificationRule::new("DigitalTraceabilityEvent", CredentialType::Dte),
            ClassificationRule::new("DigitalProductPassport", CredentialType::Dpp),
            ClassificationRule::new("DigitalConformityCredential", CredentialType::Dcc),
        ])
    }

    /// Append a lowest-priority rule
    #[must_use]
    pub fn with_rule(mut self, rule: ClassificationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in priority order
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Type of the first rule matching `reference`
    #[must_use]
    pub fn match_reference(&self, reference: &str) -> Option<CredentialType> {
        self.rules
            .iter()
            .find(|rule| rule.matches(reference))
            .map(|rule| rule.credential_type)
    }

    /// Classify one component located at `path`
    ///
    /// Non-`EntryData` components (and non-object values) are `Ok(None)`.
    ///
    /// # Errors
    /// [`ClassifyError::MultipleNestedComponents`] for a loader without
    /// exactly one nested component; [`ClassifyError::Shape`] when the schema
    /// reference is missing or mistyped.
    pub fn classify(&self, component: &Value, path: &str) -> Result<Option<CredentialType>, ClassifyError> {
        let Some(component) = component.as_object() else {
            return Ok(None);
        };
        self.classify_object(component, path)
    }

    /// As [`classify`](Self::classify) on an object
    ///
    /// # Errors
    /// As [`classify`](Self::classify).
    pub fn classify_object(
        &self,
        component: &Object,
        path: &str,
    ) -> Result<Option<CredentialType>, ClassifyError> {
        if !is_entry_data(component) {
            return Ok(None);
        }
        let reference = schema_reference(component, path)?;
        Ok(self.match_reference(reference))
    }
}

/// How a feature's effective type is chosen among its classified components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureTypePolicy {
    /// Later classified components override earlier ones
    #[default]
    LastWins,
    /// The first classified component fixes the type
    FirstWins,
}

impl FeatureTypePolicy {
    /// Fold a newly classified type into the current effective type
    #[inline]
    #[must_use]
    pub fn merge(self, current: Option<CredentialType>, next: CredentialType) -> CredentialType {
        match (self, current) {
            (Self::FirstWins, Some(existing)) => existing,
            _ => next,
        }
    }
}

/// Effective type of one feature plus the components that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureClassification {
    /// Effective credential type, if any component classified
    pub credential_type: Option<CredentialType>,
    /// `(component index, error)` for reported, non-fatal skips
    pub skipped: Vec<(usize, ClassifyError)>,
}

/// Classify every component of `feature` without modifying it
///
/// # Errors
/// Fatal shape faults only; nested-component mismatches are collected in
/// [`FeatureClassification::skipped`].
pub fn classify_feature(
    classifier: &CredentialClassifier,
    policy: FeatureTypePolicy,
    feature: &Object,
    path: &str,
) -> Result<FeatureClassification, ClassifyError> {
    let mut outcome = FeatureClassification::default();
    let components_path = shape::join(path, "components");
    let Some(components) = shape::optional_array(feature, "components", path)? else {
        return Ok(outcome);
    };
    for (index, component) in components.iter().enumerate() {
        let component_path = format!("{components_path}/{index}");
        match classifier.classify(component, &component_path) {
            Ok(Some(found)) => {
                outcome.credential_type = Some(policy.merge(outcome.credential_type, found));
            }
            Ok(None) => {}
            Err(err) if err.is_recoverable() => outcome.skipped.push((index, err)),
            Err(err) => return Err(err),
        }
    }
    Ok(outcome)
}
