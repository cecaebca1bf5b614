//! Config walker
//!
//! One pass over the document, feature by feature:
//!
//! ```text
//! Loaded → Walking(App) → Walking(Feature)
//!        → ClassifyingComponents → DispatchingComponents
//!        → FilteringServices → DispatchingServices → … → Done
//! ```
//!
//! Components are classified and transformed in document order. The
//! feature's effective type then selects the transformer for its in-scope
//! services; each such service gets the type-specific edits first and the
//! general endpoint migration second.

use crate::error::{Location, MigrationError};
use crate::options::MigrationOptions;
use crate::report::{FeatureOutcome, FeatureReport, MigrationReport, MigrationWarning};
use serde_json::Value;
use untp_credential::component::label;
use untp_credential::{
    classify_feature, ClassifyError, ConfigDocument, CredentialClassifier, CredentialType,
    FeatureClassification, FeatureLocation,
};
use untp_object::{shape, Object};
use untp_transform::{
    ComponentOutcome, CredentialTransformer, GeneralMigrator, MigrationTarget, TransformerRegistry,
};

/// Whole-document migrator
#[derive(Debug)]
pub struct Migrator {
    classifier: CredentialClassifier,
    registry: TransformerRegistry,
    general: GeneralMigrator,
    options: MigrationOptions,
    source_version: String,
    version: String,
}

impl Migrator {
    /// Create migrator with the default classifier and transformers for `target`
    #[must_use]
    pub fn new(target: &MigrationTarget) -> Self {
        Self {
            classifier: CredentialClassifier::with_defaults(),
            registry: TransformerRegistry::with_defaults(target),
            general: GeneralMigrator::new(target),
            options: MigrationOptions::default(),
            source_version: target.source_version.clone(),
            version: target.version.clone(),
        }
    }

    /// With walk options
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: MigrationOptions) -> Self {
        self.options = options;
        self
    }

    /// With classifier
    #[inline]
    #[must_use]
    pub fn with_classifier(mut self, classifier: CredentialClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// With transformer registry
    #[inline]
    #[must_use]
    pub fn with_registry(mut self, registry: TransformerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Classifier in use
    #[inline]
    #[must_use]
    pub fn classifier(&self) -> &CredentialClassifier {
        &self.classifier
    }

    /// Walk options in use
    #[inline]
    #[must_use]
    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    /// Migrate `document`
    ///
    /// The document is consumed: on error it is dropped, so a partially
    /// migrated tree never reaches the caller.
    ///
    /// # Errors
    /// Malformed shapes, unclassifiable components and credential types
    /// without a registered transformer.
    pub fn migrate(&self, mut document: ConfigDocument) -> Result<(ConfigDocument, MigrationReport), MigrationError> {
        let mut report = MigrationReport {
            source_version: self.source_version.clone(),
            target_version: self.version.clone(),
            apps: document.app_count(),
            ..MigrationReport::default()
        };

        document.visit_features_mut(|location, feature| {
            let entry = self.migrate_feature(&location, feature, &mut report.warnings)?;
            report.features.push(entry);
            Ok::<(), MigrationError>(())
        })?;

        tracing::info!(
            features = report.features.len(),
            migrated = report.migrated_features(),
            components = report.components_transformed(),
            services = report.services_transformed(),
            warnings = report.warnings.len(),
            "Migration complete"
        );
        Ok((document, report))
    }

    /// Classify every feature without changing the document
    ///
    /// # Errors
    /// Malformed shapes above or inside a feature's components.
    pub fn classify(&self, document: &ConfigDocument) -> Result<Vec<(FeatureLocation, FeatureClassification)>, MigrationError> {
        document
            .features()?
            .into_iter()
            .map(|(location, feature)| {
                let classification = classify_feature(
                    &self.classifier,
                    self.options.feature_type_policy,
                    feature,
                    &location.path(),
                )
                .map_err(|source| MigrationError::Classify {
                    feature: location.clone(),
                    source,
                })?;
                Ok((location, classification))
            })
            .collect()
    }

    fn migrate_feature(
        &self,
        location: &FeatureLocation,
        feature: &mut Object,
        warnings: &mut Vec<MigrationWarning>,
    ) -> Result<FeatureReport, MigrationError> {
        let feature_path = location.path();
        let (effective, components) = self.migrate_components(location, feature, &feature_path, warnings)?;

        let Some(credential_type) = effective else {
            tracing::warn!(feature = %location, "No valid credential type found; services skipped");
            return Ok(FeatureReport {
                location: location.clone(),
                outcome: FeatureOutcome::NoCredentialType,
                components,
                services: 0,
            });
        };

        let transformer = self
            .registry
            .resolve(credential_type)
            .map_err(|source| MigrationError::Dispatch {
                feature: location.clone(),
                source,
            })?;
        let services = self.migrate_services(location, feature, &feature_path, transformer)?;

        tracing::debug!(feature = %location, %credential_type, components, services, "Feature migrated");
        Ok(FeatureReport {
            location: location.clone(),
            outcome: FeatureOutcome::Migrated { credential_type },
            components,
            services,
        })
    }

    fn migrate_components(
        &self,
        location: &FeatureLocation,
        feature: &mut Object,
        feature_path: &str,
        warnings: &mut Vec<MigrationWarning>,
    ) -> Result<(Option<CredentialType>, usize), MigrationError> {
        let Some(components) = shape::optional_array_mut(feature, "components", feature_path)? else {
            return Ok((None, 0));
        };

        let mut effective = None;
        let mut transformed = 0;

        for (index, component) in components.iter_mut().enumerate() {
            let path = format!("{feature_path}/components/{index}");
            let found = match self.classifier.classify(component, &path) {
                Ok(Some(found)) => found,
                Ok(None) => continue,
                Err(ClassifyError::MultipleNestedComponents { found }) => {
                    let warning = MigrationWarning::MultipleNestedComponents {
                        feature: location.clone(),
                        component: index,
                        found,
                    };
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                    continue;
                }
                Err(source) => {
                    return Err(MigrationError::Classify {
                        feature: location.clone(),
                        source,
                    })
                }
            };

            // Only objects classify.
            let Value::Object(component) = component else {
                continue;
            };
            let component_label = label(component);
            let fault = |source| MigrationError::Component {
                location: Location::component(location, index, component_label.clone()),
                source,
            };
            let transformer = self.registry.resolve(found).map_err(fault)?;
            match transformer.transform_component(component, &path).map_err(fault)? {
                ComponentOutcome::Migrated => {
                    tracing::debug!(component = %component_label, %found, transformer = transformer.name(), "Component migrated");
                    transformed += 1;
                }
                ComponentOutcome::AlreadyCurrent => {
                    let warning = MigrationWarning::AlreadyMigrated {
                        feature: location.clone(),
                        component: index,
                        credential_type: found,
                    };
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                }
            }
            effective = Some(self.options.feature_type_policy.merge(effective, found));
        }
        Ok((effective, transformed))
    }

    fn migrate_services(
        &self,
        location: &FeatureLocation,
        feature: &mut Object,
        feature_path: &str,
        transformer: &dyn CredentialTransformer,
    ) -> Result<usize, MigrationError> {
        let Some(services) = shape::optional_array_mut(feature, "services", feature_path)? else {
            return Ok(0);
        };

        let mut transformed = 0;
        for (index, service) in services.iter_mut().enumerate() {
            let Value::Object(service) = service else {
                continue;
            };
            let Some(name) = service.get("name").and_then(Value::as_str).map(str::to_owned) else {
                continue;
            };
            if !self.options.is_in_scope(&name) {
                tracing::trace!(service = %name, "Service out of scope");
                continue;
            }

            let path = format!("{feature_path}/services/{index}");
            let fault = |source| MigrationError::Service {
                location: Location::service(location, index, &name),
                source,
            };
            transformer.transform_service(service, &path).map_err(fault)?;
            self.general
                .migrate_service_parameters(service, &path)
                .map_err(fault)?;
            tracing::debug!(service = %name, "Service migrated");
            transformed += 1;
        }
        Ok(transformed)
    }
}
