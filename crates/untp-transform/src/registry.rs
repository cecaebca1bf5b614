//! Transformer registry
//!
//! Provides [`TransformerRegistry`], the credential-type → transformer table
//! consulted for every classified component.

use crate::error::TransformError;
use crate::facility_record::FacilityRecordTransformer;
use crate::schema_bump::SchemaBumpTransformer;
use crate::target::MigrationTarget;
use crate::traceability_event::TraceabilityEventTransformer;
use crate::transformer::CredentialTransformer;
use std::collections::BTreeMap;
use untp_credential::CredentialType;

/// Registry of transformers keyed by credential type
///
/// At most one transformer per type; registering again replaces it.
#[derive(Debug, Default)]
pub struct TransformerRegistry {
    transformers: BTreeMap<CredentialType, Box<dyn CredentialTransformer>>,
}

impl TransformerRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            transformers: BTreeMap::new(),
        }
    }

    /// Create registry with the built-in transformers for `target`
    ///
    /// DFR, DTE, DPP and DCC; DIA is left unregistered.
    #[must_use]
    pub fn with_defaults(target: &MigrationTarget) -> Self {
        let mut registry = Self::new();
        registry.register(FacilityRecordTransformer::new(target));
        registry.register(TraceabilityEventTransformer::new(target));
        registry.register(SchemaBumpTransformer::new(CredentialType::Dpp, target));
        registry.register(SchemaBumpTransformer::new(CredentialType::Dcc, target));
        registry
    }

    /// Register a transformer under its own credential type
    ///
    /// Returns the transformer it replaced, if any.
    pub fn register<T>(&mut self, transformer: T) -> Option<Box<dyn CredentialTransformer>>
    where
        T: CredentialTransformer + 'static,
    {
        self.transformers
            .insert(transformer.credential_type(), Box::new(transformer))
    }

    /// Transformer for `credential_type`
    ///
    /// # Errors
    /// [`TransformError::UnsupportedCredentialType`] when none is registered.
    pub fn resolve(&self, credential_type: CredentialType) -> Result<&dyn CredentialTransformer, TransformError> {
        self.transformers
            .get(&credential_type)
            .map(Box::as_ref)
            .ok_or(TransformError::UnsupportedCredentialType(credential_type))
    }

    /// Check if a transformer is registered for `credential_type`
    #[inline]
    #[must_use]
    pub fn contains(&self, credential_type: CredentialType) -> bool {
        self.transformers.contains_key(&credential_type)
    }

    /// Registered credential types, in tag order
    #[must_use]
    pub fn types(&self) -> Vec<CredentialType> {
        self.transformers.keys().copied().collect()
    }

    /// Get number of registered transformers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_new_empty() {
        let registry = TransformerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_with_defaults() {
        let registry = TransformerRegistry::with_defaults(&MigrationTarget::v0_6_0());
        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.types(),
            [CredentialType::Dfr, CredentialType::Dte, CredentialType::Dpp, CredentialType::Dcc]
        );
        assert!(!registry.contains(CredentialType::Dia));
        assert_eq!(registry.resolve(CredentialType::Dfr).unwrap().name(), "facility-record");
        assert_eq!(registry.resolve(CredentialType::Dcc).unwrap().name(), "schema-bump");
    }

    #[test]
    fn registry_resolve_unsupported() {
        let registry = TransformerRegistry::with_defaults(&MigrationTarget::v0_6_0());
        let err = registry.resolve(CredentialType::Dia).unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedCredentialType(CredentialType::Dia)));
        assert_eq!(err.to_string(), "no transformer registered for credential type DIA");
    }

    #[test]
    fn registry_register_replaces() {
        let target = MigrationTarget::v0_6_0();
        let mut registry = TransformerRegistry::with_defaults(&target);
        let replaced = registry.register(SchemaBumpTransformer::new(CredentialType::Dfr, &target));
        assert_eq!(replaced.map(|t| t.name()), Some("facility-record"));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.resolve(CredentialType::Dfr).unwrap().name(), "schema-bump");
    }

    #[test]
    fn registry_register_extra_type() {
        let target = MigrationTarget::v0_6_0();
        let mut registry = TransformerRegistry::new();
        assert!(registry.register(SchemaBumpTransformer::new(CredentialType::Dia, &target)).is_none());
        assert!(registry.contains(CredentialType::Dia));
    }
}
