//! Orchestrator options

use untp_credential::FeatureTypePolicy;

/// Service-name prefix in scope by default
pub const DEFAULT_SERVICE_PREFIX: &str = "process";

/// Walk options independent of the target version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Services whose `name` starts with one of these are migrated
    pub service_prefixes: Vec<String>,
    /// How a feature's components settle its credential type
    pub feature_type_policy: FeatureTypePolicy,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            service_prefixes: vec![DEFAULT_SERVICE_PREFIX.to_owned()],
            feature_type_policy: FeatureTypePolicy::LastWins,
        }
    }
}

impl MigrationOptions {
    /// With service prefixes; an empty list keeps the default
    #[must_use]
    pub fn with_service_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        if !prefixes.is_empty() {
            self.service_prefixes = prefixes;
        }
        self
    }

    /// With feature type policy
    #[inline]
    #[must_use]
    pub fn with_feature_type_policy(mut self, policy: FeatureTypePolicy) -> Self {
        self.feature_type_policy = policy;
        self
    }

    /// Whether a service called `name` is in scope
    #[must_use]
    pub fn is_in_scope(&self, name: &str) -> bool {
        self.service_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scope_is_process_services() {
        let options = MigrationOptions::default();
        assert!(options.is_in_scope("processDFR"));
        assert!(!options.is_in_scope("fetchDFR"));
        assert_eq!(options.feature_type_policy, FeatureTypePolicy::LastWins);
    }

    #[test]
    fn custom_prefixes_replace_default() {
        let options = MigrationOptions::default().with_service_prefixes(["issue", "merge"]);
        assert!(options.is_in_scope("issueDTE"));
        assert!(!options.is_in_scope("processDTE"));

        let unchanged = MigrationOptions::default().with_service_prefixes(Vec::<String>::new());
        assert_eq!(unchanged, MigrationOptions::default());
    }
}
