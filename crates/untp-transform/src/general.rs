//! General (credential-type-independent) service migration

use crate::error::TransformError;
use crate::target::{EndpointPolicy, EndpointTargets, MigrationTarget};
use serde_json::Value;
use untp_object::{shape, Object};

/// Rewrites shared endpoints on every parameter block of a service
///
/// - `storage.url` → storage endpoint
/// - `dlr.dlrAPIUrl` → identity-resolver endpoint
/// - `dlr.linkRegisterPath` → link-register path
#[derive(Debug, Clone)]
pub struct GeneralMigrator {
    endpoints: EndpointTargets,
    policy: EndpointPolicy,
}

impl GeneralMigrator {
    /// Create migrator for `target`
    #[must_use]
    pub fn new(target: &MigrationTarget) -> Self {
        Self {
            endpoints: target.endpoints.clone(),
            policy: target.endpoint_policy,
        }
    }

    /// Migrate the `parameters` of one service located at `path`
    ///
    /// Idempotent. A service without `parameters`, or a block whose
    /// `storage`/`dlr` is absent or `null`, is left unchanged.
    ///
    /// # Errors
    /// `parameters` that is not an array of objects, or `storage`/`dlr`
    /// that is not an object.
    pub fn migrate_service_parameters(&self, service: &mut Object, path: &str) -> Result<(), TransformError> {
        let Some(parameters) = shape::optional_array_mut(service, "parameters", path)? else {
            return Ok(());
        };
        for (index, parameter) in parameters.iter_mut().enumerate() {
            let parameter_path = format!("{path}/parameters/{index}");
            let parameter = shape::as_object_mut(parameter, &parameter_path)?;

            if let Some(storage) = shape::nullable_object_mut(parameter, "storage", &parameter_path)? {
                self.write(storage, "url", &self.endpoints.storage_url);
            }
            if let Some(dlr) = shape::nullable_object_mut(parameter, "dlr", &parameter_path)? {
                self.write(dlr, "dlrAPIUrl", &self.endpoints.dlr_api_url);
                self.write(dlr, "linkRegisterPath", &self.endpoints.link_register_path);
            }
        }
        Ok(())
    }

    fn write(&self, block: &mut Object, key: &str, literal: &str) {
        if self.policy == EndpointPolicy::PreserveCurrent {
            if let Some(Value::String(current)) = block.get(key) {
                if current.contains(literal) {
                    return;
                }
            }
        }
        block.insert(key.to_owned(), Value::String(literal.to_owned()));
    }
}
