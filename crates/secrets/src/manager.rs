//! Secret resolution for whole sets of environment variables
//!
//! The manager runs every value through one [`OnePassword`] resolver, so
//! variables pointing into the same item share a single `op item get`.

use crate::onepassword::{OnePassword, OnePasswordConfig};
use opref_core::{EnvironmentVariables, Result, OP_URI_PREFIX};

/// Resolves the `op://` references found in environment variables
pub struct SecretManager {
    resolver: OnePassword,
}

impl SecretManager {
    /// Create a SecretManager that runs the real `op` CLI
    #[must_use]
    pub fn new(config: OnePasswordConfig) -> Self {
        Self::with_resolver(OnePassword::new(config))
    }

    /// Create a SecretManager with a custom resolver
    #[must_use]
    pub fn with_resolver(resolver: OnePassword) -> Self {
        Self { resolver }
    }

    /// Resolve all secret references in the given environment variables
    ///
    /// Values that are not `op://` references pass through unchanged. The
    /// first failing reference aborts the whole call; its error is returned
    /// as is. Variables keep their original order.
    pub fn resolve_secrets(&mut self, env_vars: EnvironmentVariables) -> Result<EnvironmentVariables> {
        let mut resolved_env = EnvironmentVariables::new();

        for (key, value) in env_vars {
            if !value.starts_with(OP_URI_PREFIX) {
                resolved_env.insert(key, value);
                continue;
            }

            match self.resolver.resolve_reference(&value) {
                Ok(secret) => {
                    tracing::debug!(key = %key, "Resolved secret");
                    resolved_env.insert(key, secret);
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Failed to resolve secret");
                    return Err(e);
                }
            }
        }

        Ok(resolved_env)
    }
}
