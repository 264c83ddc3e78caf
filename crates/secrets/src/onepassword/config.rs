//! Construction-time settings for the 1Password resolver.

use opref_core::{OP_BINARY, OP_SERVICE_ACCOUNT_TOKEN_VAR};
use opref_utils::RetryConfig;
use std::fmt;

/// Settings for talking to the `op` CLI
#[derive(Clone)]
pub struct OnePasswordConfig {
    /// Binary name (looked up on `PATH`) or path to the CLI
    pub binary: String,
    /// Environment variable the service account token is handed over in
    pub token_env: String,
    /// Service account token for the child process, if any
    pub service_account_token: Option<String>,
    /// Account shorthand, sign-in address or id passed as `--account`
    pub account: Option<String>,
    pub retry: RetryConfig,
}

impl Default for OnePasswordConfig {
    fn default() -> Self {
        Self {
            binary: OP_BINARY.to_string(),
            token_env: OP_SERVICE_ACCOUNT_TOKEN_VAR.to_string(),
            service_account_token: None,
            account: None,
            retry: RetryConfig::default(),
        }
    }
}

impl OnePasswordConfig {
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    #[must_use]
    pub fn with_token_env(mut self, token_env: impl Into<String>) -> Self {
        self.token_env = token_env.into();
        self
    }

    /// Empty tokens are treated as absent
    #[must_use]
    pub fn with_service_account_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.service_account_token = (!token.is_empty()).then_some(token);
        self
    }

    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

impl fmt::Debug for OnePasswordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnePasswordConfig")
            .field("binary", &self.binary)
            .field("token_env", &self.token_env)
            .field(
                "service_account_token",
                &self.service_account_token.as_ref().map(|_| "<redacted>"),
            )
            .field("account", &self.account)
            .field("retry", &self.retry)
            .finish()
    }
}
