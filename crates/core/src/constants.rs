/// Constants used throughout the opref codebase
// 1Password CLI
pub const OP_BINARY: &str = "op";
pub const OP_URI_PREFIX: &str = "op://";

// Environment variable names
pub const OP_SERVICE_ACCOUNT_TOKEN_VAR: &str = "OP_SERVICE_ACCOUNT_TOKEN";
pub const OP_ACCOUNT_VAR: &str = "OP_ACCOUNT";

// Retry defaults
pub const DEFAULT_RETRY_ATTEMPTS: usize = 5;

// stderr marker of a transient 1Password backend failure
pub const RETRYABLE_STDERR_MARKER: &str = "https://";
