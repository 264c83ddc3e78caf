/// Result type alias for opref operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for opref operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The value does not use the `op://` scheme at all
    #[error("incorrect op uri - it should look like op://vault/item/field - got {reference}")]
    InvalidReference { reference: String },

    /// The value uses the `op://` scheme but has the wrong number of segments
    #[error("invalid 1Password URI format - expected op://vault/item/field - got '{reference}'")]
    InvalidReferenceFormat { reference: String },

    /// The 1Password CLI binary could not be found on the search path
    #[error(
        "1Password CLI is not installed, visit https://support.1password.com/command-line/ \
         for installation instructions"
    )]
    ToolNotInstalled,

    /// The external tool exited unsuccessfully; the message is its stderr
    #[error("{message}")]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
        retryable: bool,
    },

    /// The external tool could not be started at all
    #[error("failed to execute '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The item document returned by the tool was not valid JSON
    #[error("failed to decode item '{item}' in vault '{vault}': {source}")]
    MalformedItemDocument {
        vault: String,
        item: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no such vault {vault}")]
    VaultNotCached { vault: String },

    #[error("no such item {item} in vault {vault}")]
    ItemNotCached { vault: String, item: String },

    /// A file attachment's contents cannot be returned as text
    #[error("file {reference} is not valid UTF-8: {source}")]
    NonUtf8File {
        reference: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Neither a field nor a file of the item matched the reference
    #[error("field {field} not found")]
    FieldNotFound { field: String },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

// Helper methods for creating errors with context
impl Error {
    #[must_use]
    pub fn invalid_reference(reference: impl Into<String>) -> Self {
        Error::InvalidReference {
            reference: reference.into(),
        }
    }

    #[must_use]
    pub fn invalid_reference_format(reference: impl Into<String>) -> Self {
        Error::InvalidReferenceFormat {
            reference: reference.into(),
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
        retryable: bool,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
            retryable,
        }
    }

    #[must_use]
    pub fn command_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Error::CommandSpawn {
            command: command.into(),
            source,
        }
    }

    #[must_use]
    pub fn malformed_item_document(
        vault: impl Into<String>,
        item: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Error::MalformedItemDocument {
            vault: vault.into(),
            item: item.into(),
            source,
        }
    }

    #[must_use]
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Error::FieldNotFound {
            field: field.into(),
        }
    }

    #[must_use]
    pub fn non_utf8_file(reference: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        Error::NonUtf8File {
            reference: reference.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Whether the retry loop may attempt the failed operation again
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::CommandExecution { retryable: true, .. })
    }

    /// The raw value a caller may fall back to when the input was not a
    /// resolvable reference.
    #[must_use]
    pub fn literal_fallback(&self) -> Option<&str> {
        match self {
            Error::InvalidReference { reference }
            | Error::InvalidReferenceFormat { reference } => Some(reference),
            _ => None,
        }
    }
}
