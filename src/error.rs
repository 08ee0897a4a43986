//! Error types
//!
//! Loading, configuration and the server surface are fallible. Navigation is
//! not: out-of-range requests are no-ops and never produce an `Error`.

use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration
    // ============================================================================
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Missing setting `{field}`")]
    MissingConfigField { field: String },

    #[error("Invalid value for `{field}`: {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Malformed YAML config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Fetching
    // ============================================================================
    #[error("Request to source failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Source is rate limiting requests (retry in {retry_after_seconds}s)")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Source did not answer within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Could not read {path}: file does not exist")]
    FileNotFound { path: String },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Payload
    // ============================================================================
    #[error("Unreadable record document: {message}")]
    Decode { message: String },

    #[error("Unexpected data format: expected an array of records, found {found}")]
    UnexpectedFormat { found: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render page: {0}")]
    Template(#[from] askama::Error),

    // ============================================================================
    // Sessions
    // ============================================================================
    #[error("Session {id} not found")]
    SessionNotFound { id: u64 },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Invalid configuration that is not tied to one field
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// A required setting is absent or blank
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// A setting is present but unusable
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Non-success HTTP response
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Body could not be parsed into records
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Body parsed but is not an array of objects
    pub fn unexpected_format(found: impl Into<String>) -> Self {
        Self::UnexpectedFormat {
            found: found.into(),
        }
    }

    /// Whether repeating the request could succeed
    ///
    /// Transport failures, timeouts, 429 and the usual transient 5xx codes
    /// qualify. Payload and configuration errors never do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => {
                matches!(status, 429 | 500 | 502 | 503 | 504 | 520..=524)
            }
            _ => false,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error with what was being attempted
pub trait ResultExt<T> {
    /// Wrap the error as `"{what}: {error}"`, building `what` lazily
    fn with_context<F: FnOnce() -> String>(self, what: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, what: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", what(), e.into())))
    }
}
