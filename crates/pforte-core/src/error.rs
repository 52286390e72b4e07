//! Core error types for pforte-core.
//!
//! One top-level error enum with `#[from]` conversions from the per-area
//! sub-errors, so `?` works across module boundaries.

use thiserror::Error;

/// Core error type for pforte-core.
#[derive(Error, Debug)]
pub enum PortalError {
    /// The portal rejected the submitted credentials.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// A protected page answered with the login form -- the session cookie
    /// is missing or expired.
    #[error("not authenticated: the portal redirected to the login form")]
    NotAuthenticated,

    /// A structural query against server-rendered HTML came up empty.
    #[error("unexpected markup: {what}")]
    UnexpectedMarkup { what: String },

    /// A REST endpoint answered with a non-success status or an error
    /// envelope.
    #[error("portal API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network / transport errors
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Recurrence / form input validation errors
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Outbound mail errors
    #[error("mail error: {0}")]
    Mail(#[from] MailError),

    /// Credential store errors
    #[error("credential store error: {0}")]
    Credentials(String),

    /// JSON decode errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL construction errors
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input-contract violations reported by the recurrence encoder and the
/// form builders. All are synchronous and none are retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field required by the chosen interval / monthly-kind / end-type
    /// combination was absent.
    #[error("{context}: missing required field '{field}'")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },

    /// A numeric field outside its allowed range.
    #[error("value {value} for '{field}' out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A value outside its fixed closed set (e.g. an alarm token).
    #[error("invalid value '{value}' for '{field}'")]
    InvalidMember { field: String, value: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed {
        path: std::path::PathBuf,
        message: String,
    },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed {
        path: std::path::PathBuf,
        message: String,
    },

    /// No config directory could be determined for this platform
    #[error("no configuration directory available")]
    NoConfigDir,
}

/// Outbound-mail errors wrapping the SMTP library's failure modes.
#[derive(Error, Debug)]
pub enum MailError {
    /// A recipient or sender address did not parse.
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// The SMTP transaction failed.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// No sender address configured and none supplied.
    #[error("no sender address configured")]
    NoSender,
}

/// Result type alias for PortalError
pub type Result<T, E = PortalError> = std::result::Result<T, E>;
