//! Connector error handling module
//! Define custom error types for connection bootstrap and driver operations

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use thiserror::Error;

const REDACTED: &str = "***";

/// Error returned by the connection bootstrapper
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// Backend identifier has no DSN template
    #[error("Unsupported database backend: {0}")]
    UnsupportedBackend(String),

    /// Port outside the accepted range
    #[error("Invalid database port: {0}")]
    InvalidPort(u16),

    /// Driver failed to open the connection. Carries the driver message unchanged.
    #[error("{0}")]
    Connection(String),

    /// Log directory could not be prepared
    #[error("Failed to prepare log location {path}: {reason}")]
    LogLocation { path: String, reason: String },

    /// Configuration could not be loaded or is incomplete
    #[error("Invalid connector configuration: {0}")]
    Config(String),
}

impl BootstrapError {
    /// Returns true for errors raised before any connection attempt was made.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            BootstrapError::UnsupportedBackend(_) | BootstrapError::InvalidPort(_) | BootstrapError::Config(_)
        )
    }
}

/// Error reported by a database driver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// No driver is available for the requested backend
    #[error("could not find driver for {0}")]
    DriverNotFound(String),

    /// The driver refused or failed the connection
    #[error("{0}")]
    ConnectFailed(String),

    /// An operation on an open connection failed
    #[error("{0}")]
    OperationFailed(String),

    /// Option value has the wrong type for its key
    #[error("invalid value for option {key}: {reason}")]
    InvalidOption { key: String, reason: String },
}

impl From<sea_orm::DbErr> for DriverError {
    fn from(err: sea_orm::DbErr) -> Self {
        DriverError::ConnectFailed(err.to_string())
    }
}

/// Masks `password` in a driver message, both as given and in its URL-encoded form.
pub(crate) fn redact_password(message: &str, password: &str) -> String {
    if password.is_empty() {
        return message.to_string();
    }
    let encoded = utf8_percent_encode(password, NON_ALPHANUMERIC).to_string();
    message.replace(&encoded, REDACTED).replace(password, REDACTED)
}
