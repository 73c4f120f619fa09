//! Dashboard error types
//!
//! Every failure the dashboard can hit is isolated to the action that caused it.
//! Callers log the error and carry on; nothing here is fatal to the page.

use thiserror::Error;

/// Errors that can occur in the dashboard client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("HTTP error {status}")]
    Http { status: u16 },

    /// Login endpoint rejected the credentials (or failed)
    #[error("Failed to login (status {status})")]
    LoginFailed { status: u16 },

    /// Logout endpoint did not accept the token
    #[error("Failed to logout (status {status})")]
    LogoutFailed { status: u16 },

    /// Registration endpoint rejected the form
    #[error("Failed to register (status {status})")]
    RegistrationFailed { status: u16 },

    /// An authenticated action was attempted without a session token
    #[error("Not logged in")]
    NotLoggedIn,

    /// Client-side validation rejected a form
    #[error("Invalid form: {0}")]
    InvalidForm(String),

    /// A response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Chart element names a data source we have no rules for
    #[error("Unknown data source: {0}")]
    UnknownDataSource(String),

    /// Chart element names a chart form we cannot render
    #[error("Unknown chart form: {0}")]
    UnknownChartForm(String),

    /// An element attribute holds a value of the wrong shape
    #[error("Invalid attribute {name}={value:?}")]
    InvalidAttribute { name: String, value: String },

    /// Session storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            DashboardError::Http { status }
            | DashboardError::LoginFailed { status }
            | DashboardError::LogoutFailed { status }
            | DashboardError::RegistrationFailed { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Storage(err.to_string())
    }
}

impl From<crate::config::ConfigError> for DashboardError {
    fn from(err: crate::config::ConfigError) -> Self {
        DashboardError::Config(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
