//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`FetchError`] - Network, backend and cache errors for data requests
//! - [`ValidationError`] - Employee form field validation

use thiserror::Error;

/// Errors surfaced to a page when a data request fails.
///
/// Clonable so one terminal error can be shared by every caller that
/// joined the same in-flight request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, connection refused, ...)
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error response without a readable envelope
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Backend answered with `success: false`
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
    /// Backend answered with success but no payload
    #[error("Response contained no data")]
    EmptyResponse,
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
    /// Cached value under `key` has a different type than requested
    #[error("Cached value for '{0}' has an unexpected type")]
    TypeMismatch(String),
}

impl FetchError {
    /// Whether the backend reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Http(404) | Self::Api { status: 404, .. }
        )
    }
}

/// Employee form validation failures, one per offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("Phone number must be 10 digits")]
    InvalidPhone,
    #[error("Salary must be a positive number")]
    InvalidSalary,
    #[error("Hire date must be a valid date (YYYY-MM-DD)")]
    InvalidDate,
    #[error("Unknown status '{0}'")]
    InvalidStatus(String),
}

impl ValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required(field) | Self::TooLong { field, .. } => field,
            Self::InvalidEmail => "Email",
            Self::InvalidPhone => "Phone",
            Self::InvalidSalary => "Salary",
            Self::InvalidDate => "Hire date",
            Self::InvalidStatus(_) => "Status",
        }
    }
}
