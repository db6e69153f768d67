//! Error handling for Switch Concierge
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Switch Concierge application
#[derive(Error, Debug)]
pub enum ConciergeError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Oracle API error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Mailer API error: {0}")]
    Mailer(#[from] MailerError),

    #[error("Content API error: {0}")]
    Content(#[from] ContentError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("Add-on not found: {addon_id}")]
    AddOnNotFound { addon_id: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Oracle (LLM collaborator) specific errors
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Oracle request failed: {0}")]
    RequestFailed(String),

    #[error("Oracle request timed out")]
    Timeout,

    #[error("Invalid oracle response: {0}")]
    InvalidResponse(String),

    #[error("Oracle returned an empty completion")]
    EmptyCompletion,

    #[error("Oracle service unavailable")]
    ServiceUnavailable,
}

/// Mailer (email collaborator) specific errors
#[derive(Error, Debug)]
pub enum MailerError {
    /// The diagnostic text is surfaced to the user verbatim so a failed
    /// checkout can be retried with context.
    #[error("Mail transmission failed: {0}")]
    SendFailed(String),

    #[error("Mailer request timed out")]
    Timeout,

    #[error("Mailer service unavailable")]
    ServiceUnavailable,
}

/// Content (dynamic page collaborator) specific errors
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content fetch failed: {0}")]
    RequestFailed(String),

    #[error("Invalid content envelope: {0}")]
    InvalidEnvelope(String),
}

/// Result type alias for Switch Concierge operations
pub type Result<T> = std::result::Result<T, ConciergeError>;

impl ConciergeError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConciergeError::Telegram(_) => true,
            ConciergeError::Oracle(_) => true,
            ConciergeError::Mailer(_) => true,
            ConciergeError::Content(_) => true,
            ConciergeError::Config(_) => false,
            ConciergeError::EventNotFound { .. } => false,
            ConciergeError::AddOnNotFound { .. } => false,
            ConciergeError::InvalidStateTransition { .. } => false,
            ConciergeError::Http(_) => true,
            ConciergeError::Serialization(_) => false,
            ConciergeError::Io(_) => true,
            ConciergeError::UrlParse(_) => false,
            ConciergeError::InvalidInput(_) => false,
            ConciergeError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConciergeError::Config(_) => ErrorSeverity::Critical,
            ConciergeError::InvalidInput(_) => ErrorSeverity::Info,
            ConciergeError::EventNotFound { .. } => ErrorSeverity::Warning,
            ConciergeError::AddOnNotFound { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_errors_are_recoverable() {
        assert!(ConciergeError::Oracle(OracleError::Timeout).is_recoverable());
        assert!(ConciergeError::Mailer(MailerError::ServiceUnavailable).is_recoverable());
        assert!(!ConciergeError::Config("missing token".to_string()).is_recoverable());
    }

    #[test]
    fn test_mailer_diagnostic_text_is_preserved() {
        let err = MailerError::SendFailed("HTTP 422: bad template".to_string());
        assert!(err.to_string().contains("HTTP 422: bad template"));
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(
            ConciergeError::InvalidInput("empty".to_string()).severity(),
            ErrorSeverity::Info
        );
        assert_eq!(
            ConciergeError::Config("bad".to_string()).severity(),
            ErrorSeverity::Critical
        );
    }
}
