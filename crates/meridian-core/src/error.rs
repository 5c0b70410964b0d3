//! Error types for the Meridian CRM.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Permission denied: {reason}")]
    PermissionDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CrmError {
    /// True for conditions the interactive loop recovers from by
    /// re-prompting or returning to a menu. Configuration errors are the
    /// only fatal variant; they abort at startup.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CrmError::Config(_))
    }
}

pub type CrmResult<T> = Result<T, CrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_fatal() {
        assert!(!CrmError::Config("missing MERIDIAN_SECRET_KEY".into()).is_recoverable());
        assert!(
            CrmError::AuthenticationFailed {
                reason: "invalid credentials".into()
            }
            .is_recoverable()
        );
        assert!(
            CrmError::PermissionDenied {
                reason: "staff.create".into()
            }
            .is_recoverable()
        );
    }
}
