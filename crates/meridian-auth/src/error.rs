//! Authentication error types.

use meridian_core::error::CrmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("malformed credential record: {0}")]
    MalformedCredential(String),

    #[error("session has expired")]
    TokenExpired,

    #[error("invalid session token: {0}")]
    TokenInvalid(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for CrmError {
    fn from(err: AuthError) -> Self {
        match err {
            // A corrupt stored hash is reported to the caller exactly
            // like a wrong password; the detail is logged, not shown.
            AuthError::InvalidCredentials | AuthError::MalformedCredential(_) => {
                CrmError::AuthenticationFailed {
                    reason: "invalid email or password".into(),
                }
            }
            AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                CrmError::AuthenticationFailed {
                    reason: format!("{err}, please log in again"),
                }
            }
            AuthError::Config(msg) => CrmError::Config(msg),
            AuthError::Crypto(msg) => CrmError::Internal(msg),
        }
    }
}
