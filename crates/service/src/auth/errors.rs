use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("expected `{0}` to be unique")]
    Duplicate(&'static str),
    #[error("insufficient permissions")]
    Forbidden,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("token missing")]
    TokenMissing,
    #[error("invalid token")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Duplicate(_) => 1002,
            AuthError::Forbidden => 1003,
            AuthError::InvalidCredentials => 1004,
            AuthError::TokenMissing => 1005,
            AuthError::TokenInvalid => 1006,
            AuthError::TokenExpired => 1007,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => AuthError::Validation(msg),
            ServiceError::Duplicate(field) => AuthError::Duplicate(field),
            ServiceError::Forbidden => AuthError::Forbidden,
            other => AuthError::Repository(other.to_string()),
        }
    }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(e: models::errors::ModelError) -> Self {
        AuthError::from(ServiceError::from(e))
    }
}
