use thiserror::Error;

use crate::kernel::ProviderError;

/// Credential and session failures, surfaced as inline messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("No user session found. Please sign in.")]
    NotAuthenticated,

    #[error("{0}")]
    Provider(String),
}

impl AuthError {
    /// Message for inline display, with a generic fallback for failures the
    /// user cannot act on.
    pub fn display_message(&self) -> String {
        match self {
            AuthError::Provider(_) => {
                "Failed to sign in. Please check your credentials.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidCredentials => AuthError::InvalidCredentials,
            ProviderError::NotAuthenticated => AuthError::NotAuthenticated,
            other => AuthError::Provider(other.to_string()),
        }
    }
}
