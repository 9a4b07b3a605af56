use thiserror::Error;

use crate::common::ValidationError;
use crate::kernel::ProviderError;

/// Failures of the registration workflow, surfaced inline on the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submit is already in flight; the control should be disabled.
    #[error("A submission is already in progress.")]
    SubmitInFlight,

    #[error("An account with this email is already registered.")]
    EmailTaken,

    #[error("{0}")]
    WeakPassword(String),

    /// The identity was created but the school document was not: the
    /// orphaned-identity case. Re-submitting with the same email and
    /// password heals it.
    #[error("Your account was created but the school profile could not be saved. Please submit again.")]
    ProfileCreationFailed { identity_id: String },

    /// The owning component tore down mid-submit; not a user-facing failure.
    #[error("registration cancelled")]
    Cancelled,

    #[error("{0}")]
    Provider(String),
}

impl RegistrationError {
    /// Message for inline display, matching the sign-up form's alert box.
    pub fn display_message(&self) -> String {
        match self {
            RegistrationError::Provider(_) => {
                "Failed to register. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ProviderError> for RegistrationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::DuplicateEmail => RegistrationError::EmailTaken,
            ProviderError::WeakPassword(msg) => RegistrationError::WeakPassword(msg),
            other => RegistrationError::Provider(other.to_string()),
        }
    }
}
