//! Sign-in workflow.
//!
//! Single-step: validate locally, attempt a login, hand the caller either
//! the dashboard route or an inline error message. Every submit is a fresh
//! attempt; there is no retry or backoff.

use thiserror::Error;

use crate::common::{FieldError, ValidationError};
use crate::domains::auth::{AuthError, AuthService};
use crate::routes::Route;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();
        if self.email.trim().is_empty() {
            fields.push(FieldError::required("email"));
        }
        if self.password.is_empty() {
            fields.push(FieldError::required("password"));
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(fields))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignInError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl SignInError {
    /// Inline message shown next to the form.
    pub fn display_message(&self) -> String {
        match self {
            SignInError::Validation(err) => err.to_string(),
            SignInError::Auth(err) => err.display_message(),
        }
    }
}

/// Submit the sign-in form. On success the caller navigates to the returned
/// route; on failure it displays the message and stays on the page.
pub async fn sign_in(auth: &AuthService, form: &SignInForm) -> Result<Route, SignInError> {
    form.validate()?;
    auth.login(&form.email, &form.password).await?;
    Ok(Route::Dashboard)
}
