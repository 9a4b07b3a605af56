//! Account and session operations.

use serde_json::json;
use tracing::debug;

use crate::models::{Session, User};
use crate::{AppwriteClient, AppwriteError};

/// Account API group, borrowed from an [`AppwriteClient`].
pub struct Account<'a> {
    client: &'a AppwriteClient,
}

impl<'a> Account<'a> {
    pub(crate) fn new(client: &'a AppwriteClient) -> Self {
        Self { client }
    }

    /// Register a new account.
    ///
    /// Fails with [`AppwriteError::DuplicateEmail`] when the email is taken
    /// and [`AppwriteError::WeakPassword`] when the password violates the
    /// provider's policy.
    pub async fn create(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AppwriteError> {
        debug!(email, "creating account");
        self.client
            .post(
                "/account",
                &json!({
                    "userId": user_id,
                    "email": email,
                    "password": password,
                    "name": name,
                }),
            )
            .await
    }

    /// Create a session from credentials. The provider sets the session
    /// cookie on the response; subsequent calls through this client are
    /// authenticated.
    pub async fn create_email_password_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AppwriteError> {
        debug!(email, "creating email/password session");
        self.client
            .post(
                "/account/sessions/email",
                &json!({ "email": email, "password": password }),
            )
            .await
    }

    /// Fetch the account behind the current session.
    ///
    /// Fails with [`AppwriteError::NotAuthenticated`] when no valid session
    /// cookie is held.
    pub async fn get(&self) -> Result<User, AppwriteError> {
        self.client.get("/account").await
    }

    /// Destroy a session. Pass `"current"` for the session backing this
    /// client's cookie.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), AppwriteError> {
        debug!(session_id, "deleting session");
        self.client
            .delete(&format!("/account/sessions/{session_id}"))
            .await
    }
}
