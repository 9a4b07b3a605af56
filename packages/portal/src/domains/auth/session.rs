//! Session lifecycle service.
//!
//! `AuthService` is the single shared auth resource: an explicitly
//! constructed object handed to the gate and the workflows, with its state
//! mutated only by `initialize`, `login`, and `logout`. Consumers render
//! before the initial session check resolves and branch on [`AuthState`].

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::domains::auth::{AuthError, Identity, SessionRef};
use crate::kernel::BaseIdentityService;

/// Auth lifecycle states.
///
/// `Unknown` only exists between construction and the first session check;
/// it never recurs afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Initial state; the session check has not resolved yet.
    #[default]
    Unknown,
    /// No valid session.
    Anonymous,
    /// A session is active for this identity.
    Authenticated(Identity),
}

struct Inner {
    identity_service: Arc<dyn BaseIdentityService>,
    // Never held across an await.
    state: RwLock<AuthState>,
}

/// Shared auth session service. Cloning is cheap and clones observe the
/// same state.
#[derive(Clone)]
pub struct AuthService {
    inner: Arc<Inner>,
}

impl AuthService {
    pub fn new(identity_service: Arc<dyn BaseIdentityService>) -> Self {
        Self {
            inner: Arc::new(Inner {
                identity_service,
                state: RwLock::new(AuthState::Unknown),
            }),
        }
    }

    /// Run the one-shot session check. Success moves to `Authenticated`,
    /// any failure (including a plain missing session) to `Anonymous`.
    ///
    /// Subsequent calls are no-ops; a fresh process gets a fresh service.
    pub async fn initialize(&self) {
        if *self.inner.state.read().unwrap() != AuthState::Unknown {
            return;
        }
        match self.inner.identity_service.get_current_identity().await {
            Ok(identity) => {
                debug!(identity_id = %identity.id, "session check found an active session");
                self.set_state(AuthState::Authenticated(identity));
            }
            Err(err) => {
                // A missing session is the normal anonymous case, not an error.
                debug!(%err, "session check resolved anonymous");
                self.set_state(AuthState::Anonymous);
            }
        }
    }

    /// Create a session from credentials and cache the resulting identity.
    ///
    /// On failure the state is left exactly as it was; there is no
    /// optimistic transition.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionRef, AuthError> {
        let session = self
            .inner
            .identity_service
            .create_session(email, password)
            .await?;
        let identity = self.inner.identity_service.get_current_identity().await?;
        info!(identity_id = %identity.id, "signed in");
        self.set_state(AuthState::Authenticated(identity));
        Ok(session)
    }

    /// Destroy the current session and clear local state.
    ///
    /// Local state is cleared even when the destroy call fails; the portal
    /// never keeps a half-authenticated state.
    pub async fn logout(&self) {
        if let Err(err) = self.inner.identity_service.destroy_session("current").await {
            warn!(%err, "session destroy failed; clearing local state anyway");
        }
        self.set_state(AuthState::Anonymous);
        info!("signed out");
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.read().unwrap().clone()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        match self.state() {
            AuthState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// True until the initial session check resolves.
    pub fn is_loading(&self) -> bool {
        self.state() == AuthState::Unknown
    }

    fn set_state(&self, state: AuthState) {
        *self.inner.state.write().unwrap() = state;
    }
}
