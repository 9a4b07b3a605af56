//! Protected route gate.
//!
//! A pure decision over [`AuthState`], re-evaluated by the UI on every state
//! change. No IO, no retries, no caching beyond what the auth service holds.

use crate::domains::auth::AuthState;
use crate::routes::Route;

/// What the UI should do for a requested route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session check pending: render the loading placeholder, no navigation.
    ShowPlaceholder,
    /// No session: redirect to sign-in. `replace` (not push) so the guarded
    /// location does not land in the history stack.
    RedirectToSignIn { replace: bool },
    /// Render the requested content.
    Render,
}

/// Decide how to treat `route` under the current auth state.
///
/// Routes that need no session always render; the gate only arbitrates the
/// guarded ones.
pub fn decide(route: Route, state: &AuthState) -> GateDecision {
    if !route.requires_auth() {
        return GateDecision::Render;
    }
    evaluate(state)
}

/// Gate decision for guarded content, as a function of auth state alone.
pub fn evaluate(state: &AuthState) -> GateDecision {
    match state {
        AuthState::Unknown => GateDecision::ShowPlaceholder,
        AuthState::Anonymous => GateDecision::RedirectToSignIn { replace: true },
        AuthState::Authenticated(_) => GateDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_identity;

    #[test]
    fn unknown_shows_placeholder() {
        assert_eq!(
            decide(Route::Dashboard, &AuthState::Unknown),
            GateDecision::ShowPlaceholder
        );
    }

    #[test]
    fn anonymous_redirects_with_replace() {
        assert_eq!(
            decide(Route::Dashboard, &AuthState::Anonymous),
            GateDecision::RedirectToSignIn { replace: true }
        );
    }

    #[test]
    fn authenticated_renders() {
        let state = AuthState::Authenticated(test_identity("u1", "admin@school.ac.ug"));
        assert_eq!(decide(Route::Dashboard, &state), GateDecision::Render);
    }

    #[test]
    fn public_routes_render_regardless_of_state() {
        for state in [AuthState::Unknown, AuthState::Anonymous] {
            assert_eq!(decide(Route::Home, &state), GateDecision::Render);
            assert_eq!(decide(Route::SignIn, &state), GateDecision::Render);
            assert_eq!(decide(Route::Registration, &state), GateDecision::Render);
        }
    }
}
