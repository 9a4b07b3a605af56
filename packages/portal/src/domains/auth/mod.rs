//! Authentication domain: session lifecycle, route gate, sign-in workflow.

mod errors;
pub mod gate;
pub mod session;
pub mod signin;
mod types;

pub use errors::AuthError;
pub use gate::GateDecision;
pub use session::{AuthService, AuthState};
pub use signin::{sign_in, SignInError, SignInForm};
pub use types::{Identity, SessionRef};
