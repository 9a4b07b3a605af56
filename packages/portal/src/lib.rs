//! USRA member portal core.
//!
//! The portal talks to a hosted identity & document provider through the
//! trait seams in [`kernel`]; everything user-facing (markup, navigation
//! chrome) consumes the services and state machines defined here.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod routes;

pub use config::Config;
pub use domains::auth::{AuthError, AuthService, AuthState, GateDecision, Identity, SessionRef};
pub use domains::registration::{
    fetch_school_profile, RegistrationError, RegistrationForm, RegistrationReceipt,
    RegistrationWizard, RegistrationWorkflow, SchoolProfile, WizardState, REGIONS,
};
pub use kernel::{PortalDeps, ProviderError};
pub use routes::Route;
