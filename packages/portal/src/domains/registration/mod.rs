//! Registration domain: the three-step school registration wizard and the
//! submission workflow behind it.

mod errors;
pub mod form;
pub mod profile;
pub mod wizard;
pub mod workflow;

pub use errors::RegistrationError;
pub use form::{RegistrationForm, SchoolFields, REGIONS};
pub use profile::{fetch_school_profile, ProfileError, SchoolProfile};
pub use wizard::{RegistrationWizard, SubmitRegistration, WizardState};
pub use workflow::{RegistrationReceipt, RegistrationWorkflow, SUCCESS_REDIRECT_DELAY};
