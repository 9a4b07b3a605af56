//! Registration wizard state machine.
//!
//! The wizard is a pure state machine: transitions are synchronous, do no
//! IO, and at most emit a [`SubmitRegistration`] command for the workflow
//! layer to execute. State lives inside the machine.
//!
//! ```text
//! SchoolInfo <-> Representative <-> Review --begin_submit--> Submitting
//!                                     ^                        |      |
//!                                     +--retry-- Failed <------+      v
//!                                                                 Succeeded
//! ```

use crate::common::ValidationError;
use crate::domains::registration::{RegistrationError, RegistrationForm};

/// Wizard states. The first three are the visible form steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    SchoolInfo,
    Representative,
    Review,
    Submitting,
    Succeeded,
    Failed { message: String },
}

/// Intent for IO: execute the submission sequence for this form snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRegistration {
    pub form: RegistrationForm,
}

pub struct RegistrationWizard {
    state: WizardState,
    form: RegistrationForm,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::SchoolInfo,
            form: RegistrationForm::default(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Field-by-field mutation on user input.
    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    /// Advance one step. Requires the current step's fields to validate;
    /// clamped at the review step. Outside the form steps this is a no-op.
    pub fn next(&mut self) -> Result<(), ValidationError> {
        match self.state {
            WizardState::SchoolInfo => {
                self.form.validate_school_info()?;
                self.state = WizardState::Representative;
            }
            WizardState::Representative => {
                self.form.validate_representative()?;
                self.state = WizardState::Review;
            }
            _ => {}
        }
        Ok(())
    }

    /// Go back one step; clamped at the first step, no revalidation.
    /// Outside the form steps this is a no-op.
    pub fn prev(&mut self) {
        match self.state {
            WizardState::Representative => self.state = WizardState::SchoolInfo,
            WizardState::Review => self.state = WizardState::Representative,
            _ => {}
        }
    }

    /// Start the submission. Only legal from the review step with the terms
    /// accepted. Emits the submit command exactly once: while `Submitting`,
    /// a second call is refused (the disabled submit button, as a guard).
    pub fn begin_submit(&mut self) -> Result<SubmitRegistration, RegistrationError> {
        match self.state {
            WizardState::Review => {}
            WizardState::Submitting => return Err(RegistrationError::SubmitInFlight),
            _ => {
                return Err(ValidationError::single(
                    "form",
                    "Complete the form before submitting.",
                )
                .into())
            }
        }
        self.form.validate_review()?;
        // Earlier steps were validated on the way forward; revalidate so a
        // form mutated on the review step cannot slip through.
        self.form.validate_school_info()?;
        self.form.validate_representative()?;

        self.state = WizardState::Submitting;
        Ok(SubmitRegistration {
            form: self.form.clone(),
        })
    }

    /// The workflow reported success.
    pub fn submit_succeeded(&mut self) {
        if self.state == WizardState::Submitting {
            self.state = WizardState::Succeeded;
        }
    }

    /// The workflow reported failure; the message is shown inline.
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        if self.state == WizardState::Submitting {
            self.state = WizardState::Failed {
                message: message.into(),
            };
        }
    }

    /// Dismiss a failure and return to the review step.
    pub fn retry(&mut self) {
        if matches!(self.state, WizardState::Failed { .. }) {
            self.state = WizardState::Review;
        }
    }

    /// 1-based step number while on a form step.
    pub fn step_number(&self) -> Option<u8> {
        match self.state {
            WizardState::SchoolInfo => Some(1),
            WizardState::Representative => Some(2),
            WizardState::Review => Some(3),
            _ => None,
        }
    }

    /// Progress-bar percentage across the three form steps.
    pub fn progress_percent(&self) -> u8 {
        match self.step_number() {
            Some(step) => (u16::from(step - 1) * 100 / 2) as u8,
            None => 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registration::form::filled_form;

    fn wizard_with(form: RegistrationForm) -> RegistrationWizard {
        let mut wizard = RegistrationWizard::new();
        *wizard.form_mut() = form;
        wizard
    }

    #[test]
    fn walks_forward_through_the_steps() {
        let mut wizard = wizard_with(filled_form());
        assert_eq!(wizard.step_number(), Some(1));
        wizard.next().unwrap();
        assert_eq!(*wizard.state(), WizardState::Representative);
        wizard.next().unwrap();
        assert_eq!(*wizard.state(), WizardState::Review);
    }

    #[test]
    fn next_blocks_on_invalid_step_fields() {
        let mut wizard = RegistrationWizard::new();
        let err = wizard.next().unwrap_err();
        assert!(err.rejects("schoolName"));
        assert_eq!(*wizard.state(), WizardState::SchoolInfo);
    }

    #[test]
    fn prev_never_revalidates() {
        let mut wizard = wizard_with(filled_form());
        wizard.next().unwrap();
        wizard.form_mut().school_name.clear();
        wizard.prev();
        assert_eq!(*wizard.state(), WizardState::SchoolInfo);
    }

    #[test]
    fn any_interleaving_of_next_prev_stays_within_the_form_steps() {
        let mut wizard = wizard_with(filled_form());
        // A mixed walk with far more moves than steps in either direction.
        for i in 0..50 {
            if i % 3 == 0 {
                wizard.prev();
            } else {
                let _ = wizard.next();
            }
            assert!(
                matches!(wizard.step_number(), Some(1..=3)),
                "escaped the form steps at move {i}: {:?}",
                wizard.state()
            );
        }
        for _ in 0..10 {
            wizard.prev();
        }
        assert_eq!(*wizard.state(), WizardState::SchoolInfo);
        for _ in 0..10 {
            wizard.next().unwrap();
        }
        assert_eq!(*wizard.state(), WizardState::Review);
    }

    #[test]
    fn begin_submit_requires_terms() {
        let mut form = filled_form();
        form.terms_accept = false;
        let mut wizard = wizard_with(form);
        wizard.next().unwrap();
        wizard.next().unwrap();

        let err = wizard.begin_submit().unwrap_err();
        match err {
            RegistrationError::Validation(v) => assert!(v.rejects("termsAccept")),
            other => panic!("expected validation error, got {other:?}"),
        }
        // Still on review: the user can tick the box and resubmit.
        assert_eq!(*wizard.state(), WizardState::Review);
    }

    #[test]
    fn begin_submit_emits_the_command_once() {
        let mut wizard = wizard_with(filled_form());
        wizard.next().unwrap();
        wizard.next().unwrap();

        let cmd = wizard.begin_submit().unwrap();
        assert_eq!(cmd.form, filled_form());
        assert_eq!(*wizard.state(), WizardState::Submitting);

        assert_eq!(
            wizard.begin_submit().unwrap_err(),
            RegistrationError::SubmitInFlight
        );
    }

    #[test]
    fn begin_submit_outside_review_is_rejected() {
        let mut wizard = wizard_with(filled_form());
        assert!(matches!(
            wizard.begin_submit(),
            Err(RegistrationError::Validation(_))
        ));
        assert_eq!(*wizard.state(), WizardState::SchoolInfo);
    }

    #[test]
    fn submit_outcome_transitions() {
        let mut wizard = wizard_with(filled_form());
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.begin_submit().unwrap();

        wizard.submit_failed("provider unreachable");
        assert_eq!(
            *wizard.state(),
            WizardState::Failed {
                message: "provider unreachable".to_string()
            }
        );

        wizard.retry();
        assert_eq!(*wizard.state(), WizardState::Review);

        wizard.begin_submit().unwrap();
        wizard.submit_succeeded();
        assert_eq!(*wizard.state(), WizardState::Succeeded);
    }

    #[test]
    fn nav_is_inert_outside_the_form_steps() {
        let mut wizard = wizard_with(filled_form());
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.begin_submit().unwrap();

        wizard.prev();
        assert_eq!(*wizard.state(), WizardState::Submitting);
        wizard.next().unwrap();
        assert_eq!(*wizard.state(), WizardState::Submitting);
    }

    #[test]
    fn progress_matches_the_form_bar() {
        let mut wizard = wizard_with(filled_form());
        assert_eq!(wizard.progress_percent(), 0);
        wizard.next().unwrap();
        assert_eq!(wizard.progress_percent(), 50);
        wizard.next().unwrap();
        assert_eq!(wizard.progress_percent(), 100);
    }
}
