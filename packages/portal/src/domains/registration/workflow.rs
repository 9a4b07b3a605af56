//! Registration submission workflow.
//!
//! Executes the non-atomic three-call sequence behind the wizard's submit:
//!
//! 1. create the identity (email + password + display name),
//! 2. build owner-scoped permissions for the new identity,
//! 3. create the school document keyed by the identity id,
//!
//! then logs the new administrator in and hands the caller a receipt with
//! the delayed dashboard redirect.
//!
//! The sequence has no server-side transaction. A duplicate-email failure in
//! step 1 triggers the retry-by-email path: sign in with the submitted
//! credentials and create the document if it is missing, so a previous
//! half-completed registration (identity without document) heals on
//! re-submit instead of dead-ending.
//!
//! Every provider await is raced against a cancellation token owned by the
//! mounting component; teardown yields [`RegistrationError::Cancelled`].

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use appwrite::{Permission, Role, ID};

use crate::domains::auth::AuthService;
use crate::domains::registration::{RegistrationError, RegistrationForm, SubmitRegistration};
use crate::kernel::{PortalDeps, ProviderError};
use crate::routes::Route;

/// How long the success message stays visible before navigating.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub identity_id: String,
    /// Where to navigate once the success message has been shown.
    pub redirect: Route,
    /// Fixed display delay before the navigation.
    pub redirect_after: Duration,
}

pub struct RegistrationWorkflow {
    deps: PortalDeps,
    auth: AuthService,
    cancel: CancellationToken,
}

impl RegistrationWorkflow {
    pub fn new(deps: PortalDeps, auth: AuthService) -> Self {
        Self {
            deps,
            auth,
            cancel: CancellationToken::new(),
        }
    }

    /// Token to cancel on teardown; abandons any in-flight submit.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Execute the submission sequence for a wizard-emitted command.
    pub async fn submit(
        &self,
        cmd: SubmitRegistration,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        let form = cmd.form;

        // 1. Create the auth identity.
        let identity = match self
            .cancellable(self.deps.identity.create_identity(
                &ID::unique(),
                &form.school_email,
                &form.password,
                &form.admin_full_name,
            ))
            .await?
        {
            Ok(identity) => identity,
            Err(ProviderError::DuplicateEmail) => {
                return self.resume_existing_registration(&form).await;
            }
            Err(err) => {
                error!(%err, "identity creation failed; no document was created");
                return Err(err.into());
            }
        };

        // 2. Owner-scoped permissions for the new identity.
        // 3. School document keyed by the identity id (one document per
        //    identity). A failure here leaves an orphaned identity; see the
        //    retry-by-email path above.
        if let Err(err) = self
            .cancellable(self.deps.documents.create_document(
                &self.deps.database_id,
                &self.deps.schools_collection_id,
                &identity.id,
                form.document_fields(),
                owner_permissions(&identity.id),
            ))
            .await?
        {
            error!(identity_id = %identity.id, %err,
                "school document creation failed after identity creation");
            return Err(RegistrationError::ProfileCreationFailed {
                identity_id: identity.id,
            });
        }

        // 4. Sign the new administrator in.
        self.login_and_receipt(&form.school_email, &form.password, identity.id)
            .await
    }

    /// Duplicate email on step 1: if the submitted credentials match the
    /// existing account, finish whatever is missing (typically the school
    /// document of an orphaned identity) and converge to success.
    async fn resume_existing_registration(
        &self,
        form: &RegistrationForm,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        warn!(email = %form.school_email, "email already registered; attempting to resume");

        if self
            .cancellable(self.auth.login(&form.school_email, &form.password))
            .await?
            .is_err()
        {
            // Not the same person (or a typo): surface the duplicate.
            return Err(RegistrationError::EmailTaken);
        }
        let identity = self
            .auth
            .current_identity()
            .ok_or(RegistrationError::EmailTaken)?;

        match self
            .cancellable(self.deps.documents.get_document(
                &self.deps.database_id,
                &self.deps.schools_collection_id,
                &identity.id,
            ))
            .await?
        {
            Ok(_) => {
                // Fully registered already; the re-submit is a no-op.
                info!(identity_id = %identity.id, "registration already complete");
            }
            Err(ProviderError::NotFound) => {
                info!(identity_id = %identity.id,
                    "healing orphaned identity: creating missing school document");
                self.cancellable(self.deps.documents.create_document(
                    &self.deps.database_id,
                    &self.deps.schools_collection_id,
                    &identity.id,
                    form.document_fields(),
                    owner_permissions(&identity.id),
                ))
                .await?
                .map_err(|err| {
                    error!(identity_id = %identity.id, %err, "orphan heal failed");
                    RegistrationError::ProfileCreationFailed {
                        identity_id: identity.id.clone(),
                    }
                })?;
            }
            Err(err) => return Err(err.into()),
        }

        Ok(receipt(identity.id))
    }

    async fn login_and_receipt(
        &self,
        email: &str,
        password: &str,
        identity_id: String,
    ) -> Result<RegistrationReceipt, RegistrationError> {
        self.cancellable(self.auth.login(email, password))
            .await?
            .map_err(|err| RegistrationError::Provider(err.to_string()))?;
        info!(identity_id = %identity_id, "registration complete");
        Ok(receipt(identity_id))
    }

    /// Race a future against cancellation, keeping its output intact.
    async fn cancellable<T>(
        &self,
        fut: impl std::future::Future<Output = T>,
    ) -> Result<T, RegistrationError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(RegistrationError::Cancelled),
            out = fut => Ok(out),
        }
    }
}

fn owner_permissions(identity_id: &str) -> Vec<String> {
    vec![
        Permission::read(Role::user(identity_id)),
        Permission::update(Role::user(identity_id)),
        Permission::delete(Role::user(identity_id)),
    ]
}

fn receipt(identity_id: String) -> RegistrationReceipt {
    RegistrationReceipt {
        identity_id,
        redirect: Route::Dashboard,
        redirect_after: SUCCESS_REDIRECT_DELAY,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domains::auth::AuthState;
    use crate::domains::registration::form::filled_form;
    use crate::domains::registration::RegistrationWizard;
    use crate::kernel::{MockProvider, ProviderCall};

    fn setup() -> (Arc<MockProvider>, PortalDeps, AuthService) {
        let provider = Arc::new(MockProvider::new());
        let deps = PortalDeps::new(provider.clone(), provider.clone(), "db", "schools");
        let auth = AuthService::new(provider.clone());
        (provider, deps, auth)
    }

    fn submit_command() -> SubmitRegistration {
        let mut wizard = RegistrationWizard::new();
        *wizard.form_mut() = filled_form();
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.begin_submit().unwrap()
    }

    #[tokio::test]
    async fn happy_path_runs_the_three_calls_in_order_then_logs_in() {
        let (provider, deps, auth) = setup();
        auth.initialize().await;
        let calls_before = provider.calls().len();

        let workflow = RegistrationWorkflow::new(deps, auth.clone());
        let receipt = workflow.submit(submit_command()).await.unwrap();

        assert_eq!(receipt.redirect, Route::Dashboard);
        assert_eq!(receipt.redirect_after, Duration::from_millis(2000));
        assert!(matches!(auth.state(), AuthState::Authenticated(_)));

        let calls = &provider.calls()[calls_before..];
        assert!(matches!(calls[0], ProviderCall::CreateIdentity { .. }));
        match &calls[1] {
            ProviderCall::CreateDocument { document_id, permissions } => {
                assert_eq!(*document_id, receipt.identity_id);
                let id = &receipt.identity_id;
                assert_eq!(
                    *permissions,
                    vec![
                        format!("read(\"user:{id}\")"),
                        format!("update(\"user:{id}\")"),
                        format!("delete(\"user:{id}\")"),
                    ]
                );
            }
            other => panic!("expected CreateDocument second, got {other:?}"),
        }
        assert!(matches!(calls[2], ProviderCall::CreateSession { .. }));
        // create_identity, create_document, then login's session + identity fetch
        assert_eq!(calls.len(), 4);
        assert!(matches!(calls[3], ProviderCall::GetCurrentIdentity));
    }

    #[tokio::test]
    async fn document_payload_excludes_password_and_terms() {
        let (provider, deps, auth) = setup();
        auth.initialize().await;
        let workflow = RegistrationWorkflow::new(deps, auth);
        let receipt = workflow.submit(submit_command()).await.unwrap();

        let doc = provider.document("schools", &receipt.identity_id).unwrap();
        assert_eq!(doc.fields["schoolName"], "Hilltop College");
        assert!(!doc.fields.contains_key("password"));
        assert!(!doc.fields.contains_key("termsAccept"));
    }

    #[tokio::test]
    async fn identity_failure_aborts_before_any_document() {
        let (provider, deps, auth) = setup();
        auth.initialize().await;
        provider.fail_next_create_identity(ProviderError::WeakPassword(
            "password must be at least 8 characters".to_string(),
        ));

        let workflow = RegistrationWorkflow::new(deps, auth.clone());
        let err = workflow.submit(submit_command()).await.unwrap_err();

        assert!(matches!(err, RegistrationError::WeakPassword(_)));
        assert!(!provider
            .calls()
            .iter()
            .any(|c| matches!(c, ProviderCall::CreateDocument { .. })));
        assert_eq!(auth.state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn document_failure_leaves_orphan_and_skips_login() {
        let (provider, deps, auth) = setup();
        auth.initialize().await;
        provider.fail_next_create_document(ProviderError::Network("timeout".to_string()));

        let workflow = RegistrationWorkflow::new(deps, auth.clone());
        let err = workflow.submit(submit_command()).await.unwrap_err();

        let identity_id = match err {
            RegistrationError::ProfileCreationFailed { identity_id } => identity_id,
            other => panic!("expected ProfileCreationFailed, got {other:?}"),
        };
        // Orphan is observable: the account exists, the document does not.
        assert!(provider.account_exists("admin@hilltop.ac.ug"));
        assert!(provider.document("schools", &identity_id).is_none());
        // No login was attempted after the failure.
        assert!(!provider
            .calls()
            .iter()
            .any(|c| matches!(c, ProviderCall::CreateSession { .. })));
        assert_eq!(auth.state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn resubmit_after_orphan_heals_the_missing_document() {
        let (provider, deps, auth) = setup();
        auth.initialize().await;
        provider.fail_next_create_document(ProviderError::Network("timeout".to_string()));

        let workflow = RegistrationWorkflow::new(deps, auth.clone());
        workflow.submit(submit_command()).await.unwrap_err();

        // Same form, fresh submit: duplicate email resolves by signing in
        // and creating the missing document.
        let receipt = workflow.submit(submit_command()).await.unwrap();
        assert!(provider.document("schools", &receipt.identity_id).is_some());
        assert!(matches!(auth.state(), AuthState::Authenticated(_)));
    }

    #[tokio::test]
    async fn duplicate_email_with_wrong_password_surfaces_email_taken() {
        let (provider, deps, auth) = setup();
        auth.initialize().await;

        // Someone else owns the address.
        let workflow = RegistrationWorkflow::new(deps, auth.clone());
        let mut cmd = submit_command();
        cmd.form.password = "their-own-password".to_string();
        workflow.submit(cmd).await.unwrap();
        auth.logout().await;

        let mut cmd = submit_command();
        cmd.form.password = "not-their-password".to_string();
        let err = workflow.submit(cmd).await.unwrap_err();
        assert_eq!(err, RegistrationError::EmailTaken);
        assert_eq!(auth.state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn cancelled_submit_reports_cancelled_and_stops_calling() {
        let (provider, deps, auth) = setup();
        auth.initialize().await;
        let calls_before = provider.calls().len();

        let workflow = RegistrationWorkflow::new(deps, auth);
        workflow.cancellation_token().cancel();

        let err = workflow.submit(submit_command()).await.unwrap_err();
        assert_eq!(err, RegistrationError::Cancelled);
        assert_eq!(provider.calls().len(), calls_before);
    }
}
