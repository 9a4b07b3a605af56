//! Portal dependencies for workflows (using traits for testability)
//!
//! This module provides the central dependency container handed to the auth
//! service and the registration workflow. The hosted provider is reached
//! through trait abstractions to enable testing.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use appwrite::{AppwriteClient, AppwriteError, AppwriteOptions};

use crate::config::Config;
use crate::domains::auth::{Identity, SessionRef};
use crate::kernel::{BaseDocumentService, BaseIdentityService, DocumentRecord, ProviderError};

// =============================================================================
// AppwriteClient Adapter (implements both provider traits)
// =============================================================================

/// Wrapper around [`AppwriteClient`] that implements the portal's provider traits
pub struct AppwriteAdapter(pub Arc<AppwriteClient>);

impl AppwriteAdapter {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        Self(client)
    }
}

fn provider_err(e: AppwriteError) -> ProviderError {
    match e {
        AppwriteError::NotAuthenticated => ProviderError::NotAuthenticated,
        AppwriteError::InvalidCredentials => ProviderError::InvalidCredentials,
        AppwriteError::DuplicateEmail => ProviderError::DuplicateEmail,
        AppwriteError::WeakPassword { message } => ProviderError::WeakPassword(message),
        AppwriteError::PermissionDenied { .. } => ProviderError::PermissionDenied,
        AppwriteError::DuplicateId => ProviderError::DuplicateId,
        AppwriteError::NotFound => ProviderError::NotFound,
        AppwriteError::Network(e) => ProviderError::Network(e.to_string()),
        other => ProviderError::Other(other.to_string()),
    }
}

impl From<appwrite::models::User> for Identity {
    fn from(user: appwrite::models::User) -> Self {
        Identity {
            id: user.id,
            name: user.name,
            email: user.email,
            preferences: user.prefs,
        }
    }
}

#[async_trait]
impl BaseIdentityService for AppwriteAdapter {
    async fn get_current_identity(&self) -> Result<Identity, ProviderError> {
        let user = self.0.account().get().await.map_err(provider_err)?;
        Ok(user.into())
    }

    async fn create_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionRef, ProviderError> {
        let session = self
            .0
            .account()
            .create_email_password_session(email, password)
            .await
            .map_err(provider_err)?;
        Ok(SessionRef {
            id: session.id,
            identity_id: session.user_id,
        })
    }

    async fn destroy_session(&self, session_ref: &str) -> Result<(), ProviderError> {
        self.0
            .account()
            .delete_session(session_ref)
            .await
            .map_err(provider_err)
    }

    async fn create_identity(
        &self,
        unique_id: &str,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, ProviderError> {
        let user = self
            .0
            .account()
            .create(unique_id, email, password, display_name)
            .await
            .map_err(provider_err)?;
        Ok(user.into())
    }
}

#[async_trait]
impl BaseDocumentService for AppwriteAdapter {
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        fields: serde_json::Map<String, serde_json::Value>,
        permissions: Vec<String>,
    ) -> Result<DocumentRecord, ProviderError> {
        let doc = self
            .0
            .databases()
            .create_document(database_id, collection_id, document_id, fields, permissions)
            .await
            .map_err(provider_err)?;
        Ok(DocumentRecord {
            id: doc.id,
            permissions: doc.permissions,
            fields: doc.data,
        })
    }

    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<DocumentRecord, ProviderError> {
        let doc = self
            .0
            .databases()
            .get_document(database_id, collection_id, document_id)
            .await
            .map_err(provider_err)?;
        Ok(DocumentRecord {
            id: doc.id,
            permissions: doc.permissions,
            fields: doc.data,
        })
    }
}

// =============================================================================
// PortalDeps
// =============================================================================

/// Portal dependencies accessible to workflows (using traits for testability)
#[derive(Clone)]
pub struct PortalDeps {
    pub identity: Arc<dyn BaseIdentityService>,
    pub documents: Arc<dyn BaseDocumentService>,
    pub database_id: String,
    pub schools_collection_id: String,
}

impl PortalDeps {
    pub fn new(
        identity: Arc<dyn BaseIdentityService>,
        documents: Arc<dyn BaseDocumentService>,
        database_id: impl Into<String>,
        schools_collection_id: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            documents,
            database_id: database_id.into(),
            schools_collection_id: schools_collection_id.into(),
        }
    }

    /// Wire the real provider client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(AppwriteClient::new(AppwriteOptions {
            endpoint: config.appwrite_endpoint.clone(),
            project_id: config.appwrite_project_id.clone(),
        })?);
        let adapter = Arc::new(AppwriteAdapter::new(client));
        Ok(Self {
            identity: adapter.clone(),
            documents: adapter,
            database_id: config.database_id.clone(),
            schools_collection_id: config.schools_collection_id.clone(),
        })
    }
}
