// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Workflows
// (sign-in, registration) are domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseIdentityService)

use async_trait::async_trait;
use thiserror::Error;

use crate::domains::auth::{Identity, SessionRef};

/// Failure modes of the hosted identity & document provider, per its
/// capability contract. Pattern-matchable so workflows can branch on the
/// cases they handle (duplicate email, missing document) and forward the
/// rest as display messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("no active session")]
    NotAuthenticated,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    DuplicateEmail,

    #[error("{0}")]
    WeakPassword(String),

    #[error("permission denied")]
    PermissionDenied,

    #[error("a record with this id already exists")]
    DuplicateId,

    #[error("record not found")]
    NotFound,

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

/// A stored document: its id, its access grants, and the collection fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub id: String,
    pub permissions: Vec<String>,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// Identity Service Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseIdentityService: Send + Sync {
    /// Fetch the identity behind the current session, if any.
    async fn get_current_identity(&self) -> Result<Identity, ProviderError>;

    /// Create a session from credentials.
    async fn create_session(&self, email: &str, password: &str)
        -> Result<SessionRef, ProviderError>;

    /// Destroy a session. `"current"` refers to the active session.
    async fn destroy_session(&self, session_ref: &str) -> Result<(), ProviderError>;

    /// Register a new identity.
    async fn create_identity(
        &self,
        unique_id: &str,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, ProviderError>;
}

// =============================================================================
// Document Service Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseDocumentService: Send + Sync {
    /// Create a document with explicit per-document permissions.
    async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        fields: serde_json::Map<String, serde_json::Value>,
        permissions: Vec<String>,
    ) -> Result<DocumentRecord, ProviderError>;

    /// Fetch a document by id.
    async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<DocumentRecord, ProviderError>;
}
