//! Document operations.

use serde_json::json;
use tracing::debug;

use crate::models::Document;
use crate::{AppwriteClient, AppwriteError};

/// Databases API group, borrowed from an [`AppwriteClient`].
pub struct Databases<'a> {
    client: &'a AppwriteClient,
}

impl<'a> Databases<'a> {
    pub(crate) fn new(client: &'a AppwriteClient) -> Self {
        Self { client }
    }

    /// Create a document with explicit per-document permissions.
    ///
    /// Fails with [`AppwriteError::DuplicateId`] when `document_id` is taken
    /// and [`AppwriteError::PermissionDenied`] when the caller may not write
    /// to the collection.
    pub async fn create_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: serde_json::Map<String, serde_json::Value>,
        permissions: Vec<String>,
    ) -> Result<Document, AppwriteError> {
        debug!(database_id, collection_id, document_id, "creating document");
        self.client
            .post(
                &format!("/databases/{database_id}/collections/{collection_id}/documents"),
                &json!({
                    "documentId": document_id,
                    "data": data,
                    "permissions": permissions,
                }),
            )
            .await
    }

    /// Fetch a document by id.
    pub async fn get_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Document, AppwriteError> {
        self.client
            .get(&format!(
                "/databases/{database_id}/collections/{collection_id}/documents/{document_id}"
            ))
            .await
    }
}
