//! Scripted in-memory provider for tests.
//!
//! `MockProvider` behaves like the hosted provider for the portal's call
//! surface: accounts keyed by email, one current session, documents keyed by
//! `(collection, id)`. Every call is appended to a log so tests can assert
//! exact call order. Failures are injected per operation.

#![allow(clippy::type_complexity)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domains::auth::{Identity, SessionRef};
use crate::kernel::{
    BaseDocumentService, BaseIdentityService, DocumentRecord, ProviderError,
};

/// One provider call, for order assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    GetCurrentIdentity,
    CreateSession { email: String },
    DestroySession { session_ref: String },
    CreateIdentity { email: String },
    CreateDocument { document_id: String, permissions: Vec<String> },
    GetDocument { document_id: String },
}

#[derive(Default)]
struct MockState {
    /// email -> (password, identity)
    accounts: HashMap<String, (String, Identity)>,
    /// (collection_id, document_id) -> record
    documents: HashMap<(String, String), DocumentRecord>,
    current: Option<Identity>,
    session_counter: u32,
}

#[derive(Default)]
pub struct MockProvider {
    state: Mutex<MockState>,
    calls: Mutex<Vec<ProviderCall>>,
    fail_create_identity: Mutex<Option<ProviderError>>,
    fail_create_session: Mutex<Option<ProviderError>>,
    fail_create_document: Mutex<Option<ProviderError>>,
    fail_destroy_session: Mutex<bool>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing account, optionally already signed in.
    pub fn with_account(self, email: &str, password: &str, identity: Identity) -> Self {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(email.to_string(), (password.to_string(), identity));
        self
    }

    pub fn signed_in_as(self, identity: Identity) -> Self {
        self.state.lock().unwrap().current = Some(identity);
        self
    }

    pub fn fail_next_create_identity(&self, err: ProviderError) {
        *self.fail_create_identity.lock().unwrap() = Some(err);
    }

    pub fn fail_next_create_session(&self, err: ProviderError) {
        *self.fail_create_session.lock().unwrap() = Some(err);
    }

    pub fn fail_next_create_document(&self, err: ProviderError) {
        *self.fail_create_document.lock().unwrap() = Some(err);
    }

    pub fn fail_destroy_session(&self) {
        *self.fail_destroy_session.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn document(&self, collection_id: &str, document_id: &str) -> Option<DocumentRecord> {
        self.state
            .lock()
            .unwrap()
            .documents
            .get(&(collection_id.to_string(), document_id.to_string()))
            .cloned()
    }

    pub fn account_exists(&self, email: &str) -> bool {
        self.state.lock().unwrap().accounts.contains_key(email)
    }

    fn record(&self, call: ProviderCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BaseIdentityService for MockProvider {
    async fn get_current_identity(&self) -> Result<Identity, ProviderError> {
        self.record(ProviderCall::GetCurrentIdentity);
        self.state
            .lock()
            .unwrap()
            .current
            .clone()
            .ok_or(ProviderError::NotAuthenticated)
    }

    async fn create_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionRef, ProviderError> {
        self.record(ProviderCall::CreateSession {
            email: email.to_string(),
        });
        if let Some(err) = self.fail_create_session.lock().unwrap().take() {
            return Err(err);
        }
        let mut state = self.state.lock().unwrap();
        match state.accounts.get(email) {
            Some((stored, identity)) if stored == password => {
                let identity = identity.clone();
                state.current = Some(identity.clone());
                state.session_counter += 1;
                Ok(SessionRef {
                    id: format!("session-{}", state.session_counter),
                    identity_id: identity.id,
                })
            }
            _ => Err(ProviderError::InvalidCredentials),
        }
    }

    async fn destroy_session(&self, session_ref: &str) -> Result<(), ProviderError> {
        self.record(ProviderCall::DestroySession {
            session_ref: session_ref.to_string(),
        });
        if *self.fail_destroy_session.lock().unwrap() {
            return Err(ProviderError::Network("connection reset".to_string()));
        }
        self.state.lock().unwrap().current = None;
        Ok(())
    }

    async fn create_identity(
        &self,
        unique_id: &str,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, ProviderError> {
        self.record(ProviderCall::CreateIdentity {
            email: email.to_string(),
        });
        if let Some(err) = self.fail_create_identity.lock().unwrap().take() {
            return Err(err);
        }
        let mut state = self.state.lock().unwrap();
        if state.accounts.contains_key(email) {
            return Err(ProviderError::DuplicateEmail);
        }
        let identity = Identity {
            id: unique_id.to_string(),
            name: display_name.to_string(),
            email: email.to_string(),
            preferences: serde_json::Value::Null,
        };
        state
            .accounts
            .insert(email.to_string(), (password.to_string(), identity.clone()));
        Ok(identity)
    }
}

#[async_trait]
impl BaseDocumentService for MockProvider {
    async fn create_document(
        &self,
        _database_id: &str,
        collection_id: &str,
        document_id: &str,
        fields: serde_json::Map<String, serde_json::Value>,
        permissions: Vec<String>,
    ) -> Result<DocumentRecord, ProviderError> {
        self.record(ProviderCall::CreateDocument {
            document_id: document_id.to_string(),
            permissions: permissions.clone(),
        });
        if let Some(err) = self.fail_create_document.lock().unwrap().take() {
            return Err(err);
        }
        let mut state = self.state.lock().unwrap();
        let key = (collection_id.to_string(), document_id.to_string());
        if state.documents.contains_key(&key) {
            return Err(ProviderError::DuplicateId);
        }
        let record = DocumentRecord {
            id: document_id.to_string(),
            permissions,
            fields,
        };
        state.documents.insert(key, record.clone());
        Ok(record)
    }

    async fn get_document(
        &self,
        _database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<DocumentRecord, ProviderError> {
        self.record(ProviderCall::GetDocument {
            document_id: document_id.to_string(),
        });
        self.state
            .lock()
            .unwrap()
            .documents
            .get(&(collection_id.to_string(), document_id.to_string()))
            .cloned()
            .ok_or(ProviderError::NotFound)
    }
}

/// A throwaway identity for tests.
pub fn test_identity(id: &str, email: &str) -> Identity {
    Identity {
        id: id.to_string(),
        name: "Test Admin".to_string(),
        email: email.to_string(),
        preferences: serde_json::Value::Null,
    }
}
