//! Dashboard-side lookup of the signed-in school's document.
//!
//! The school document is keyed by the identity id, so the dashboard fetch
//! is a single get by id. A missing document is a valid state (an identity
//! whose registration never completed), not an error.

use thiserror::Error;

use crate::domains::auth::AuthService;
use crate::domains::registration::SchoolFields;
use crate::kernel::{PortalDeps, ProviderError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("not signed in")]
    NotAuthenticated,

    #[error("school profile fetch failed: {0}")]
    Provider(String),
}

/// The school document as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolProfile {
    pub identity_id: String,
    pub fields: SchoolFields,
}

/// Fetch the signed-in school's profile. `Ok(None)` means the identity has
/// no school document yet.
pub async fn fetch_school_profile(
    deps: &PortalDeps,
    auth: &AuthService,
) -> Result<Option<SchoolProfile>, ProfileError> {
    let identity = auth
        .current_identity()
        .ok_or(ProfileError::NotAuthenticated)?;

    let record = match deps
        .documents
        .get_document(
            &deps.database_id,
            &deps.schools_collection_id,
            &identity.id,
        )
        .await
    {
        Ok(record) => record,
        Err(ProviderError::NotFound) => return Ok(None),
        Err(ProviderError::NotAuthenticated) => return Err(ProfileError::NotAuthenticated),
        Err(err) => return Err(ProfileError::Provider(err.to_string())),
    };

    let fields = serde_json::from_value(serde_json::Value::Object(record.fields))
        .map_err(|err| ProfileError::Provider(format!("malformed school document: {err}")))?;

    Ok(Some(SchoolProfile {
        identity_id: record.id,
        fields,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domains::registration::form::filled_form;
    use crate::kernel::{test_identity, MockProvider};

    fn deps_for(provider: Arc<MockProvider>) -> PortalDeps {
        PortalDeps::new(provider.clone(), provider, "db", "schools")
    }

    #[tokio::test]
    async fn requires_a_signed_in_identity() {
        let provider = Arc::new(MockProvider::new());
        let auth = AuthService::new(provider.clone());
        auth.initialize().await;

        let err = fetch_school_profile(&deps_for(provider), &auth)
            .await
            .unwrap_err();
        assert_eq!(err, ProfileError::NotAuthenticated);
    }

    #[tokio::test]
    async fn missing_document_is_none_not_an_error() {
        let identity = test_identity("ident-1", "admin@hilltop.ac.ug");
        let provider = Arc::new(MockProvider::new().signed_in_as(identity));
        let auth = AuthService::new(provider.clone());
        auth.initialize().await;

        let profile = fetch_school_profile(&deps_for(provider), &auth)
            .await
            .unwrap();
        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn returns_the_document_keyed_by_the_identity_id() {
        let identity = test_identity("ident-1", "admin@hilltop.ac.ug");
        let provider = Arc::new(MockProvider::new().signed_in_as(identity));
        let deps = deps_for(provider);
        let auth = AuthService::new(deps.identity.clone());
        auth.initialize().await;

        deps.documents
            .create_document(
                "db",
                "schools",
                "ident-1",
                filled_form().document_fields(),
                vec![],
            )
            .await
            .unwrap();

        let profile = fetch_school_profile(&deps, &auth).await.unwrap().unwrap();
        assert_eq!(profile.identity_id, "ident-1");
        assert_eq!(profile.fields.school_name, "Hilltop College");
    }
}
