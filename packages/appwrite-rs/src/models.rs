//! Wire types returned by the provider.

use serde::{Deserialize, Serialize};

/// An account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    /// Free-form user preferences; the portal treats these as opaque.
    #[serde(default)]
    pub prefs: serde_json::Value,
}

/// A session created from email/password credentials.
///
/// The credential itself lives in the provider's session cookie; this record
/// only identifies the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Expiry timestamp as reported by the provider (opaque ISO string).
    #[serde(default)]
    pub expire: String,
}

/// A document with its system fields split from the data payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$databaseId", default)]
    pub database_id: String,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    #[serde(rename = "$createdAt", default)]
    pub created_at: String,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: String,
    /// The collection's attributes.
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_from_provider_shape() {
        let user: User = serde_json::from_str(
            r#"{"$id":"abc123","$createdAt":"2025-01-01T00:00:00.000+00:00",
                "name":"Jane Admin","email":"admin@school.ac.ug","prefs":{}}"#,
        )
        .unwrap();
        assert_eq!(user.id, "abc123");
        assert_eq!(user.email, "admin@school.ac.ug");
    }

    #[test]
    fn document_splits_system_fields_from_data() {
        let doc: Document = serde_json::from_str(
            r#"{"$id":"abc123","$collectionId":"schools","$databaseId":"db",
                "$permissions":["read(\"user:abc123\")"],
                "$createdAt":"","$updatedAt":"",
                "schoolName":"Hilltop College","district":"Kampala"}"#,
        )
        .unwrap();
        assert_eq!(doc.id, "abc123");
        assert_eq!(doc.permissions.len(), 1);
        assert_eq!(doc.data["schoolName"], "Hilltop College");
        assert!(!doc.data.contains_key("$id"));
    }
}
