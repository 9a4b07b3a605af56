//! Auth domain data types.

/// An authenticated principal, as reported by the identity provider.
///
/// This is a cached, non-authoritative copy held for the lifetime of the
/// browsing session; it is cleared on logout or a failed session check.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Opaque provider preferences.
    pub preferences: serde_json::Value,
}

/// Handle to a session issued by the provider. The credential itself is
/// persisted by the provider (session cookie), not by the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRef {
    pub id: String,
    pub identity_id: String,
}
