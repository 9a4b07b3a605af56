//! Permission string builders and id generation.
//!
//! Appwrite expresses document permissions as strings like
//! `read("user:abc123")`; these helpers keep the grammar in one place.

use std::fmt;

use uuid::Uuid;

/// A principal a permission can be granted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// A single account, by id.
    User(String),
    /// Any signed-in account.
    Users,
    /// Everyone, including guests.
    Any,
}

impl Role {
    pub fn user(id: impl Into<String>) -> Self {
        Role::User(id.into())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User(id) => write!(f, "user:{id}"),
            Role::Users => write!(f, "users"),
            Role::Any => write!(f, "any"),
        }
    }
}

/// Builders for the provider's permission grammar.
pub struct Permission;

impl Permission {
    pub fn read(role: Role) -> String {
        format!("read(\"{role}\")")
    }

    pub fn update(role: Role) -> String {
        format!("update(\"{role}\")")
    }

    pub fn delete(role: Role) -> String {
        format!("delete(\"{role}\")")
    }
}

/// Id generation for new provider records.
pub struct ID;

impl ID {
    /// A fresh provider-legal unique id (32 hex chars, generated client-side
    /// so callers know the id before the create call returns).
    pub fn unique() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_grammar_matches_provider() {
        let role = Role::user("abc123");
        assert_eq!(Permission::read(role.clone()), r#"read("user:abc123")"#);
        assert_eq!(Permission::update(role.clone()), r#"update("user:abc123")"#);
        assert_eq!(Permission::delete(role), r#"delete("user:abc123")"#);
    }

    #[test]
    fn builtin_roles_render() {
        assert_eq!(Permission::read(Role::Any), r#"read("any")"#);
        assert_eq!(Permission::read(Role::Users), r#"read("users")"#);
    }

    #[test]
    fn unique_ids_are_provider_legal() {
        let id = ID::unique();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, ID::unique());
    }
}
