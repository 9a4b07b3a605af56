//! Pattern-matchable errors for provider calls.
//!
//! Appwrite reports failures as `{ "message", "code", "type" }`. The `type`
//! field is the stable discriminator, so mapping happens on it rather than
//! on the HTTP status. Unrecognized types fall through to [`AppwriteError::Provider`]
//! with the provider's message kept for inline display.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("an account with this email already exists")]
    DuplicateEmail,

    #[error("password rejected: {message}")]
    WeakPassword { message: String },

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("no active session")]
    NotAuthenticated,

    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("a document with this id already exists")]
    DuplicateId,

    #[error("document not found")]
    NotFound,

    #[error("provider error ({kind}): {message}")]
    Provider {
        kind: String,
        message: String,
        code: u16,
    },

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AppwriteError {
    pub(crate) fn invalid_config(message: &str) -> Self {
        AppwriteError::InvalidConfig(message.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: u16,
    #[serde(rename = "type", default)]
    kind: String,
}

pub(crate) fn from_response(status: StatusCode, body: String) -> AppwriteError {
    let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or(ErrorBody {
        message: body,
        code: status.as_u16(),
        kind: String::new(),
    });
    from_error_type(&parsed.kind, parsed.message, parsed.code.max(status.as_u16()))
}

fn from_error_type(kind: &str, message: String, code: u16) -> AppwriteError {
    match kind {
        "user_already_exists" | "user_email_already_exists" => AppwriteError::DuplicateEmail,
        "user_invalid_credentials" => AppwriteError::InvalidCredentials,
        "general_unauthorized_scope" | "user_session_not_found" => AppwriteError::NotAuthenticated,
        "user_unauthorized" | "document_invalid_permissions" => {
            AppwriteError::PermissionDenied { message }
        }
        "document_already_exists" => AppwriteError::DuplicateId,
        "document_not_found" => AppwriteError::NotFound,
        k if k.starts_with("password_") => AppwriteError::WeakPassword { message },
        // Short or breached passwords come back as a generic argument error.
        "general_argument_invalid" if message.to_ascii_lowercase().contains("password") => {
            AppwriteError::WeakPassword { message }
        }
        _ => AppwriteError::Provider {
            kind: kind.to_string(),
            message,
            code,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(kind: &str, message: &str, code: u16) -> String {
        format!(r#"{{"message":"{message}","code":{code},"type":"{kind}","version":"1.6.0"}}"#)
    }

    #[test]
    fn maps_duplicate_email() {
        let err = from_response(
            StatusCode::CONFLICT,
            body("user_already_exists", "A user with the same email already exists", 409),
        );
        assert!(matches!(err, AppwriteError::DuplicateEmail));
    }

    #[test]
    fn maps_invalid_credentials() {
        let err = from_response(
            StatusCode::UNAUTHORIZED,
            body("user_invalid_credentials", "Invalid credentials", 401),
        );
        assert!(matches!(err, AppwriteError::InvalidCredentials));
    }

    #[test]
    fn maps_missing_session_to_not_authenticated() {
        let err = from_response(
            StatusCode::UNAUTHORIZED,
            body("general_unauthorized_scope", "User (role: guests) missing scope", 401),
        );
        assert!(matches!(err, AppwriteError::NotAuthenticated));
    }

    #[test]
    fn maps_password_policy_rejection() {
        let err = from_response(
            StatusCode::BAD_REQUEST,
            body("general_argument_invalid", "Invalid password: must be at least 8 characters", 400),
        );
        assert!(matches!(err, AppwriteError::WeakPassword { .. }));
    }

    #[test]
    fn maps_document_errors() {
        assert!(matches!(
            from_response(StatusCode::NOT_FOUND, body("document_not_found", "not found", 404)),
            AppwriteError::NotFound
        ));
        assert!(matches!(
            from_response(StatusCode::CONFLICT, body("document_already_exists", "exists", 409)),
            AppwriteError::DuplicateId
        ));
    }

    #[test]
    fn unknown_type_keeps_provider_message() {
        let err = from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            body("general_unknown", "Something broke", 500),
        );
        match err {
            AppwriteError::Provider { kind, message, code } => {
                assert_eq!(kind, "general_unknown");
                assert_eq!(message, "Something broke");
                assert_eq!(code, 500);
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let err = from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>".to_string());
        match err {
            AppwriteError::Provider { code, .. } => assert_eq!(code, 502),
            other => panic!("expected Provider, got {other:?}"),
        }
    }
}
