//! Error handling for the marketplace client
//!
//! Every failure is caught at the call site and turned into a user-facing
//! message; nothing here is fatal to the process.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use shared::PasswordRuleError;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Limit reached: at most {limit} {resource}")]
    LimitReached { resource: &'static str, limit: usize },

    #[error("Business profile has not been created yet")]
    ProfileRequired,

    // Authorization errors
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Access denied: {0}")]
    Forbidden(String),

    // Server-reported errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    // Transport errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to read local file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// How a failure should be treated by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Blocking; the operation was not attempted
    Validation,
    /// Requires signing in again
    Authorization,
    /// Network or server failure; the operation was abandoned
    Transient,
}

/// Error body shapes the backend sends
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ClientError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Map a non-success response to an error
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation {
                field: String::new(),
                message,
            },
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation { .. }
            | ClientError::LimitReached { .. }
            | ClientError::ProfileRequired => ErrorKind::Validation,
            ClientError::Unauthorized | ClientError::Forbidden(_) => ErrorKind::Authorization,
            _ => ErrorKind::Transient,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Message suitable for an alert or inline error
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation { message, .. } => message.clone(),
            ClientError::LimitReached { resource, limit } => {
                format!("You can add at most {} {}", limit, resource)
            }
            ClientError::ProfileRequired => {
                "Please save your business profile first".to_string()
            }
            ClientError::Unauthorized => "Your session has expired. Please sign in again".to_string(),
            ClientError::Forbidden(_) => "You do not have access to this feature".to_string(),
            ClientError::NotFound(message)
            | ClientError::Conflict(message)
            | ClientError::Api { message, .. } => message.clone(),
            ClientError::Network(_) => {
                "Could not reach the server. Check your connection and try again".to_string()
            }
            ClientError::Decode(_) | ClientError::Internal(_) => {
                "Something went wrong. Please try again".to_string()
            }
            ClientError::Io(_) => "The selected file could not be read".to_string(),
            ClientError::Configuration(message) => message.clone(),
        }
    }
}

impl From<PasswordRuleError> for ClientError {
    fn from(err: PasswordRuleError) -> Self {
        let field = match err {
            PasswordRuleError::TooShort | PasswordRuleError::SameAsCurrent => "new_password",
            PasswordRuleError::ConfirmationMismatch => "confirm_password",
        };
        ClientError::validation(field, err.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let first = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| errs.iter().map(move |e| (field, e)))
            .next();

        match first {
            Some((field, err)) => ClientError::Validation {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field)),
            },
            None => ClientError::validation("", errors.to_string()),
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    if let Some(detail) = parsed.detail {
        match detail {
            serde_json::Value::String(s) => return Some(s),
            // FastAPI style validation list: [{"msg": "..."}]
            serde_json::Value::Array(items) => {
                if let Some(msg) = items
                    .first()
                    .and_then(|i| i.get("msg"))
                    .and_then(|m| m.as_str())
                {
                    return Some(msg.to_string());
                }
            }
            _ => {}
        }
    }

    parsed.message.or(parsed.error)
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(ClientError::from_response(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(matches!(
            ClientError::from_response(StatusCode::FORBIDDEN, r#"{"detail": "Admins only"}"#),
            ClientError::Forbidden(m) if m == "Admins only"
        ));
        assert!(matches!(
            ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            ClientError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_detail_list_message() {
        let body = r#"{"detail": [{"loc": ["body", "business_name"], "msg": "field required"}]}"#;
        match ClientError::from_response(StatusCode::UNPROCESSABLE_ENTITY, body) {
            ClientError::Validation { message, .. } => assert_eq!(message, "field required"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_message_fallback_to_reason() {
        match ClientError::from_response(StatusCode::BAD_GATEWAY, "<html>") {
            ClientError::Api { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ClientError::ProfileRequired.kind(), ErrorKind::Validation);
        assert_eq!(ClientError::Unauthorized.kind(), ErrorKind::Authorization);
        assert_eq!(
            ClientError::Api {
                status: 503,
                message: "down".into()
            }
            .kind(),
            ErrorKind::Transient
        );
    }

    #[test]
    fn test_password_rule_conversion() {
        let err: ClientError = PasswordRuleError::ConfirmationMismatch.into();
        match err {
            ClientError::Validation { field, message } => {
                assert_eq!(field, "confirm_password");
                assert_eq!(message, "Passwords do not match");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
