use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post not found: {0}")]
    PostNotFound(i64),
    #[error("comment not found: {0}")]
    CommentNotFound(i64),
    #[error("group not found: {0}")]
    GroupNotFound(i64),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden")]
    Forbidden,
    #[error("validation failed on {field}")]
    Validation { field: String, messages: Vec<String> },
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        DomainError::Unauthorized(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            messages: vec![message.into()],
        }
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::PostNotFound(_)
            | DomainError::CommentNotFound(_)
            | DomainError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error bodies map a field name (or `detail`) to a list of messages,
    /// so clients can attach them to the offending form field.
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            DomainError::PostNotFound(_)
            | DomainError::CommentNotFound(_)
            | DomainError::GroupNotFound(_) => json!({ "detail": ["Not found."] }),
            DomainError::Unauthorized(message) => json!({ "detail": [message] }),
            DomainError::Forbidden => {
                json!({ "detail": ["You do not have permission to perform this action."] })
            }
            DomainError::Validation { field, messages } => {
                let mut body = serde_json::Map::new();
                body.insert(field.clone(), json!(messages));
                serde_json::Value::Object(body)
            }
            DomainError::Internal(message) => {
                tracing::error!("internal error: {}", message);
                json!({ "detail": ["A server error occurred."] })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
