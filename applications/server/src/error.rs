/// Server error types
use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use moon_core::MoonError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Reasons a caller is not authenticated. All of them answer 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingToken,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect username or password")]
    BadCredentials,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A request part axum could not extract (bad JSON, missing query, ...)
    #[error("Invalid request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Database error: {0}")]
    Database(#[from] MoonError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl ServerError {
    /// HTTP status this error answers with
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::BadRequest(_) | ServerError::UnsupportedMediaType(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Rejected { status, .. } => *status,
            ServerError::Database(e) => match e {
                MoonError::NotFound { .. } => StatusCode::NOT_FOUND,
                MoonError::Duplicate(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Config(_)
            | ServerError::Io(_)
            | ServerError::Jwt(_)
            | ServerError::Bcrypt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

macro_rules! rejection_into_server_error {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for ServerError {
                fn from(rejection: $rejection) -> Self {
                    ServerError::Rejected {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

rejection_into_server_error!(JsonRejection, QueryRejection, FormRejection, PathRejection);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match self {
            ServerError::Auth(e) => {
                let body = Json(json!({ "error": e.to_string() }));
                return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
            }
            ServerError::Forbidden(msg)
            | ServerError::NotFound(msg)
            | ServerError::Conflict(msg)
            | ServerError::BadRequest(msg)
            | ServerError::UnsupportedMediaType(msg)
            | ServerError::Validation(msg)
            | ServerError::Rejected { message: msg, .. } => msg,
            ServerError::Database(ref e) if status.is_server_error() => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            ServerError::Database(e) => e.to_string(),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                "Configuration error".to_string()
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                "IO error".to_string()
            }
            ServerError::Jwt(ref e) => {
                tracing::error!("JWT error: {:?}", e);
                "Token error".to_string()
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                "Password error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
