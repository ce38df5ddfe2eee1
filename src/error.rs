//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Html(format!(
            "<!DOCTYPE html>\n<html><head><title>{code}</title></head>\
             <body><h1>{code}</h1><p>{message}</p><p><a href=\"/catalog\">Home</a></p></body></html>",
            code = status,
            message = tera::escape_html(&message),
        ));

        let mut response = (status, body).into_response();
        response
            .extensions_mut()
            .insert(ErrorPage { status, message });
        response
    }
}

/// Status and user-facing message of a failed request.
///
/// Left in the response extensions so the router can re-render the plain
/// body inside the site layout.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Turns a `NotFound` into `None`, for references that may dangle.
pub trait OptionalExt<T> {
    fn optional(self) -> AppResult<Option<T>>;
}

impl<T> OptionalExt<T> for AppResult<T> {
    fn optional(self) -> AppResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
