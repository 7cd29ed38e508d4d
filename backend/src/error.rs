//! Error handling for the Agrimarket platform
//!
//! Maps application failures onto the wire contract: a read of an unknown
//! id gives 404, failed validation gives 400 with a field-level error
//! list, and anything unexpected gives a generic 500 with no internals
//! leaked to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FieldError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    /// A valid request referencing a nonexistent id.
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// A request body that failed schema validation.
    pub fn invalid(what: &str, errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: format!("Invalid {what} data"),
            errors,
        }
    }

    /// An unexpected failure, described to the client only by the action
    /// that did not complete. No in-memory operation produces one today;
    /// the 500 shape is part of the wire contract.
    pub fn internal(action: &str) -> Self {
        Self::Internal {
            message: format!("Failed to {action}"),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound { entity } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    message: format!("{entity} not found"),
                    errors: None,
                },
            ),
            AppError::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: message.clone(),
                    errors: Some(errors.clone()),
                },
            ),
            AppError::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    message: message.clone(),
                    errors: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn rendered(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Test a missing entity renders 404 with a bare message body
    #[tokio::test]
    async fn test_not_found_renders_404() {
        let (status, body) = rendered(AppError::not_found("Product")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Product not found" }));
    }

    /// Test failed validation renders 400 with the field-level list
    #[tokio::test]
    async fn test_validation_renders_400_with_field_list() {
        let errors = vec![FieldError::new("price", "required")];
        let (status, body) = rendered(AppError::invalid("product", errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid product data");
        assert_eq!(
            body["errors"],
            json!([{ "field": "price", "message": "required" }])
        );
    }

    /// Test an internal failure renders 500 naming only the action
    #[tokio::test]
    async fn test_internal_renders_500_without_details() {
        let (status, body) = rendered(AppError::internal("create rental")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Failed to create rental" }));
    }
}
