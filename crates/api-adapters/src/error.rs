//! Web-facing error type. Domain failures map onto HTTP status codes
//! here so handlers can lean on `?` throughout.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domains::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("metrics encoding error: {0}")]
    Metrics(#[from] std::fmt::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Domain(DomainError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                format!("{entity} {id} not found"),
            )
                .into_response(),
            AppError::Domain(DomainError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            // Store and rendering faults stay opaque to the client.
            other => {
                tracing::error!("Request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::Domain(DomainError::not_found("forum", 7));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Domain(DomainError::Validation("name is required".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn persistence_maps_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = AppError::Domain(DomainError::persistence(io));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
