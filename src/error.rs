//! Typed errors and their envelope mapping.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::NotFound(_) => (404, "not found"),
            AppError::Validation(_) | AppError::BadRequest(_) => (400, "bad request"),
            AppError::Internal(_) => (500, "internal error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (404, "not found")
                } else {
                    (500, "internal error")
                }
            }
        };
        response::error(code, message, &self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound("Product not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let resp = AppError::Validation("name is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_maps_to_500() {
        let resp = AppError::Internal("Failed to create Product: boom".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
