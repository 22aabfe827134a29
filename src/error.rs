use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use thiserror::Error;

use crate::response::ErrorBody;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// A request body that could not be turned into a product.
    #[error("{0}")]
    DataValidation(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),
}

impl AppError {
    pub fn product_not_found(id: i32) -> Self {
        AppError::NotFound(format!("Product with id '{id}' was not found."))
    }

    /// A failed insert or update is the client's data the database refused.
    pub fn save_failed(err: sea_orm::DbErr) -> Self {
        let detail = match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => detail,
            _ => err.to_string(),
        };
        AppError::DataValidation(format!("Error saving record: {detail}"))
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) | AppError::DataValidation(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string())
            }
            AppError::OrmError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::info!(status = %status, message = %message, "request rejected");
        }

        (status, axum::Json(ErrorBody::new(status, message))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
