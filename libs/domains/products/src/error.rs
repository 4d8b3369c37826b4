use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// The store refused the record (blank name, unknown category or supplier)
    #[error("Invalid product: {0}")]
    Validation(String),

    #[error("Path id {path} does not match body id {body}")]
    IdMismatch { path: i32, body: i32 },

    #[error("Producto {0} not found")]
    NotFound(i32),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::ConstraintViolation(msg),
            e @ ProductError::IdMismatch { .. } => AppError::BadRequest(e.to_string()),
            e @ ProductError::NotFound(_) => AppError::NotFound(e.to_string()),
            ProductError::StoreUnavailable(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                ProductError::Validation(format!("unknown categoria or proveedor: {}", detail))
            }
            _ => {
                let message = err.to_string();
                if message.contains("violates check constraint") {
                    ProductError::Validation("nombre must not be empty".to_string())
                } else if message.contains("numeric field overflow") {
                    // SQLSTATE 22003
                    ProductError::Validation("precio is out of range".to_string())
                } else {
                    ProductError::StoreUnavailable(message)
                }
            }
        }
    }
}
