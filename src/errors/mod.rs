// Application error type shared by every handler, built on thiserror.
use thiserror::Error;

pub mod api;
pub mod response;

pub use api::{ApiError, ApiResult};
use crate::fields::FieldError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(#[from] FieldError),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type AppResult<T> = Result<T, AppError>;
