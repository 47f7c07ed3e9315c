use thiserror::Error;

use crate::storage::StorageError;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Dialog(#[from] dialoguer::Error),
    #[error("amount must be a finite number")]
    InvalidAmount,
    #[error("invalid answer: {0}")]
    InvalidAnswer(String),
    #[error("no price found in '{0}'")]
    PriceNotFound(String),
}
