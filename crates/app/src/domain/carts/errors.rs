//! Cart service errors.

use std::fmt;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{carts::data::MAX_LINE_QUANTITY, catalog::CatalogError};

/// A single failed validation check, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("quantity must be between 0 and {MAX_LINE_QUANTITY}")]
    InvalidQuantity,

    #[error("invalid address")]
    InvalidAddress(Vec<FieldError>),

    #[error("{0}")]
    InvalidState(&'static str),

    #[error("cart was modified concurrently")]
    ConcurrentModification,

    #[error("invalid date filter")]
    InvalidDateFilter(#[from] jiff::Error),

    #[error("failed to encode cart document")]
    Encode(#[from] serde_json::Error),

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // A duplicate cart key can only come from two writers racing to
            // create the same document.
            Some(ErrorKind::UniqueViolation) => Self::ConcurrentModification,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<CatalogError> for CartsServiceError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound => Self::ProductNotFound,
            CatalogError::AlreadyExists | CatalogError::InvalidData => Self::InvalidData,
            CatalogError::Sql(source) => Self::Sql(source),
        }
    }
}
