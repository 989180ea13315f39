//! Errors

use salvo::http::StatusError;
use tracing::error;

use verdant_app::domain::carts::errors::{CartsServiceError, FieldError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be between 0 and 100")
        }
        CartsServiceError::InvalidAddress(fields) => {
            StatusError::bad_request().brief(format_field_errors(&fields))
        }
        CartsServiceError::InvalidState(message) => StatusError::conflict().brief(message),
        CartsServiceError::ConcurrentModification => {
            StatusError::conflict().brief("Cart was modified concurrently, retry the request")
        }
        CartsServiceError::InvalidDateFilter(_) => {
            StatusError::bad_request().brief("Invalid date filter")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Encode(source) => {
            error!("failed to encode cart document: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn format_field_errors(fields: &[FieldError]) -> String {
    let details = fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");

    format!("Validation failed: {details}")
}
