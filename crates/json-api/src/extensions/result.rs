//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{debug, error};

/// Map errors to HTTP status errors, logging where appropriate.
pub(crate) trait ResultExt<T> {
    /// Client-side failure: reject with a 400 carrying `context`.
    fn or_400(self, context: &str) -> Result<T, StatusError>;

    /// Server-side failure: log and reply with an opaque 500.
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|err| {
            debug!("{context}: {err}");

            StatusError::bad_request().brief(context)
        })
    }

    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|err| {
            error!("{context}: {err}");

            StatusError::internal_server_error()
        })
    }
}
