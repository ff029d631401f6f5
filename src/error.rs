//! Defines the app level error type and its conversion to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was created with a zero or negative amount.
    #[error("Amount must be greater than 0")]
    InvalidAmount,

    /// A transaction ID must be a positive integer.
    #[error("Id must be greater than 0")]
    InvalidId,

    /// Tried to assign an ID to a transaction that already has one.
    ///
    /// IDs are handed out by the storage backend exactly once. Reassigning
    /// one would silently detach the in-memory copy from the stored row.
    #[error("the transaction already has an id")]
    IdAlreadySet,

    /// The transaction type did not match `income` or `expense`.
    #[error("\"{0}\" is not a valid transaction type")]
    UnknownType(String),

    /// A date field did not parse as a `YYYY-MM-DD` calendar date.
    #[error("{field} is not a valid date: \"{value}\"")]
    InvalidDate {
        /// The name of the offending input field.
        field: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A required input field was absent.
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    /// An input field was present but had an uncoercible type or value.
    #[error("field \"{0}\" has an invalid value")]
    InvalidField(&'static str),

    /// The create-transaction use case was called without input.
    #[error("Input is required")]
    MissingInput,

    /// Tried to update a transaction that does not exist.
    #[error("tried to update a transaction that is not in the store")]
    UpdateMissingTransaction,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    ///
    /// Always distinct from [Error::NotFound]: a storage failure must never
    /// masquerade as an absent row.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidAmount
            | Error::InvalidId
            | Error::IdAlreadySet
            | Error::UnknownType(_)
            | Error::InvalidDate { .. }
            | Error::MissingField(_)
            | Error::InvalidField(_)
            | Error::MissingInput => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound | Error::UpdateMissingTransaction => StatusCode::NOT_FOUND,
            Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // SQL errors are not intended to be shown to the client.
        let message = match self {
            Error::SqlError(error) => {
                tracing::error!("An unexpected error occurred: {}", error);
                "an internal error occurred".to_owned()
            }
            error => error.to_string(),
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
