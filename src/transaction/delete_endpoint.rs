//! Defines the endpoint the per-row delete button posts to.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{AppState, database_id::TransactionId, endpoints, html::render_alert};

/// A route handler for deleting a transaction, redirects to the transactions
/// view afterwards. Deleting an ID that is already gone still redirects; the
/// outcome the user asked for holds either way.
///
/// # Panics
///
/// Panics if the lock for the repository is already held by the same thread.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.repository.lock().unwrap().delete(transaction_id) {
        Ok(()) => Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            render_alert(
                error.status_code(),
                "Could not delete transaction",
                "An unexpected error occurred. Try again later or check the logs on the server.",
            )
        }
    }
}
