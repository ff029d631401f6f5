//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    transaction::{
        create_transaction_endpoint, delete_transaction, delete_transaction_endpoint,
        get_new_transaction_page, get_transaction, get_transactions, get_transactions_page,
        save_transaction,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::CREATE_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            post(delete_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions).post(save_transaction),
        )
        .route(
            endpoints::TRANSACTION_API,
            get(get_transaction).delete(delete_transaction),
        )
        .with_state(state)
}
