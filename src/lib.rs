//! Centavo is a small web app for keeping a ledger of income and expense
//! transactions.
//!
//! The library provides the validated transaction entity, an input normalizer
//! for loosely-typed form/JSON data, a storage abstraction with in-memory and
//! SQLite backends, and the HTTP routes serving both HTML pages and a JSON
//! API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
mod endpoints;
mod error;
mod html;
mod routing;
mod stores;
mod transaction;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use error::Error;
pub use routing::build_router;
pub use stores::{Backend, TransactionRepository, create_repository};

/// An async task that waits for ctrl+c or SIGTERM and then asks the server to
/// shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl+c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = ctrl_c => "ctrl+c",
        _ = terminate => "terminate",
    };

    tracing::debug!("Received {received} signal, shutting down.");
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
