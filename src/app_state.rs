//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use crate::stores::TransactionRepository;

/// The state of the web server.
///
/// The repository is behind a mutex because the in-memory backend has no
/// internal synchronization and a SQLite connection must not be used from two
/// threads at once. Handlers lock it for the duration of one storage call.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend for transactions.
    pub repository: Arc<Mutex<Box<dyn TransactionRepository>>>,
}

impl AppState {
    /// Create a new [AppState] over the given storage backend.
    pub fn new(repository: Box<dyn TransactionRepository>) -> Self {
        Self {
            repository: Arc::new(Mutex::new(repository)),
        }
    }
}
