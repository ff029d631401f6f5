//! The create-transaction use case.

use crate::{
    Error,
    stores::TransactionRepository,
    transaction::{StoredTransaction, TransactionInput},
};

/// Orchestrates normalization and persistence for the create/update flow.
///
/// The heavy lifting happens in the repository's `save`, which normalizes the
/// input itself; this type pins down the application-level contract that a
/// request without input is its own error rather than a panic or a silent
/// no-op.
pub struct CreateTransaction<'a> {
    repository: &'a mut dyn TransactionRepository,
}

impl<'a> CreateTransaction<'a> {
    /// Create the use case over the given repository.
    pub fn new(repository: &'a mut dyn TransactionRepository) -> Self {
        Self { repository }
    }

    /// Normalize and persist `input`, returning the stored transaction.
    ///
    /// # Errors
    /// Returns [Error::MissingInput] when called without input; otherwise the
    /// normalizer's and repository's errors pass through unchanged.
    pub fn execute(
        &mut self,
        input: Option<TransactionInput>,
    ) -> Result<StoredTransaction, Error> {
        let input = input.ok_or(Error::MissingInput)?;

        tracing::debug!("creating transaction from {input:?}");

        self.repository.save(input)
    }
}
