//! Implements an in-memory transaction store.

use std::collections::BTreeMap;

use crate::{
    Error,
    database_id::TransactionId,
    stores::TransactionRepository,
    transaction::{StoredTransaction, Transaction, TransactionInput},
};

/// Stores transactions in process memory.
///
/// Used for tests and for running the app without a database file. The map is
/// keyed by ID so listing comes out in ascending ID order, matching the SQL
/// backend. Instances are not internally synchronized; share one through the
/// app state's mutex.
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    transactions: BTreeMap<TransactionId, Transaction>,
}

impl MemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> TransactionId {
        self.transactions
            .last_key_value()
            .map_or(1, |(id, _)| id + 1)
    }
}

impl TransactionRepository for MemoryTransactionStore {
    fn get_by_id(&self, id: TransactionId) -> Result<Option<StoredTransaction>, Error> {
        Ok(self
            .transactions
            .get(&id)
            .cloned()
            .map(StoredTransaction::new))
    }

    fn get_all(&self) -> Result<Vec<StoredTransaction>, Error> {
        Ok(self
            .transactions
            .values()
            .cloned()
            .map(StoredTransaction::new)
            .collect())
    }

    fn save(&mut self, input: TransactionInput) -> Result<StoredTransaction, Error> {
        let mut transaction = input.normalize()?;

        let id = match transaction.id() {
            Some(id) => {
                if !self.transactions.contains_key(&id) {
                    return Err(Error::UpdateMissingTransaction);
                }
                id
            }
            None => {
                let id = self.next_id();
                transaction.set_id(id)?;
                id
            }
        };

        self.transactions.insert(id, transaction.clone());

        Ok(StoredTransaction::new(transaction))
    }

    fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        self.transactions.remove(&id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{
        Error,
        stores::TransactionRepository,
        transaction::TransactionInput,
    };

    use super::MemoryTransactionStore;

    fn input_from(value: Value) -> TransactionInput {
        match value {
            Value::Object(data) => TransactionInput::new(data),
            _ => panic!("test input must be a JSON object"),
        }
    }

    fn rent_input() -> TransactionInput {
        input_from(json!({
            "name": "rent",
            "amount": 100.0,
            "payed": true,
            "type": "income",
            "paymentDate": "2022-01-01",
            "dueDate": "2022-01-01",
            "description": "d",
        }))
    }

    #[test]
    fn first_save_assigns_id_one() {
        let mut store = MemoryTransactionStore::new();

        let stored = store.save(rent_input()).unwrap();

        assert_eq!(stored.transaction().id(), Some(1));
        assert_eq!(stored.transaction().name(), "rent");
    }

    #[test]
    fn save_with_existing_id_updates_in_place() {
        let mut store = MemoryTransactionStore::new();
        store.save(rent_input()).unwrap();

        let stored = store
            .save(input_from(json!({
                "id": 1,
                "name": "new name",
                "amount": 100.0,
                "payed": true,
                "type": "income",
                "paymentDate": "2022-01-01",
                "dueDate": "2022-01-01",
                "description": "d",
            })))
            .unwrap();

        assert_eq!(stored.transaction().id(), Some(1));
        assert_eq!(stored.transaction().name(), "new name");
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn save_with_unknown_id_is_an_error() {
        let mut store = MemoryTransactionStore::new();

        let result = store.save(input_from(json!({
            "id": 42, "name": "n", "amount": 1, "type": "expense",
        })));

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn get_all_is_empty_then_grows() {
        let mut store = MemoryTransactionStore::new();
        assert!(store.get_all().unwrap().is_empty());

        store.save(rent_input()).unwrap();

        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn get_by_id_returns_none_for_absent_rows() {
        let store = MemoryTransactionStore::new();

        assert_eq!(store.get_by_id(999), Ok(None));
    }

    #[test]
    fn get_by_id_is_idempotent() {
        let mut store = MemoryTransactionStore::new();
        store.save(rent_input()).unwrap();

        let first = store.get_by_id(1).unwrap();
        let second = store.get_by_id(1).unwrap();

        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn ids_keep_growing_after_deletes() {
        let mut store = MemoryTransactionStore::new();
        store.save(rent_input()).unwrap();
        store.save(rent_input()).unwrap();
        store.delete(1).unwrap();

        let stored = store.save(rent_input()).unwrap();

        // max(existing) + 1, not a reused slot.
        assert_eq!(stored.transaction().id(), Some(3));
    }

    #[test]
    fn delete_of_absent_id_is_a_no_op() {
        let mut store = MemoryTransactionStore::new();

        assert_eq!(store.delete(999), Ok(()));
    }

    #[test]
    fn get_all_is_ordered_by_id_ascending() {
        let mut store = MemoryTransactionStore::new();
        for _ in 0..3 {
            store.save(rent_input()).unwrap();
        }

        let ids: Vec<_> = store
            .get_all()
            .unwrap()
            .iter()
            .map(|stored| stored.transaction().id())
            .collect();

        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn validation_failure_leaves_the_store_untouched() {
        let mut store = MemoryTransactionStore::new();

        let result = store.save(input_from(json!({
            "name": "n", "amount": 1, "type": "unknown",
        })));

        assert_eq!(result, Err(Error::UnknownType("unknown".to_owned())));
        assert!(store.get_all().unwrap().is_empty());
    }
}
