//! Defines the core transaction entity and its invariants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

use crate::{Error, database_id::TransactionId};

/// Whether a transaction records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// Parse a transaction type from its wire name.
    ///
    /// # Errors
    /// Returns [Error::UnknownType] for anything other than the exact strings
    /// `income` and `expense`.
    pub fn parse(value: &str) -> Result<Self, Error> {
        match value {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::UnknownType(other.to_owned())),
        }
    }

    /// The wire name of the transaction type.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single financial record: an expense or income with its amount, payment
/// status and optional dates.
///
/// Invariants are enforced at construction time, so a `Transaction` in hand is
/// always valid: the amount is strictly positive and the ID, once assigned by
/// a storage backend via [Transaction::set_id], is a positive integer that
/// cannot be reassigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: Option<TransactionId>,
    name: String,
    amount: f64,
    payed: bool,
    #[serde(rename = "type")]
    kind: TransactionType,
    payment_date: Option<Date>,
    due_date: Option<Date>,
    description: Option<String>,
}

impl Transaction {
    /// Create a new transaction without an ID.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `amount` is zero or negative.
    pub fn new(
        name: String,
        amount: f64,
        payed: bool,
        kind: TransactionType,
        payment_date: Option<Date>,
        due_date: Option<Date>,
        description: Option<String>,
    ) -> Result<Self, Error> {
        if amount <= 0.0 {
            return Err(Error::InvalidAmount);
        }

        Ok(Self {
            id: None,
            name,
            amount,
            payed,
            kind,
            payment_date,
            due_date,
            description,
        })
    }

    /// Assign the storage ID. This can happen at most once per transaction.
    ///
    /// # Errors
    /// Returns [Error::InvalidId] if `id` is zero or negative, or
    /// [Error::IdAlreadySet] if an ID has already been assigned.
    pub fn set_id(&mut self, id: TransactionId) -> Result<(), Error> {
        if id <= 0 {
            return Err(Error::InvalidId);
        }

        if self.id.is_some() {
            return Err(Error::IdAlreadySet);
        }

        self.id = Some(id);

        Ok(())
    }

    /// The storage ID, or `None` if the transaction has not been persisted.
    pub fn id(&self) -> Option<TransactionId> {
        self.id
    }

    /// The display name of the transaction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The amount of money. Always strictly positive.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Whether the transaction has been paid.
    pub fn payed(&self) -> bool {
        self.payed
    }

    /// Whether the transaction is an income or an expense.
    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    /// When the transaction was paid, if known.
    pub fn payment_date(&self) -> Option<Date> {
        self.payment_date
    }

    /// When the transaction is due, if known.
    pub fn due_date(&self) -> Option<Date> {
        self.due_date
    }

    /// A free-text note about the transaction.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Convert the transaction to its canonical field-name mapping.
    ///
    /// The keys match the JSON wire format (`paymentDate`, `dueDate`, ...),
    /// so the output can be fed back through
    /// [TransactionInput](crate::transaction::TransactionInput) unchanged.
    pub fn to_value(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("id".to_owned(), self.id.map_or(Value::Null, Value::from));
        data.insert("name".to_owned(), Value::from(self.name.clone()));
        data.insert("amount".to_owned(), Value::from(self.amount));
        data.insert("payed".to_owned(), Value::from(self.payed));
        data.insert("type".to_owned(), Value::from(self.kind.as_str()));
        data.insert("paymentDate".to_owned(), date_to_value(self.payment_date));
        data.insert("dueDate".to_owned(), date_to_value(self.due_date));
        data.insert(
            "description".to_owned(),
            self.description.clone().map_or(Value::Null, Value::from),
        );

        data
    }
}

fn date_to_value(date: Option<Date>) -> Value {
    // Date's Display impl is the `YYYY-MM-DD` form the normalizer accepts.
    date.map_or(Value::Null, |date| Value::from(date.to_string()))
}

/// A [Transaction] as returned by a storage backend, together with the
/// server-assigned row timestamps.
///
/// This is a wrapper rather than a subtype: the inner transaction keeps its
/// own invariants and the timestamps never feed back into validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredTransaction {
    #[serde(flatten)]
    transaction: Transaction,
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    updated_at: Option<String>,
}

impl StoredTransaction {
    /// Wrap a transaction that has no storage timestamps (e.g. from the
    /// in-memory backend).
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the creation timestamp reported by the storage backend.
    pub fn created_at(mut self, created_at: Option<String>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the last-update timestamp reported by the storage backend.
    pub fn updated_at(mut self, updated_at: Option<String>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// The wrapped transaction.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Unwrap the inner transaction, discarding the timestamps.
    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    /// The canonical field mapping of the inner transaction plus the
    /// `createdAt`/`updatedAt` timestamps.
    pub fn to_value(&self) -> Map<String, Value> {
        let mut data = self.transaction.to_value();
        data.insert(
            "createdAt".to_owned(),
            self.created_at.clone().map_or(Value::Null, Value::from),
        );
        data.insert(
            "updatedAt".to_owned(),
            self.updated_at.clone().map_or(Value::Null, Value::from),
        );

        data
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::Error;

    use super::{StoredTransaction, Transaction, TransactionType};

    fn sample_transaction() -> Transaction {
        Transaction::new(
            "rent".to_owned(),
            100.0,
            true,
            TransactionType::Income,
            Some(date!(2022 - 01 - 01)),
            Some(date!(2022 - 01 - 01)),
            Some("d".to_owned()),
        )
        .unwrap()
    }

    #[test]
    fn new_fails_on_negative_amount() {
        let result = Transaction::new(
            "rent".to_owned(),
            -1.0,
            false,
            TransactionType::Expense,
            None,
            None,
            None,
        );

        assert_eq!(result, Err(Error::InvalidAmount));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Amount must be greater than 0"
        );
    }

    #[test]
    fn new_fails_on_zero_amount() {
        let result = Transaction::new(
            "rent".to_owned(),
            0.0,
            false,
            TransactionType::Expense,
            None,
            None,
            None,
        );

        assert_eq!(result, Err(Error::InvalidAmount));
    }

    #[test]
    fn set_id_fails_on_non_positive_id() {
        let mut transaction = sample_transaction();

        assert_eq!(transaction.set_id(0), Err(Error::InvalidId));
        assert_eq!(transaction.set_id(-5), Err(Error::InvalidId));
        assert_eq!(transaction.id(), None);
    }

    #[test]
    fn set_id_fails_on_second_assignment() {
        let mut transaction = sample_transaction();

        transaction.set_id(1).unwrap();

        assert_eq!(transaction.set_id(2), Err(Error::IdAlreadySet));
        assert_eq!(transaction.id(), Some(1));
    }

    #[test]
    fn accessors_return_constructor_arguments() {
        let transaction = sample_transaction();

        assert_eq!(transaction.name(), "rent");
        assert_eq!(transaction.amount(), 100.0);
        assert!(transaction.payed());
        assert_eq!(transaction.kind(), TransactionType::Income);
        assert_eq!(transaction.payment_date(), Some(date!(2022 - 01 - 01)));
        assert_eq!(transaction.due_date(), Some(date!(2022 - 01 - 01)));
        assert_eq!(transaction.description(), Some("d"));
    }

    #[test]
    fn to_value_uses_canonical_field_names() {
        let mut transaction = sample_transaction();
        transaction.set_id(7).unwrap();

        let data = transaction.to_value();

        assert_eq!(data["id"], 7);
        assert_eq!(data["name"], "rent");
        assert_eq!(data["amount"], 100.0);
        assert_eq!(data["payed"], true);
        assert_eq!(data["type"], "income");
        assert_eq!(data["paymentDate"], "2022-01-01");
        assert_eq!(data["dueDate"], "2022-01-01");
        assert_eq!(data["description"], "d");
    }

    #[test]
    fn stored_transaction_carries_timestamps() {
        let stored = StoredTransaction::new(sample_transaction())
            .created_at(Some("2022-01-01 00:00:00".to_owned()));

        let data = stored.to_value();

        assert_eq!(data["createdAt"], "2022-01-01 00:00:00");
        assert_eq!(data["updatedAt"], serde_json::Value::Null);
    }

    #[test]
    fn parse_type_rejects_unknown_values() {
        assert_eq!(TransactionType::parse("income"), Ok(TransactionType::Income));
        assert_eq!(TransactionType::parse("expense"), Ok(TransactionType::Expense));
        assert_eq!(
            TransactionType::parse("refund"),
            Err(Error::UnknownType("refund".to_owned()))
        );
        // Matching is exact, not case-insensitive.
        assert!(TransactionType::parse("Income").is_err());
    }
}
