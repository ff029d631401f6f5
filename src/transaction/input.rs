//! Normalizes loosely-typed external input into a validated [Transaction].

use serde_json::{Map, Value};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, transaction::{Transaction, TransactionType}};

/// The calendar date format accepted for `paymentDate` and `dueDate`.
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Raw transaction data as it arrives from a form or a JSON request body: a
/// mapping of field name to a loosely-typed value.
///
/// The input is consumed once by [TransactionInput::normalize], which applies
/// the coercion rules (string amounts, truthy `payed` flags, `YYYY-MM-DD`
/// dates) and hands back a validated [Transaction]. Fields set to JSON `null`
/// are treated the same as absent fields.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    data: Map<String, Value>,
}

impl TransactionInput {
    /// Wrap a raw field mapping.
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Whether the input carries an `id` field, i.e. addresses an existing
    /// transaction.
    pub fn has_id(&self) -> bool {
        matches!(self.data.get("id"), Some(value) if !value.is_null())
    }

    /// Convert the raw input into a validated [Transaction].
    ///
    /// # Errors
    /// Returns a [Error::MissingField] or [Error::InvalidField] for absent or
    /// uncoercible fields, [Error::UnknownType] for a bad `type`,
    /// [Error::InvalidDate] for a malformed date, and passes through the
    /// entity's own construction errors ([Error::InvalidAmount],
    /// [Error::InvalidId]).
    pub fn normalize(self) -> Result<Transaction, Error> {
        let name = match self.data.get("name") {
            None | Some(Value::Null) => return Err(Error::MissingField("name")),
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(Error::InvalidField("name")),
        };

        let amount = self.extract_amount()?;
        let payed = self.extract_payed()?;

        let kind = match self.data.get("type") {
            None | Some(Value::Null) => return Err(Error::MissingField("type")),
            Some(Value::String(kind)) => TransactionType::parse(kind)?,
            Some(_) => return Err(Error::InvalidField("type")),
        };

        let payment_date = self.extract_date("paymentDate")?;
        let due_date = self.extract_date("dueDate")?;

        let description = match self.data.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(description)) => Some(description.clone()),
            Some(_) => return Err(Error::InvalidField("description")),
        };

        let mut transaction = Transaction::new(
            name,
            amount,
            payed,
            kind,
            payment_date,
            due_date,
            description,
        )?;

        // The id is not a constructor parameter; it is attached through the
        // entity's own mutator so the id > 0 invariant applies here too.
        if let Some(id) = self.extract_id()? {
            transaction.set_id(id)?;
        }

        Ok(transaction)
    }

    fn extract_amount(&self) -> Result<f64, Error> {
        match self.data.get("amount") {
            None | Some(Value::Null) => Err(Error::MissingField("amount")),
            Some(Value::Number(amount)) => {
                amount.as_f64().ok_or(Error::InvalidField("amount"))
            }
            Some(Value::String(amount)) => amount
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidField("amount")),
            Some(_) => Err(Error::InvalidField("amount")),
        }
    }

    fn extract_payed(&self) -> Result<bool, Error> {
        match self.data.get("payed") {
            // Absent means unpaid.
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(payed)) => Ok(*payed),
            Some(Value::Number(payed)) => Ok(payed.as_f64() != Some(0.0)),
            Some(Value::String(payed)) => {
                let payed = payed.trim();
                if payed.eq_ignore_ascii_case("true")
                    || payed.eq_ignore_ascii_case("on")
                    || payed == "1"
                {
                    Ok(true)
                } else if payed.eq_ignore_ascii_case("false") || payed == "0" || payed.is_empty() {
                    Ok(false)
                } else {
                    Err(Error::InvalidField("payed"))
                }
            }
            Some(_) => Err(Error::InvalidField("payed")),
        }
    }

    fn extract_date(&self, field: &'static str) -> Result<Option<Date>, Error> {
        match self.data.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Date::parse(value, DATE_FORMAT)
                .map(Some)
                .map_err(|_| Error::InvalidDate {
                    field,
                    value: value.clone(),
                }),
            Some(value) => Err(Error::InvalidDate {
                field,
                value: value.to_string(),
            }),
        }
    }

    fn extract_id(&self) -> Result<Option<i64>, Error> {
        match self.data.get("id") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(id)) => id.as_i64().map(Some).ok_or(Error::InvalidField("id")),
            Some(Value::String(id)) => id
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| Error::InvalidField("id")),
            Some(_) => Err(Error::InvalidField("id")),
        }
    }
}

impl From<Map<String, Value>> for TransactionInput {
    fn from(data: Map<String, Value>) -> Self {
        Self::new(data)
    }
}
