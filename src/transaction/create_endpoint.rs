//! Defines the endpoint the new transaction form posts to.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    AppState, endpoints,
    html::render_alert,
    transaction::{CreateTransaction, TransactionInput},
};

/// The form data for creating a transaction.
///
/// Everything arrives as strings; the coercion to typed values is the
/// normalizer's job, not the form's.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The display name of the transaction.
    pub name: String,
    /// The amount of money, as typed.
    pub amount: String,
    /// The transaction type (`income` or `expense`).
    #[serde(rename = "type")]
    pub kind: String,
    /// The checkbox value, present when ticked.
    #[serde(default)]
    pub payed: Option<String>,
    /// When the transaction was paid, `YYYY-MM-DD`.
    #[serde(default)]
    pub payment_date: Option<String>,
    /// When the transaction is due, `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Free-text note.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<TransactionForm> for TransactionInput {
    fn from(form: TransactionForm) -> Self {
        let mut data = Map::new();
        data.insert("name".to_owned(), Value::from(form.name));
        data.insert("amount".to_owned(), Value::from(form.amount));
        data.insert("type".to_owned(), Value::from(form.kind));

        if let Some(payed) = form.payed {
            data.insert("payed".to_owned(), Value::from(payed));
        }
        insert_if_present(&mut data, "paymentDate", form.payment_date);
        insert_if_present(&mut data, "dueDate", form.due_date);
        insert_if_present(&mut data, "description", form.description);

        TransactionInput::new(data)
    }
}

fn insert_if_present(data: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        data.insert(key.to_owned(), Value::from(value));
    }
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
///
/// # Panics
///
/// Panics if the lock for the repository is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let input = TransactionInput::from(form);

    let mut repository = state.repository.lock().unwrap();

    match CreateTransaction::new(repository.as_mut()).execute(Some(input)) {
        Ok(_) => Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response(),
        Err(error) => {
            tracing::warn!("Could not create transaction: {error}");
            render_alert(
                error.status_code(),
                "Could not create transaction",
                &error.to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;

    use crate::{AppState, stores::MemoryTransactionStore};

    use super::{TransactionForm, create_transaction_endpoint};

    fn get_test_state() -> AppState {
        AppState::new(Box::new(MemoryTransactionStore::new()))
    }

    fn rent_form() -> TransactionForm {
        TransactionForm {
            name: "rent".to_owned(),
            amount: "100.0".to_owned(),
            kind: "income".to_owned(),
            payed: Some("1".to_owned()),
            payment_date: Some("2022-01-01".to_owned()),
            due_date: Some("2022-01-01".to_owned()),
            description: Some("d".to_owned()),
        }
    }

    #[tokio::test]
    async fn can_create_transaction_from_form() {
        let state = get_test_state();

        let response = create_transaction_endpoint(State(state.clone()), Form(rent_form()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        // The first transaction gets ID 1.
        let repository = state.repository.lock().unwrap();
        let stored = repository.get_by_id(1).unwrap().unwrap();
        assert_eq!(stored.transaction().name(), "rent");
        assert!(stored.transaction().payed());
    }

    #[tokio::test]
    async fn invalid_form_input_renders_an_error() {
        let state = get_test_state();
        let form = TransactionForm {
            kind: "unknown".to_owned(),
            ..rent_form()
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state.repository.lock().unwrap().get_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unticked_checkbox_means_unpaid() {
        let state = get_test_state();
        let form = TransactionForm {
            payed: None,
            ..rent_form()
        };

        create_transaction_endpoint(State(state.clone()), Form(form)).await;

        let repository = state.repository.lock().unwrap();
        let stored = repository.get_by_id(1).unwrap().unwrap();
        assert!(!stored.transaction().payed());
    }
}
