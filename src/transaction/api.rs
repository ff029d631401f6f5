//! Defines the JSON API for transactions.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::{CreateTransaction, StoredTransaction, TransactionInput},
};

/// A route handler returning all transactions as a JSON array, ordered by ID
/// ascending.
///
/// # Panics
///
/// Panics if the lock for the repository is already held by the same thread.
pub async fn get_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredTransaction>>, Error> {
    let transactions = state.repository.lock().unwrap().get_all()?;

    Ok(Json(transactions))
}

/// A route handler returning a single transaction as JSON.
///
/// Responds with 404 if the ID does not refer to a stored transaction.
///
/// # Panics
///
/// Panics if the lock for the repository is already held by the same thread.
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<StoredTransaction>, Error> {
    match state.repository.lock().unwrap().get_by_id(transaction_id)? {
        Some(stored) => Ok(Json(stored)),
        None => Err(Error::NotFound),
    }
}

/// A route handler that creates or updates a transaction from a JSON body.
///
/// A body without an `id` inserts and responds with 201; a body with an `id`
/// updates the matching transaction and responds with 200. Validation
/// failures respond with 422 before any persistence is attempted.
///
/// # Panics
///
/// Panics if the lock for the repository is already held by the same thread.
pub async fn save_transaction(
    State(state): State<AppState>,
    Json(data): Json<Map<String, Value>>,
) -> Result<Response, Error> {
    let input = TransactionInput::new(data);
    let is_update = input.has_id();

    let mut repository = state.repository.lock().unwrap();
    let stored = CreateTransaction::new(repository.as_mut()).execute(Some(input))?;

    let status_code = if is_update {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status_code, Json(stored)).into_response())
}

/// A route handler for deleting a transaction.
///
/// Responds with 204 whether or not the ID referred to a stored transaction;
/// the requested outcome holds either way.
///
/// # Panics
///
/// Panics if the lock for the repository is already held by the same thread.
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    state.repository.lock().unwrap().delete(transaction_id)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{AppState, build_router, stores::MemoryTransactionStore};

    fn get_test_server() -> TestServer {
        let state = AppState::new(Box::new(MemoryTransactionStore::new()));

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn rent_body() -> Value {
        json!({
            "name": "rent",
            "amount": 100.0,
            "payed": true,
            "type": "income",
            "paymentDate": "2022-01-01",
            "dueDate": "2022-01-01",
            "description": "d",
        })
    }

    #[tokio::test]
    async fn post_creates_a_transaction_with_id_one() {
        let server = get_test_server();

        let response = server.post("/api/transactions").json(&rent_body()).await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "rent");
        assert_eq!(body["type"], "income");
        assert_eq!(body["paymentDate"], "2022-01-01");
    }

    #[tokio::test]
    async fn post_with_id_updates_instead_of_inserting() {
        let server = get_test_server();
        server.post("/api/transactions").json(&rent_body()).await;

        let mut body = rent_body();
        body["id"] = json!(1);
        body["name"] = json!("new name");
        let response = server.post("/api/transactions").json(&body).await;

        response.assert_status_ok();
        let updated: Value = response.json();
        assert_eq!(updated["id"], 1);
        assert_eq!(updated["name"], "new name");

        let all: Value = server.get("/api/transactions").await.json();
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_is_empty_then_grows() {
        let server = get_test_server();

        let empty: Value = server.get("/api/transactions").await.json();
        assert_eq!(empty, json!([]));

        server.post("/api/transactions").json(&rent_body()).await;

        let listed: Value = server.get("/api/transactions").await.json();
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_of_unknown_id_is_not_found() {
        let server = get_test_server();

        let response = server.get("/api/transactions/999").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn post_with_unknown_type_is_unprocessable() {
        let server = get_test_server();
        let mut body = rent_body();
        body["type"] = json!("unknown");

        let response = server.post("/api/transactions").json(&body).await;

        response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = response.json();
        assert!(error["error"].as_str().unwrap().contains("unknown"));

        let all: Value = server.get("/api/transactions").await.json();
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn delete_responds_no_content_even_for_absent_ids() {
        let server = get_test_server();
        server.post("/api/transactions").json(&rent_body()).await;

        let response = server.delete("/api/transactions/1").await;
        response.assert_status(axum::http::StatusCode::NO_CONTENT);

        let again = server.delete("/api/transactions/1").await;
        again.assert_status(axum::http::StatusCode::NO_CONTENT);

        let all: Value = server.get("/api/transactions").await.json();
        assert_eq!(all, json!([]));
    }

    #[tokio::test]
    async fn get_by_id_is_idempotent() {
        let server = get_test_server();
        server.post("/api/transactions").json(&rent_body()).await;

        let first: Value = server.get("/api/transactions/1").await.json();
        let second: Value = server.get("/api/transactions/1").await.json();

        assert_eq!(first, second);
    }
}
