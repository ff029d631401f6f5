//! Defines the page listing all transactions.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, base, render_alert},
    transaction::StoredTransaction,
};

fn transactions_view(transactions: &[StoredTransaction]) -> Markup {
    let table_row = |stored: &StoredTransaction| {
        let transaction = stored.transaction();
        let delete_url = transaction
            .id()
            .map(|id| endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, id));

        html!(
            tr
            {
                td style=(TABLE_CELL_STYLE) { (transaction.name()) }
                td style=(TABLE_CELL_STYLE) { (format!("{:.2}", transaction.amount())) }
                td style=(TABLE_CELL_STYLE) { (transaction.kind()) }
                td style=(TABLE_CELL_STYLE)
                {
                    @if transaction.payed() { "paid" } @else { "unpaid" }
                }
                td style=(TABLE_CELL_STYLE)
                {
                    @if let Some(date) = transaction.payment_date() { (date) } @else { "—" }
                }
                td style=(TABLE_CELL_STYLE)
                {
                    @if let Some(date) = transaction.due_date() { (date) } @else { "—" }
                }
                td style=(TABLE_CELL_STYLE) { (transaction.description().unwrap_or("")) }
                td style=(TABLE_CELL_STYLE)
                {
                    @if let Some(delete_url) = delete_url {
                        form method="post" action=(delete_url)
                        {
                            button type="submit" { "Delete" }
                        }
                    }
                }
            }
        )
    };

    html!(
        div
        {
            h1 { "Transactions" }

            p
            {
                a href=(endpoints::NEW_TRANSACTION_VIEW) { "New transaction" }
            }

            @if transactions.is_empty() {
                p { "No transactions yet." }
            } @else {
                table
                {
                    thead
                    {
                        tr
                        {
                            th style=(TABLE_HEADER_STYLE) { "Name" }
                            th style=(TABLE_HEADER_STYLE) { "Amount" }
                            th style=(TABLE_HEADER_STYLE) { "Type" }
                            th style=(TABLE_HEADER_STYLE) { "Status" }
                            th style=(TABLE_HEADER_STYLE) { "Payment date" }
                            th style=(TABLE_HEADER_STYLE) { "Due date" }
                            th style=(TABLE_HEADER_STYLE) { "Description" }
                            th style=(TABLE_HEADER_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for stored in transactions {
                            (table_row(stored))
                        }
                    }
                }
            }
        }
    )
}

/// A route handler that renders the transactions table.
///
/// # Panics
///
/// Panics if the lock for the repository is already held by the same thread.
pub async fn get_transactions_page(State(state): State<AppState>) -> Response {
    let transactions = match state.repository.lock().unwrap().get_all() {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("Could not list transactions: {error}");
            return render_alert(
                error.status_code(),
                "Could not load transactions",
                "An unexpected error occurred, check the server logs for more details.",
            );
        }
    };

    base("Transactions", &transactions_view(&transactions)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, extract::State, response::IntoResponse};
    use serde_json::json;

    use crate::{
        AppState,
        stores::{MemoryTransactionStore, TransactionRepository},
        transaction::TransactionInput,
    };

    use super::get_transactions_page;

    fn state_with_one_transaction() -> AppState {
        let mut store = MemoryTransactionStore::new();
        let data = match json!({
            "name": "rent", "amount": 100.0, "type": "income",
        }) {
            serde_json::Value::Object(data) => data,
            _ => unreachable!(),
        };
        store.save(TransactionInput::new(data)).unwrap();

        AppState::new(Box::new(store))
    }

    #[tokio::test]
    async fn page_lists_saved_transactions() {
        let state = state_with_one_transaction();

        let response = get_transactions_page(State(state)).await.into_response();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("rent"));
        assert!(text.contains("100.00"));
        assert!(text.contains("/transactions/1/delete"));
    }

    #[tokio::test]
    async fn empty_store_renders_placeholder() {
        let state = AppState::new(Box::new(MemoryTransactionStore::new()));

        let response = get_transactions_page(State(state)).await.into_response();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("No transactions yet."));
    }
}
