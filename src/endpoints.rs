//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The page listing all transactions.
pub const TRANSACTIONS_VIEW: &str = "/";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The route the create form posts to.
pub const CREATE_TRANSACTION: &str = "/transactions";
/// The route the per-row delete button posts to.
pub const DELETE_TRANSACTION: &str = "/transactions/{transaction_id}/delete";

/// The route to list or save transactions as JSON.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to access a single transaction as JSON.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };
    let Some(param_end) = endpoint_path[param_start..].find('}') else {
        return endpoint_path.to_owned();
    };

    let mut formatted = endpoint_path[..param_start].to_owned();
    formatted.push_str(&id.to_string());
    formatted.push_str(&endpoint_path[param_start + param_end + 1..]);

    formatted
}
