//! The transaction domain: the validated entity, the input normalizer, the
//! create use case and the HTTP endpoints.

mod api;
mod create;
mod create_endpoint;
mod delete_endpoint;
mod entity;
mod input;
mod new_transaction_page;
mod transactions_page;

pub use api::{delete_transaction, get_transaction, get_transactions, save_transaction};
pub use create::CreateTransaction;
pub use create_endpoint::{TransactionForm, create_transaction_endpoint};
pub use delete_endpoint::delete_transaction_endpoint;
pub use entity::{StoredTransaction, Transaction, TransactionType};
pub use input::TransactionInput;
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::get_transactions_page;
