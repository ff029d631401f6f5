//! Defines the page with the form for creating a new transaction.

use axum::response::{IntoResponse, Response};
use maud::html;

use crate::{
    endpoints,
    html::{FORM_INPUT_STYLE, FORM_LABEL_STYLE, base},
};

/// A route handler that renders the new transaction form.
pub async fn get_new_transaction_page() -> Response {
    let content = html!(
        h1 { "New transaction" }

        form method="post" action=(endpoints::CREATE_TRANSACTION)
        {
            label style=(FORM_LABEL_STYLE) for="name" { "Name" }
            input style=(FORM_INPUT_STYLE) type="text" name="name" id="name" required;

            label style=(FORM_LABEL_STYLE) for="amount" { "Amount" }
            input style=(FORM_INPUT_STYLE) type="number" name="amount" id="amount"
                min="0.01" step="0.01" required;

            fieldset style="margin-top: 0.75rem; max-width: 24rem;"
            {
                legend { "Type" }
                label
                {
                    input type="radio" name="type" value="expense" checked;
                    " Expense"
                }
                label style="margin-left: 1rem;"
                {
                    input type="radio" name="type" value="income";
                    " Income"
                }
            }

            label style=(FORM_LABEL_STYLE) for="payed"
            {
                input type="checkbox" name="payed" id="payed" value="1";
                " Already paid"
            }

            label style=(FORM_LABEL_STYLE) for="payment_date" { "Payment date" }
            input style=(FORM_INPUT_STYLE) type="date" name="payment_date" id="payment_date";

            label style=(FORM_LABEL_STYLE) for="due_date" { "Due date" }
            input style=(FORM_INPUT_STYLE) type="date" name="due_date" id="due_date";

            label style=(FORM_LABEL_STYLE) for="description" { "Description" }
            textarea style=(FORM_INPUT_STYLE) name="description" id="description" rows="3" {}

            p
            {
                button type="submit" { "Create" }
                " "
                a href=(endpoints::TRANSACTIONS_VIEW) { "Cancel" }
            }
        }
    );

    base("New Transaction", &content).into_response()
}
