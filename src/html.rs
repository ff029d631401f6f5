//! Shared maud templates and styles for the HTML views.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{DOCTYPE, Markup, html};

/// Styles shared between the table views.
pub const TABLE_HEADER_STYLE: &str = "text-align: left; border-bottom: 2px solid #ccc; padding: 0.5rem;";
/// Style for table body cells.
pub const TABLE_CELL_STYLE: &str = "border-bottom: 1px solid #eee; padding: 0.5rem;";
/// Style for form labels.
pub const FORM_LABEL_STYLE: &str = "display: block; margin: 0.75rem 0 0.25rem; font-weight: 600;";
/// Style for text-like form inputs.
pub const FORM_INPUT_STYLE: &str = "display: block; width: 100%; max-width: 24rem; padding: 0.4rem;";

/// The shared page shell: doctype, head and a centered content column.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Centavo" }

                style
                {
                    r#"
                    body {
                        font-family: system-ui, sans-serif;
                        margin: 0 auto;
                        max-width: 56rem;
                        padding: 1.5rem;
                        color: #1f2933;
                    }
                    a { color: #2563eb; }
                    table { border-collapse: collapse; width: 100%; }
                    "#
                }
            }

            body
            {
                (content)
            }
        }
    }
}

/// Render an error message as a small standalone page with the given status.
pub fn render_alert(status_code: StatusCode, message: &str, details: &str) -> Response {
    let content = html! {
        h1 { (message) }
        p { (details) }
        p { a href="javascript:history.back()" { "Go back" } }
    };

    (status_code, base("Error", &content)).into_response()
}
