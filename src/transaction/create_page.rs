//! Defines the route handler for the page for creating a transaction.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use maud::html;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    shared_render::render,
    timezone::get_local_offset,
    transaction::form::{FormAction, transaction_form},
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the page for creating a transaction.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(state.local_timezone.clone()))?;
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let form = transaction_form(FormAction::Create, None, today);

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md"
            {
                h2 class="text-xl font-semibold mb-4" { "Add Transaction" }

                (form)
            }
        }
    );

    Ok(render(StatusCode::OK, base("New Transaction", &[], &content)))
}

#[cfg(test)]
mod create_page_tests {
    use axum::{extract::State, http::StatusCode};
    use scraper::{Html, Selector};

    use crate::endpoints;

    use super::{CreateTransactionPageState, get_create_transaction_page};

    #[tokio::test]
    async fn page_contains_transaction_form() {
        let state = CreateTransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_create_transaction_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        let form_selector = Selector::parse("form").unwrap();
        let forms: Vec<_> = document.select(&form_selector).collect();
        assert_eq!(forms.len(), 1);
        assert_eq!(
            forms[0].value().attr("hx-post"),
            Some(endpoints::CREATE_TRANSACTION)
        );

        for name in ["title", "amount", "date"] {
            let selector = Selector::parse(&format!("input[name={name}]")).unwrap();
            assert!(
                document.select(&selector).next().is_some(),
                "want an input named {name}"
            );
        }

        for name in ["category", "transaction_type"] {
            let selector = Selector::parse(&format!("select[name={name}]")).unwrap();
            assert!(
                document.select(&selector).next().is_some(),
                "want a select named {name}"
            );
        }
    }

    #[tokio::test]
    async fn page_fails_with_invalid_timezone() {
        let state = CreateTransactionPageState {
            local_timezone: "Mars/OlympusMons".to_owned(),
        };

        let result = get_create_transaction_page(State(state)).await;

        assert!(result.is_err());
    }
}
