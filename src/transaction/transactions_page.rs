//! Defines the route handler for the page that displays transactions as a table.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, FORM_SELECT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    shared_render::render,
    transaction::{
        Transaction, TransactionType,
        core::get_transactions_by_user,
        filter::{TypeFilter, filter_by_type},
    },
    user::UserID,
};

/// The query parameters accepted by the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// The type filter to apply to the table.
    #[serde(default)]
    pub filter: TypeFilter,
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The database connection for listing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the signed-in user's transactions as a filterable table.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions_by_user(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    let filtered = filter_by_type(&transactions, query.filter);

    Ok(render(
        StatusCode::OK,
        transactions_view(NavBar::new(endpoints::TRANSACTIONS_VIEW), &filtered, query.filter),
    ))
}

fn transactions_view(
    nav_bar: NavBar,
    transactions: &[&Transaction],
    active_filter: TypeFilter,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-lg"
            {
                div class="flex justify-between items-center border-b dark:border-gray-700 pb-3 mb-4"
                {
                    (filter_select(active_filter))

                    a
                        href=(endpoints::NEW_TRANSACTION_VIEW)
                        class="bg-blue-500 text-white px-4 py-2 rounded hover:bg-blue-600"
                    {
                        "Add Transaction"
                    }
                }

                div class="relative overflow-x-auto rounded"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_table_row(transaction))
                            }

                            @if transactions.is_empty() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td colspan="6" class="text-center py-4 italic"
                                    {
                                        "No transactions found."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

/// The type filter dropdown. Changing the selection reloads the page with
/// the chosen filter in the query string.
fn filter_select(active_filter: TypeFilter) -> Markup {
    let options = [
        (TypeFilter::All, "All Transactions"),
        (TypeFilter::Income, "Income"),
        (TypeFilter::Expense, "Expense"),
    ];

    html!(
        form method="get" action=(endpoints::TRANSACTIONS_VIEW)
        {
            select
                name="filter"
                class=(FORM_SELECT_STYLE)
                onchange="this.form.submit()"
            {
                @for (filter, label) in options {
                    option
                        value=(filter.as_query_value())
                        selected[filter == active_filter]
                    {
                        (label)
                    }
                }
            }
        }
    )
}

fn transaction_table_row(transaction: &Transaction) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);
    let amount_style = match transaction.transaction_type {
        TransactionType::Income => "text-green-600 dark:text-green-500",
        TransactionType::Expense => "text-red-600 dark:text-red-500",
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.title) }
            td class={ (TABLE_CELL_STYLE) " " (amount_style) }
            {
                (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
            td class={ (TABLE_CELL_STYLE) " space-x-2" }
            {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-confirm="Are you sure you want to delete this transaction?"
                {
                    "Delete"
                }
            }
        }
    )
}
