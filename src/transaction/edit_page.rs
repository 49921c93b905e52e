//! Defines the route handler for the page for editing an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    shared_render::render,
    transaction::{
        core::get_transaction,
        form::{FormAction, transaction_form},
    },
    user::UserID,
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The database connection for fetching the transaction.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for editing a transaction.
///
/// Only transactions owned by the signed-in user can be edited; anything
/// else renders the 404 page.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = get_transaction(transaction_id, user_id, &connection)?;

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let form = transaction_form(
        FormAction::Edit(transaction.id),
        Some(&transaction),
        transaction.date,
    );

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md"
            {
                h2 class="text-xl font-semibold mb-4" { "Edit Transaction" }

                (form)
            }
        }
    );

    Ok(render(StatusCode::OK, base("Edit Transaction", &[], &content)))
}
