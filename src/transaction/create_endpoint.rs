//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState,
    transaction::{
        core::create_transaction,
        form::{TransactionForm, redirect_to_transactions},
    },
    user::UserID,
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
///
/// The transaction is owned by the signed-in user regardless of what the
/// client sends.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match create_transaction(form.into_new_transaction(user_id), &connection) {
        Ok(transaction) => {
            tracing::debug!("Created transaction {}", transaction.id);
            redirect_to_transactions().into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
