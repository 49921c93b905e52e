//! Defines the endpoint for fully updating an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState,
    database_id::TransactionId,
    transaction::{
        core::update_transaction,
        form::{TransactionForm, redirect_to_transactions},
    },
    user::UserID,
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for fully replacing a transaction, redirects to the
/// transactions view on success.
///
/// Only transactions owned by the signed-in user can be updated.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn update_transaction_endpoint(
    State(state): State<UpdateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match update_transaction(transaction_id, form.into_new_transaction(user_id), &connection) {
        Ok(()) => redirect_to_transactions().into_response(),
        Err(error) => error.into_alert_response(),
    }
}
