//! Defines the JSON endpoint that fetches a single transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error, database_id::TransactionId, transaction::core::get_transaction, user::UserID,
};

/// The state needed to fetch a transaction.
#[derive(Debug, Clone)]
pub struct GetTransactionState {
    /// The database connection for fetching the transaction.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler returning a single transaction as JSON:
/// `{"transaction": {...}}`.
///
/// Only transactions owned by the signed-in user can be fetched.
pub async fn get_transaction_endpoint(
    State(state): State<GetTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match get_transaction(transaction_id, user_id, &connection) {
        Ok(transaction) => Json(json!({ "transaction": transaction })).into_response(),
        Err(error) => error.into_api_response(),
    }
}
