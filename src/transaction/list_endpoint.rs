//! Defines the JSON endpoint that lists the signed-in user's transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, Error, transaction::core::get_transactions_by_user, user::UserID};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for listing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler returning the signed-in user's transactions as JSON:
/// `{"transactions": [...]}`.
///
/// The owning user always comes from the authenticated session, never from
/// the request body, so one user can never list another user's records.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match get_transactions_by_user(user_id, &connection) {
        Ok(transactions) => Json(json!({ "transactions": transactions })).into_response(),
        Err(error) => {
            tracing::error!("could not list transactions: {error}");
            error.into_api_response()
        }
    }
}

#[cfg(test)]
mod list_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        transaction::{
            TransactionType,
            core::test_utils::{get_test_connection, insert_transaction},
        },
        user::UserID,
    };

    use super::{ListTransactionsState, list_transactions_endpoint};

    #[tokio::test]
    async fn list_returns_the_users_transactions() {
        let conn = get_test_connection();
        insert_transaction(
            &conn,
            100.0,
            date!(2024 - 01 - 15),
            "Salary / Wages",
            TransactionType::Income,
        );
        insert_transaction(
            &conn,
            40.0,
            date!(2024 - 01 - 20),
            "Groceries",
            TransactionType::Expense,
        );
        let state = ListTransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = list_transactions_endpoint(State(state), Extension(UserID::new(1))).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let transactions = json["transactions"].as_array().unwrap();
        assert_eq!(transactions.len(), 2);
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_signed_in_user() {
        let conn = get_test_connection();
        insert_transaction(
            &conn,
            100.0,
            date!(2024 - 01 - 15),
            "Salary / Wages",
            TransactionType::Income,
        );
        let state = ListTransactionsState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = list_transactions_endpoint(State(state), Extension(UserID::new(2))).await;

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["transactions"].as_array().unwrap().len(), 0);
    }
}
