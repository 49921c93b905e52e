//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, alert::AlertTemplate, database_id::TransactionId, shared_render::render,
    transaction::core::delete_transaction, user::UserID,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// The response swaps the transaction's table row with nothing and delivers
/// a success alert out-of-band. Only transactions owned by the signed-in
/// user can be deleted.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match delete_transaction(transaction_id, user_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(()) => render(
            StatusCode::OK,
            AlertTemplate::success("Transaction deleted", "").into_html(),
        ),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod delete_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        transaction::{
            TransactionType,
            core::test_utils::{get_test_connection, insert_transaction},
            get_transactions_by_user,
        },
        user::UserID,
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    #[tokio::test]
    async fn delete_removes_transaction() {
        let conn = get_test_connection();
        let transaction = insert_transaction(
            &conn,
            12.3,
            date!(2024 - 01 - 15),
            "Groceries",
            TransactionType::Expense,
        );
        let state = DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(UserID::new(1)),
            Path(transaction.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let connection = state.db_connection.lock().unwrap();
        assert!(
            get_transactions_by_user(UserID::new(1), &connection)
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn delete_rejects_other_users_transaction() {
        let conn = get_test_connection();
        let transaction = insert_transaction(
            &conn,
            12.3,
            date!(2024 - 01 - 15),
            "Groceries",
            TransactionType::Expense,
        );
        let state = DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(UserID::new(2)),
            Path(transaction.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_transactions_by_user(UserID::new(1), &connection)
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn delete_missing_transaction_returns_not_found() {
        let state = DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        };

        let response =
            delete_transaction_endpoint(State(state), Extension(UserID::new(1)), Path(42)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
