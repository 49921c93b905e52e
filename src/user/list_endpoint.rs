//! Defines the JSON endpoint that lists all users.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{AppState, Error, user::core::get_all_users};

/// The state needed to list users.
#[derive(Debug, Clone)]
pub struct ListUsersState {
    /// The database connection for listing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListUsersState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler returning every user as JSON: `{"users": [...]}`.
///
/// Password hashes are never included in the response.
pub async fn list_users_endpoint(State(state): State<ListUsersState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match get_all_users(&connection) {
        Ok(users) => {
            let profiles: Vec<_> = users.iter().map(|user| user.profile()).collect();
            Json(json!({ "users": profiles })).into_response()
        }
        Err(error) => {
            tracing::error!("could not list users: {error}");
            error.into_api_response()
        }
    }
}
