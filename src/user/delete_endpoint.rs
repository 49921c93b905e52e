//! Defines the endpoint for deleting a user.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState,
    alert::AlertTemplate,
    database_id::DatabaseId,
    shared_render::render,
    user::core::{UserID, delete_user},
};

/// The state needed to delete a user.
#[derive(Debug, Clone)]
pub struct DeleteUserState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a user.
///
/// The response swaps the user's table row with nothing and delivers a
/// success alert out-of-band. The user's transactions are removed by the
/// foreign key cascade.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_user_endpoint(
    State(state): State<DeleteUserState>,
    Path(user_id): Path<DatabaseId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match delete_user(UserID::new(user_id), &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(()) => render(
            StatusCode::OK,
            AlertTemplate::success("User deleted", "").into_html(),
        ),
        Err(error) => error.into_alert_response(),
    }
}
