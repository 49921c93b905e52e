//! Defines the endpoint for partially updating a user.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState,
    database_id::DatabaseId,
    endpoints,
    user::core::{UserID, update_user_name},
};

/// The state needed to update a user.
#[derive(Debug, Clone)]
pub struct UpdateUserState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for updating a user.
///
/// Only `name` is applied. The edit form also posts the email field, and a
/// password may be posted by older clients; both are accepted and dropped
/// here to match the established update policy.
#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    /// The user's new display name.
    pub name: String,
    /// Accepted but not applied.
    #[serde(default)]
    pub email: Option<String>,
    /// Accepted but not applied.
    #[serde(default)]
    pub password: Option<String>,
}

/// A route handler for partially updating a user, redirects to the users
/// view on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn update_user_endpoint(
    State(state): State<UpdateUserState>,
    Path(user_id): Path<DatabaseId>,
    Form(form): Form<UpdateUserForm>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    if form.email.is_some() {
        tracing::debug!("Ignoring email field in update for user {user_id}");
    }

    match update_user_name(UserID::new(user_id), &form.name, &connection) {
        Ok(()) => (
            HxRedirect(endpoints::USERS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => error.into_alert_response(),
    }
}
