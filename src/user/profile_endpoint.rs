//! Defines the JSON endpoint that fetches a single user.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    user::core::{UserID, get_user_by_id},
};

/// The state needed to fetch a user profile.
#[derive(Debug, Clone)]
pub struct UserProfileState {
    /// The database connection for fetching the user.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UserProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler returning a single user as JSON: `{"user": {...}}`.
///
/// The password hash is never included in the response.
pub async fn get_user_profile_endpoint(
    State(state): State<UserProfileState>,
    Path(user_id): Path<DatabaseId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match get_user_by_id(UserID::new(user_id), &connection) {
        Ok(user) => Json(json!({ "user": user.profile() })).into_response(),
        Err(error) => error.into_api_response(),
    }
}

#[cfg(test)]
mod user_profile_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{db::initialize, password::PasswordHash, user::core::create_user};

    use super::{UserProfileState, get_user_profile_endpoint};

    fn get_test_state() -> UserProfileState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        UserProfileState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn profile_returns_user_as_json() {
        let state = get_test_state();
        let user = {
            let connection = state.db_connection.lock().unwrap();
            create_user(
                "Alice",
                "alice@example.com",
                PasswordHash::new_unchecked("hash"),
                &connection,
            )
            .unwrap()
        };

        let response = get_user_profile_endpoint(State(state), Path(user.id.as_i64())).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["user"]["name"], "Alice");
        assert_eq!(json["user"]["id"], user.id.as_i64());
    }

    #[tokio::test]
    async fn profile_returns_not_found_for_missing_user() {
        let state = get_test_state();

        let response = get_user_profile_endpoint(State(state), Path(42)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["message"].is_string());
    }
}
