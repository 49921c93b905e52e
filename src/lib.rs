//! Outlay is a web app for tracking personal income and expenses.
//!
//! This library provides a REST-style API that directly serves HTML pages:
//! a dashboard with summary tiles and charts, a filterable transaction
//! table, and user management views.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod password;
mod routing;
mod timezone;
mod transaction;
mod user;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{User, UserID};

use crate::{
    alert::AlertTemplate,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
    shared_render::{render, render_json},
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

mod shared_render {
    //! Small helpers for turning markup or JSON into HTTP responses.

    use axum::{
        Json,
        http::StatusCode,
        response::{Html, IntoResponse, Response},
    };
    use maud::Markup;
    use serde_json::Value;

    /// Render `markup` as an HTML response with the given status code.
    #[inline]
    pub fn render(status_code: StatusCode, markup: Markup) -> Response {
        (status_code, Html(markup.into_string())).into_response()
    }

    /// Render `body` as a JSON response with the given status code.
    #[inline]
    pub fn render_json(status_code: StatusCode, body: Value) -> Response {
        (status_code, Json(body)).into_response()
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid combination of email and password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The session token cookie is missing from the cookie jar in the request.
    #[error("no session token in the cookie jar")]
    CookieMissing,

    /// The session token in the cookie has passed its expiry.
    #[error("the session token has expired")]
    SessionExpired,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email used to register an account already belongs to a user.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// An empty string was used for a user's name.
    #[error("Name cannot be empty")]
    EmptyName,

    /// An empty string was used for a transaction title.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// A negative or non-finite amount was used to create or update a
    /// transaction. Amounts record magnitudes; the direction of money comes
    /// from the transaction type.
    #[error("{0} is not a valid transaction amount")]
    InvalidAmount(f64),

    /// A category label outside the canonical set was used to create or
    /// update a transaction.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a user that does not exist
    #[error("tried to update a user that is not in the database")]
    UpdateMissingUser,

    /// Tried to delete a user that does not exist
    #[error("tried to delete a user that is not in the database")]
    DeleteMissingUser,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an alert partial for htmx form endpoints.
    ///
    /// The alert is swapped into the page's alert container rather than
    /// replacing the view, so the user keeps their form state.
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyTitle => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error("Invalid title", "The transaction title cannot be empty.")
                    .into_html(),
            ),
            Error::EmptyName => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error("Invalid name", "The name cannot be empty.").into_html(),
            ),
            Error::InvalidAmount(amount) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid amount",
                    &format!("{amount} is not a valid amount. Enter a number of at least zero."),
                )
                .into_html(),
            ),
            Error::UnknownCategory(label) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Unknown category",
                    &format!("\"{label}\" is not one of the available categories."),
                )
                .into_html(),
            ),
            Error::DuplicateEmail => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Email already registered",
                    "A user with this email address already exists. \
                    Use a different email address or log in with the existing account.",
                )
                .into_html(),
            ),
            Error::TooWeak(feedback) => render(
                StatusCode::BAD_REQUEST,
                AlertTemplate::error("Password is too weak", &feedback).into_html(),
            ),
            Error::UpdateMissingTransaction => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                )
                .into_html(),
            ),
            Error::DeleteMissingTransaction => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                )
                .into_html(),
            ),
            Error::UpdateMissingUser => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error("Could not update user", "The user could not be found.")
                    .into_html(),
            ),
            Error::DeleteMissingUser => render(
                StatusCode::NOT_FOUND,
                AlertTemplate::error(
                    "Could not delete user",
                    "The user could not be found. \
                    Try refreshing the page to see if the user has already been deleted.",
                )
                .into_html(),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                AlertTemplate::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_html(),
            ),
        }
    }

    /// Convert the error into a JSON `{"message": ...}` response for the
    /// data endpoints.
    fn into_api_response(self) -> Response {
        let status_code = match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::EmptyName
            | Error::EmptyTitle
            | Error::InvalidAmount(_)
            | Error::UnknownCategory(_)
            | Error::DuplicateEmail
            | Error::TooWeak(_) => StatusCode::BAD_REQUEST,
            ref error => {
                tracing::error!("An unexpected error occurred: {}", error);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            "An internal error occurred.".to_owned()
        } else {
            self.to_string()
        };

        render_json(status_code, json!({ "message": message }))
    }
}
