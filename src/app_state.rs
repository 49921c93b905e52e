//! The shared state threaded through every request handler.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{Error, auth::DEFAULT_COOKIE_DURATION, db::initialize};

/// The state shared by the application's request handlers.
///
/// Handlers declare the subset of this state they need as their own state
/// structs and convert with [FromRef], so tests can construct just that
/// subset.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// How long session cookies stay valid.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The database connection shared by all handlers.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create the application state around `db_connection`, creating the
    /// database tables if they do not exist yet.
    ///
    /// `cookie_secret` seeds the private cookie key. `local_timezone` should
    /// be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        cookie_secret: &str,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Derive a cookie signing key from a `secret` string.
///
/// The secret is stretched to the 64 bytes a [Key] requires by hashing it.
pub fn create_cookie_key(secret: &str) -> Key {
    Key::from(&Sha512::digest(secret))
}
