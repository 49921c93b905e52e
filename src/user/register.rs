//! The registration page and the endpoint for creating accounts.
//!
//! The same endpoint backs self-service sign-up and the "add user" form on
//! the users page, which passes a redirect target so the admin lands back on
//! the user list.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, base, email_input, loading_spinner, log_in_register, password_input,
        text_input,
    },
    password::PasswordHash,
    shared_render::render,
    user::core::create_user,
};

fn registration_form(
    name: &str,
    email: &str,
    email_error: Option<&str>,
    password_error: Option<&str>,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::REGISTER_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#name, #email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (text_input("name", "Name", name, true))
            (email_input(email, email_error))
            (password_input(password_error))

            button
                type="submit" id="submit-button" tabindex="0"
                class={ "w-full " (BUTTON_PRIMARY_STYLE) }
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Sign up"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a
                    href=(endpoints::LOG_IN_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                    "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let form = registration_form("", "", None, None);
    let content = log_in_register("Create an account", &form);

    render(StatusCode::OK, base("Register", &[], &content))
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The database connection for creating users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The raw data entered in a registration or add-user form.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    /// The new user's display name.
    pub name: String,
    /// The new user's email address.
    pub email: String,
    /// The new user's password, hashed before storage.
    pub password: String,
    /// Where to send the client after a successful registration.
    ///
    /// Must be a local path. Defaults to the log-in page.
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Handler for registration requests via the POST method.
///
/// On success the client is redirected to the log-in page, or to the
/// `redirect_url` passed by the form if it is a safe local path.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn register_user(
    State(state): State<RegistrationState>,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    if user_data.name.trim().is_empty() {
        return Error::EmptyName.into_alert_response();
    }

    let password_hash =
        match PasswordHash::from_raw_password(&user_data.password, PasswordHash::DEFAULT_COST) {
            Ok(password_hash) => password_hash,
            Err(error @ Error::TooWeak(_)) => {
                let form = registration_form(
                    &user_data.name,
                    &user_data.email,
                    None,
                    Some(&error.to_string()),
                );
                return render(StatusCode::OK, form);
            }
            Err(error) => {
                tracing::error!("Could not hash password: {error}");
                return error.into_alert_response();
            }
        };

    let create_result = create_user(
        &user_data.name,
        &user_data.email,
        password_hash,
        &state
            .db_connection
            .lock()
            .expect("Could not acquire database lock"),
    );

    match create_result {
        Ok(user) => {
            tracing::info!("Registered user {} ({})", user.id, user.email);

            let redirect_target = user_data
                .redirect_url
                .as_deref()
                .filter(|url| is_safe_redirect_url(url))
                .unwrap_or(endpoints::LOG_IN_VIEW);

            (
                HxRedirect(redirect_target.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error @ Error::DuplicateEmail) => {
            let form = registration_form(
                &user_data.name,
                &user_data.email,
                Some(&error.to_string()),
                None,
            );
            render(StatusCode::OK, form)
        }
        Err(error) => {
            tracing::error!("Could not create user: {error}");
            error.into_alert_response()
        }
    }
}

/// Whether `redirect_url` is a local path that is safe to redirect to.
fn is_safe_redirect_url(redirect_url: &str) -> bool {
    redirect_url.starts_with('/') && !redirect_url.starts_with("//")
}

#[cfg(test)]
mod register_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;

    use crate::{db::initialize, endpoints, user::core::get_all_users};

    use super::{RegisterForm, RegistrationState, is_safe_redirect_url, register_user};

    const STRONG_PASSWORD: &str = "kq9#Zr!t8&wLm2";

    fn get_test_state() -> RegistrationState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        RegistrationState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn test_form() -> RegisterForm {
        RegisterForm {
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password: STRONG_PASSWORD.to_owned(),
            redirect_url: None,
        }
    }

    #[tokio::test]
    async fn register_creates_user_and_redirects_to_log_in() {
        let state = get_test_state();

        let response = register_user(State(state.clone()), Form(test_form())).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::LOG_IN_VIEW
        );

        let connection = state.db_connection.lock().unwrap();
        let users = get_all_users(&connection).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "alice@example.com");
    }

    #[tokio::test]
    async fn register_honours_safe_redirect_url() {
        let state = get_test_state();
        let form = RegisterForm {
            redirect_url: Some(endpoints::USERS_VIEW.to_owned()),
            ..test_form()
        };

        let response = register_user(State(state), Form(form)).await;

        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::USERS_VIEW
        );
    }

    #[tokio::test]
    async fn register_ignores_external_redirect_url() {
        let state = get_test_state();
        let form = RegisterForm {
            redirect_url: Some("https://example.com/phish".to_owned()),
            ..test_form()
        };

        let response = register_user(State(state), Form(form)).await;

        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::LOG_IN_VIEW
        );
    }

    #[tokio::test]
    async fn register_rejects_weak_password() {
        let state = get_test_state();
        let form = RegisterForm {
            password: "hunter2".to_owned(),
            ..test_form()
        };

        let response = register_user(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let connection = state.db_connection.lock().unwrap();
        assert!(get_all_users(&connection).unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let state = get_test_state();
        register_user(State(state.clone()), Form(test_form())).await;

        let response = register_user(State(state.clone()), Form(test_form())).await;

        assert_eq!(response.status(), StatusCode::OK);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_all_users(&connection).unwrap().len(), 1);
    }

    #[test]
    fn safe_redirect_urls_are_local_paths() {
        assert!(is_safe_redirect_url("/users"));
        assert!(!is_safe_redirect_url("//example.com"));
        assert!(!is_safe_redirect_url("https://example.com"));
        assert!(!is_safe_redirect_url(""));
    }
}
