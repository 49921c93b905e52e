//! The log-in page and the handler for log-in requests.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::{invalidate_auth_cookie, set_auth_cookie},
    endpoints,
    html::{FORM_LABEL_STYLE, base, email_input, loading_spinner, log_in_register, password_input},
    internal_server_error::get_internal_server_error_redirect,
    shared_render::render,
    user::{User, get_user_by_email},
};

pub(crate) const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect email or password.";

/// How long the session should last if the user selects "remember me" at log-in.
const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

fn log_in_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (email_input(email, None))
            (password_input(error_message))

            div class="flex items-center gap-2"
            {
                input
                    type="checkbox"
                    name="remember_me"
                    id="remember-me"
                    class="w-4 h-4 rounded-sm border-gray-300"
                ;

                label for="remember-me" class=(FORM_LABEL_STYLE) { "Remember me" }
            }

            button
                type="submit" id="submit-button" tabindex="0"
                class="w-full px-4 py-2 bg-blue-500 dark:bg-blue-600 disabled:bg-blue-700
                    hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700 text-white rounded"
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Don't have an account yet? "

                a
                    href=(endpoints::REGISTER_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                    "Sign up here"
                }
            }
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    let form = log_in_form("", None);
    let content = log_in_register("Log in to your account", &form);

    render(StatusCode::OK, base("Log In", &[], &content))
}

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the log-in form.
///
/// The email and password are stored as plain strings. There is no need for
/// validation here since they will be compared against the email and password
/// in the database, which have been verified.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
    /// Whether to extend the initial session duration.
    ///
    /// This value comes from a checkbox, so it either has a string value or
    /// is not set. The `Some` variant should be interpreted as `true`
    /// irregardless of the string value, and the `None` variant as `false`.
    pub remember_me: Option<String>,
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client
/// is redirected to the dashboard page. Otherwise, the form is returned with
/// an error message explaining the problem.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let email = &user_data.email;
    let user: User = match get_user_by_email(
        email,
        &state
            .db_connection
            .lock()
            .expect("Could not acquire database lock"),
    ) {
        Ok(user) => user,
        Err(Error::NotFound) => {
            return render(
                StatusCode::OK,
                log_in_form(email, Some(INVALID_CREDENTIALS_ERROR_MSG)),
            );
        }
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return render(
                StatusCode::OK,
                log_in_form(
                    email,
                    Some("An internal error occurred. Please try again later."),
                ),
            );
        }
    };

    let is_password_valid = match user.password_hash.verify(&user_data.password) {
        Ok(is_password_valid) => is_password_valid,
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            return render(
                StatusCode::OK,
                log_in_form(
                    email,
                    Some("An internal error occurred. Please try again later."),
                ),
            );
        }
    };

    if !is_password_valid {
        return render(
            StatusCode::OK,
            log_in_form(email, Some(INVALID_CREDENTIALS_ERROR_MSG)),
        );
    }

    let cookie_duration = if user_data.remember_me.is_some() {
        REMEMBER_ME_COOKIE_DURATION
    } else {
        state.cookie_duration
    };

    match set_auth_cookie(jar.clone(), user.id, cookie_duration) {
        Ok(updated_jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            updated_jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            (invalidate_auth_cookie(jar), get_internal_server_error_redirect()).into_response()
        }
    }
}

#[cfg(test)]
mod log_in_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        PasswordHash,
        app_state::create_cookie_key,
        auth::{DEFAULT_COOKIE_DURATION, log_in::INVALID_CREDENTIALS_ERROR_MSG},
        db::initialize,
        endpoints,
        user::create_user,
    };

    use super::{LogInData, LoginState, get_log_in_page, post_log_in};

    const TEST_EMAIL: &str = "alice@example.com";
    const TEST_PASSWORD: &str = "kq9#Zr!t8&wLm2";

    fn get_test_state() -> LoginState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        // bcrypt's minimum cost keeps the test fast.
        let password_hash = PasswordHash::from_raw_password(TEST_PASSWORD, 4).unwrap();
        create_user("Alice", TEST_EMAIL, password_hash, &conn).unwrap();

        LoginState {
            cookie_key: create_cookie_key("42"),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn get_jar(state: &LoginState) -> PrivateCookieJar {
        use axum::extract::FromRef;

        PrivateCookieJar::new(Key::from_ref(state))
    }

    #[tokio::test]
    async fn log_in_page_contains_form() {
        let response = get_log_in_page().await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        let form_selector = Selector::parse("form").unwrap();
        let forms: Vec<_> = document.select(&form_selector).collect();
        assert_eq!(forms.len(), 1);
        assert_eq!(
            forms[0].value().attr("hx-post"),
            Some(endpoints::LOG_IN_API)
        );
    }

    #[tokio::test]
    async fn log_in_with_valid_credentials_redirects_to_dashboard() {
        let state = get_test_state();
        let jar = get_jar(&state);
        let form = LogInData {
            email: TEST_EMAIL.to_owned(),
            password: TEST_PASSWORD.to_owned(),
            remember_me: None,
        };

        let response = post_log_in(State(state), jar, Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::DASHBOARD_VIEW
        );
        assert!(response.headers().get("set-cookie").is_some());
    }

    #[tokio::test]
    async fn log_in_with_wrong_password_returns_form_with_error() {
        let state = get_test_state();
        let jar = get_jar(&state);
        let form = LogInData {
            email: TEST_EMAIL.to_owned(),
            password: "wrong password".to_owned(),
            remember_me: None,
        };

        let response = post_log_in(State(state), jar, Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains(INVALID_CREDENTIALS_ERROR_MSG));
    }

    #[tokio::test]
    async fn log_in_with_unknown_email_returns_form_with_error() {
        let state = get_test_state();
        let jar = get_jar(&state);
        let form = LogInData {
            email: "nobody@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
            remember_me: None,
        };

        let response = post_log_in(State(state), jar, Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains(INVALID_CREDENTIALS_ERROR_MSG));
    }
}
