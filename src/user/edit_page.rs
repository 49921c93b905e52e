//! Defines the route handler for the page for editing an existing user.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
        link,
    },
    navigation::NavBar,
    shared_render::render,
    user::core::{User, UserID, get_user_by_id},
};

/// The state needed for the edit user page.
#[derive(Debug, Clone)]
pub struct EditUserPageState {
    /// The database connection for fetching the user.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditUserPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page for editing a user.
pub async fn get_edit_user_page(
    State(state): State<EditUserPageState>,
    Path(user_id): Path<DatabaseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_user_by_id(UserID::new(user_id), &connection)?;

    Ok(render(
        StatusCode::OK,
        edit_user_view(NavBar::new(endpoints::USERS_VIEW), &user),
    ))
}

fn edit_user_view(nav_bar: NavBar, user: &User) -> Markup {
    let nav_bar = nav_bar.into_html();
    let update_url = format_endpoint(endpoints::UPDATE_USER, user.id.as_i64());

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md"
            {
                h2 class="text-xl font-semibold mb-4" { "Edit User" }

                form
                    hx-patch=(update_url)
                    hx-target-error="#alert-container"
                    class="space-y-4"
                {
                    div
                    {
                        label for="name" class=(FORM_LABEL_STYLE) { "Name" }
                        input
                            type="text"
                            name="name"
                            id="name"
                            value=(user.name)
                            class=(FORM_TEXT_INPUT_STYLE)
                            required;
                    }

                    div
                    {
                        label for="email" class=(FORM_LABEL_STYLE) { "Email" }
                        input
                            type="email"
                            name="email"
                            id="email"
                            value=(user.email)
                            class=(FORM_TEXT_INPUT_STYLE)
                            required;
                    }

                    div class="flex items-center gap-4"
                    {
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update" }

                        (link(endpoints::USERS_VIEW, "Cancel"))
                    }
                }
            }
        }
    );

    base("Edit User", &[], &content)
}

#[cfg(test)]
mod edit_user_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        Error,
        db::initialize,
        endpoints::{self, format_endpoint},
        password::PasswordHash,
        user::core::create_user,
    };

    use super::{EditUserPageState, get_edit_user_page};

    fn get_test_state() -> EditUserPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        EditUserPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn edit_page_pre_fills_user_details() {
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

        let response = get_edit_user_page(State(state), Path(user.id.as_i64()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document = Html::parse_document(&String::from_utf8_lossy(&body));

        let form_selector = Selector::parse("form").unwrap();
        let form = document.select(&form_selector).next().unwrap();
        assert_eq!(
            form.value().attr("hx-patch").unwrap(),
            format_endpoint(endpoints::UPDATE_USER, user.id.as_i64())
        );

        let name_selector = Selector::parse("input[name=name]").unwrap();
        let name_input = document.select(&name_selector).next().unwrap();
        assert_eq!(name_input.value().attr("value"), Some("Alice"));
    }

    #[tokio::test]
    async fn edit_page_returns_not_found_for_missing_user() {
        let state = get_test_state();

        let result = get_edit_user_page(State(state), Path(42)).await;

        assert_eq!(result.unwrap_err(), Error::NotFound);
    }
}
