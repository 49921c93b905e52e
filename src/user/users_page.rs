//! Defines the route handler for the page that lists users and adds new ones.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base,
    },
    navigation::NavBar,
    shared_render::render,
    user::core::{User, get_all_users},
};

/// The state needed for the users page.
#[derive(Debug, Clone)]
pub struct UsersPageState {
    /// The database connection for listing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UsersPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render a table of users along with a form for adding new ones.
pub async fn get_users_page(State(state): State<UsersPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let users = get_all_users(&connection)
        .inspect_err(|error| tracing::error!("could not get users: {error}"))?;

    Ok(render(
        StatusCode::OK,
        users_view(NavBar::new(endpoints::USERS_VIEW), &users),
    ))
}

fn users_view(nav_bar: NavBar, users: &[User]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-lg"
            {
                div class="flex justify-between items-center border-b dark:border-gray-700 pb-3 mb-4"
                {
                    h2 class="text-xl font-semibold" { "Users" }
                }

                div class="relative overflow-x-auto rounded mb-8"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Email" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for user in users {
                                (user_table_row(user))
                            }

                            @if users.is_empty() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td colspan="3" class="text-center py-4 italic"
                                    {
                                        "No users found."
                                    }
                                }
                            }
                        }
                    }
                }

                (add_user_form())
            }
        }
    );

    base("Users", &[], &content)
}

fn user_table_row(user: &User) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_USER_VIEW, user.id.as_i64());
    let delete_url = format_endpoint(endpoints::DELETE_USER, user.id.as_i64());

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (user.name) }
            td class=(TABLE_CELL_STYLE) { (user.email) }
            td class={ (TABLE_CELL_STYLE) " space-x-2" }
            {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-confirm="Are you sure you want to delete this user? Their transactions will be deleted too."
                {
                    "Delete"
                }
            }
        }
    )
}

fn add_user_form() -> Markup {
    html!(
        div class="w-full max-w-md"
        {
            h3 class="text-lg font-semibold mb-4" { "Add User" }

            form
                hx-post=(endpoints::REGISTER_API)
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                input type="hidden" name="redirect_url" value=(endpoints::USERS_VIEW);

                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Name" }
                    input type="text" name="name" id="name" class=(FORM_TEXT_INPUT_STYLE) required;
                }

                div
                {
                    label for="email" class=(FORM_LABEL_STYLE) { "Email" }
                    input type="email" name="email" id="email" class=(FORM_TEXT_INPUT_STYLE) required;
                }

                div
                {
                    label for="password" class=(FORM_LABEL_STYLE) { "Password" }
                    input type="password" name="password" id="password" class=(FORM_TEXT_INPUT_STYLE) required;
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create" }
            }
        }
    )
}
