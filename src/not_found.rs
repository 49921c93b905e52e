//! The 404 page and its route handler.

use axum::{http::StatusCode, response::Response};

use crate::{html::error_view, shared_render::render};

/// Route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Build the 404 response without going through a route handler.
pub fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Sorry, we couldn't find that page.",
            "Check the address for typos, or head back to the dashboard.",
        ),
    )
}
