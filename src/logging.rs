//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

/// The maximum number of body bytes to log at the `info` level. Longer
/// bodies are truncated, with the full body logged at `debug`.
const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request, including their bodies.
///
/// Form submissions have their password field redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = read_body_text(body).await;

    let display_text = if is_form_post(&parts) {
        redact_password(&body_text, "password")
    } else {
        body_text.clone()
    };
    log_payload("Received request", format!("{parts:#?}"), &display_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = read_body_text(body).await;
    log_payload("Sending response", format!("{parts:#?}"), &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn read_body_text(body: Body) -> String {
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    String::from_utf8_lossy(&body_bytes).to_string()
}

fn is_form_post(parts: &axum::http::request::Parts) -> bool {
    parts.method == Method::POST
        && parts
            .headers
            .get(CONTENT_TYPE)
            .is_some_and(|content_type| {
                content_type
                    .as_bytes()
                    .starts_with(b"application/x-www-form-urlencoded")
            })
}

fn redact_password(form_text: &str, field_name: &str) -> String {
    let start = match form_text.find(&format!("{field_name}=")) {
        Some(position) => position,
        None => return form_text.to_string(),
    };

    let end = form_text[start..]
        .find('&')
        .map(|position| start + position)
        .unwrap_or(form_text.len());

    let password = &form_text[start..end];

    form_text.replace(password, &format!("{field_name}=********"))
}

fn log_payload(direction: &str, headers: String, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "{direction}: {headers}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{direction}: {headers}\nbody: {body:?}");
    }
}
