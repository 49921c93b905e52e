//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{delete, get, patch, post, put},
};

use crate::{
    AppState,
    auth::{auth_guard, auth_guard_hx, get_log_in_page, get_log_out, post_log_in},
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_create_transaction_page,
        get_edit_transaction_page, get_transaction_endpoint, get_transactions_page,
        list_transactions_endpoint, update_transaction_endpoint,
    },
    user::{
        delete_user_endpoint, get_edit_user_page, get_register_page, get_user_profile_endpoint,
        get_users_page, list_users_endpoint, register_user, update_user_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::REGISTER_API, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::USERS_VIEW, get(get_users_page))
        .route(endpoints::EDIT_USER_VIEW, get(get_edit_user_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These endpoints need to use the HX-REDIRECT header for auth redirects
    // to work properly for HTMX and API requests.
    let protected_api_routes = Router::new()
        .route(
            endpoints::CREATE_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::UPDATE_TRANSACTION,
            put(update_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::GET_TRANSACTION, get(get_transaction_endpoint))
        .route(
            endpoints::GET_ALL_TRANSACTIONS,
            post(list_transactions_endpoint),
        )
        .route(endpoints::USER_LIST, get(list_users_endpoint))
        .route(endpoints::UPDATE_USER, patch(update_user_endpoint))
        .route(endpoints::DELETE_USER, delete(delete_user_endpoint))
        .route(endpoints::USER_PROFILE, get(get_user_profile_endpoint))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx));

    protected_routes
        .merge(protected_api_routes)
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
