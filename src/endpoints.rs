//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/users/{user_id}/edit', use
//! [format_endpoint].

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying a user's transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page for listing users and adding new ones.
pub const USERS_VIEW: &str = "/users";
/// The page for editing an existing user.
pub const EDIT_USER_VIEW: &str = "/users/{user_id}/edit";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/auth/login";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/auth/log_out";
/// The route to create an account. Also reused by the users page to add
/// users on behalf of someone else.
pub const REGISTER_API: &str = "/api/user/register";
/// The route to list all users.
pub const USER_LIST: &str = "/api/user/list";
/// The route to partially update a user.
pub const UPDATE_USER: &str = "/api/user/update/{user_id}";
/// The route to delete a user.
pub const DELETE_USER: &str = "/api/user/delete/{user_id}";
/// The route to fetch a single user.
pub const USER_PROFILE: &str = "/api/user/profile/{user_id}";
/// The route to list the signed-in user's transactions.
pub const GET_ALL_TRANSACTIONS: &str = "/api/transactions/getAll";
/// The route to create a transaction.
pub const CREATE_TRANSACTION: &str = "/api/transactions/create";
/// The route to update a transaction.
pub const UPDATE_TRANSACTION: &str = "/api/transactions/update/{transaction_id}";
/// The route to delete a transaction.
pub const DELETE_TRANSACTION: &str = "/api/transactions/delete/{transaction_id}";
/// The route to fetch a single transaction.
pub const GET_TRANSACTION: &str = "/api/transactions/get/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}/edit', '{user_id}' is
/// the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        let endpoints = [
            endpoints::ROOT,
            endpoints::DASHBOARD_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
            endpoints::USERS_VIEW,
            endpoints::REGISTER_VIEW,
            endpoints::LOG_IN_VIEW,
            endpoints::INTERNAL_ERROR_VIEW,
            endpoints::LOG_IN_API,
            endpoints::LOG_OUT,
            endpoints::REGISTER_API,
            endpoints::USER_LIST,
            endpoints::GET_ALL_TRANSACTIONS,
            endpoints::CREATE_TRANSACTION,
        ];

        for endpoint in endpoints {
            assert_endpoint_is_valid_uri(endpoint);
        }
    }

    #[test]
    fn parameterized_endpoints_are_valid_uris_after_formatting() {
        let endpoints = [
            endpoints::EDIT_TRANSACTION_VIEW,
            endpoints::EDIT_USER_VIEW,
            endpoints::UPDATE_USER,
            endpoints::DELETE_USER,
            endpoints::USER_PROFILE,
            endpoints::UPDATE_TRANSACTION,
            endpoints::DELETE_TRANSACTION,
            endpoints::GET_TRANSACTION,
        ];

        for endpoint in endpoints {
            assert_endpoint_is_valid_uri(&format_endpoint(endpoint, 42));
        }
    }

    #[test]
    fn format_endpoint_replaces_parameter() {
        let got = format_endpoint(endpoints::UPDATE_USER, 7);

        assert_eq!(got, "/api/user/update/7");
    }

    #[test]
    fn format_endpoint_replaces_parameter_in_middle() {
        let got = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, 123);

        assert_eq!(got, "/transactions/123/edit");
    }

    #[test]
    fn format_endpoint_returns_path_without_parameter_unchanged() {
        let got = format_endpoint(endpoints::TRANSACTIONS_VIEW, 123);

        assert_eq!(got, endpoints::TRANSACTIONS_VIEW);
    }
}
