//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route for logging in a user.
pub const LOG_IN: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to create users.
pub const USERS: &str = "/api/users";
/// The route for the logged-in user's profile.
pub const PROFILE: &str = "/api/profile";
/// The route for the aggregated dashboard data.
pub const DASHBOARD: &str = "/api/dashboard";
/// The route for the longer-horizon analysis data.
pub const ANALYSIS: &str = "/api/analysis";
/// The route to access transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to change the status of a scheduled payment.
pub const TRANSACTION_STATUS: &str = "/api/transactions/{transaction_id}/status";
/// The route to access categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to access a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to access notifications.
pub const NOTIFICATIONS: &str = "/api/notifications";
/// The route to access a single notification.
pub const NOTIFICATION: &str = "/api/notifications/{notification_id}";
/// The route to mark a single notification as read.
pub const NOTIFICATION_READ: &str = "/api/notifications/{notification_id}/read";
/// The route to mark all of the user's notifications as read.
pub const NOTIFICATIONS_READ_ALL: &str = "/api/notifications/read_all";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in the endpoint path '/users/{user_id}', '{user_id}' is the
/// parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
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
