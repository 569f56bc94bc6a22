//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{
    Error,
    auth::{auth_guard, post_log_in, post_log_out, post_register},
    category::{create_category, delete_category, get_categories, put_category},
    dashboard::{get_analysis, get_dashboard},
    endpoints,
    notification::{
        delete_notification, get_notifications, put_all_notifications_read, put_notification_read,
    },
    profile::{get_profile, put_profile},
    state::AppState,
    transaction::{
        create_transaction, delete_transaction, get_transactions, put_transaction,
        put_transaction_status,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::LOG_OUT, post(post_log_out))
        .route(endpoints::USERS, post(post_register));

    let protected_routes = Router::new()
        .route(endpoints::PROFILE, get(get_profile))
        .route(endpoints::PROFILE, put(put_profile))
        .route(endpoints::DASHBOARD, get(get_dashboard))
        .route(endpoints::ANALYSIS, get(get_analysis))
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::TRANSACTIONS, post(create_transaction))
        .route(endpoints::TRANSACTION, put(put_transaction))
        .route(endpoints::TRANSACTION, delete(delete_transaction))
        .route(endpoints::TRANSACTION_STATUS, put(put_transaction_status))
        .route(endpoints::CATEGORIES, get(get_categories))
        .route(endpoints::CATEGORIES, post(create_category))
        .route(endpoints::CATEGORY, put(put_category))
        .route(endpoints::CATEGORY, delete(delete_category))
        .route(endpoints::NOTIFICATIONS, get(get_notifications))
        .route(endpoints::NOTIFICATION, delete(delete_notification))
        .route(endpoints::NOTIFICATION_READ, put(put_notification_read))
        .route(
            endpoints::NOTIFICATIONS_READ_ALL,
            put(put_all_notifications_read),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
