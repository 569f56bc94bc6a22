//! The log-in endpoint: verifies credentials and starts a cookie session.

use axum::{Json, extract::State};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use crate::{
    Error,
    auth::cookie::set_auth_cookie,
    profile::ProfileView,
    state::AppState,
    stores::ProfileStore,
};

/// The credentials a user submits to log in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogInForm {
    /// The email address the user registered with.
    pub email: String,
    /// The user's raw password.
    pub password: String,
}

/// A handler for logging a user in.
///
/// A missing account and a wrong password both come back as
/// [Error::InvalidCredentials], so the endpoint does not reveal which emails
/// have accounts.
pub async fn post_log_in(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(form): Json<LogInForm>,
) -> Result<(PrivateCookieJar, Json<ProfileView>), Error> {
    let profile = state
        .profile_store
        .get_by_email(&form.email)
        .map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?;

    let password_is_valid = profile
        .password_hash
        .verify(&form.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !password_is_valid {
        return Err(Error::InvalidCredentials);
    }

    let jar = set_auth_cookie(jar, profile.id, state.cookie_duration)?;

    Ok((jar, Json(ProfileView::from(&profile))))
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        auth::cookie::COOKIE_USER_ID,
        endpoints,
        models::{PasswordHash, ValidatedPassword},
        state::AppState,
        stores::ProfileStore,
    };

    use super::post_log_in;

    const TEST_PASSWORD: &str = "correcthorsebatterystaple";

    fn get_test_server() -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap(), "42").unwrap();
        // Use a low bcrypt cost to keep the test fast.
        let password_hash =
            PasswordHash::new(ValidatedPassword::new_unchecked(TEST_PASSWORD), 4).unwrap();
        state
            .profile_store
            .create("ana@example.com", "Ana Souza", password_hash)
            .unwrap();

        let app = Router::new()
            .route(endpoints::LOG_IN, post(post_log_in))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn log_in_with_valid_credentials_sets_cookie() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "ana@example.com", "password": TEST_PASSWORD }))
            .await;

        response.assert_status_ok();
        assert!(!response.cookie(COOKIE_USER_ID).value().is_empty());
        response.assert_json_contains(&json!({ "email": "ana@example.com" }));
    }

    #[tokio::test]
    async fn log_in_with_wrong_password_is_unauthorized() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "ana@example.com", "password": "thewrongpassword" }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn log_in_with_unknown_email_is_unauthorized() {
        let server = get_test_server();

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
            .await;

        response.assert_status_unauthorized();
    }
}
