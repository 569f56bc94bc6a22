//! The registration endpoint: creates a profile, seeds the default
//! categories, and starts a cookie session.

use std::str::FromStr;

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::PrivateCookieJar;
use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    Error,
    auth::cookie::set_auth_cookie,
    models::PasswordHash,
    profile::ProfileView,
    registry::ensure_seeded,
    state::AppState,
    stores::ProfileStore,
};

/// The fields a user submits to create an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    /// The email address to register with.
    pub email: String,
    /// The user's display name.
    pub full_name: String,
    /// The user's raw password.
    pub password: String,
}

/// A handler for creating a new user account.
///
/// The new user gets the default category set and is logged in immediately.
pub async fn post_register(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, PrivateCookieJar, Json<ProfileView>), Error> {
    let email =
        EmailAddress::from_str(&form.email).map_err(|_| Error::InvalidEmail(form.email.clone()))?;

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(Error::EmptyName);
    }

    let password_hash =
        PasswordHash::from_raw_password(&form.password, PasswordHash::DEFAULT_COST)?;

    let profile = state
        .profile_store
        .create(email.as_str(), full_name, password_hash)?;

    ensure_seeded(&state.category_store, profile.id)?;

    let jar = set_auth_cookie(jar, profile.id, state.cookie_duration)?;

    Ok((StatusCode::CREATED, jar, Json(ProfileView::from(&profile))))
}
