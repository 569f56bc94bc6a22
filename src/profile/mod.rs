//! The account endpoints: reading and updating the logged-in user's profile.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{Profile, UserId},
    state::AppState,
    stores::ProfileStore,
};

/// The profile fields exposed to clients. The password hash never leaves the
/// server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// The ID of the user.
    pub id: i64,
    /// The email address used to log in.
    pub email: String,
    /// The user's display name.
    pub full_name: String,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.as_i64(),
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
        }
    }
}

/// The fields a user may change on their own profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    /// The new display name.
    pub full_name: String,
}

/// A handler for getting the logged-in user's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
) -> Result<Json<ProfileView>, Error> {
    let profile = state.profile_store.get(user_id)?;

    Ok(Json(ProfileView::from(&profile)))
}

/// A handler for updating the logged-in user's display name.
pub async fn put_profile(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<ProfileView>, Error> {
    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err(Error::EmptyName);
    }

    let profile = state.profile_store.update_full_name(user_id, full_name)?;

    Ok(Json(ProfileView::from(&profile)))
}
