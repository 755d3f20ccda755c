//! Axum route handlers for saved candidate profiles.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::profile::Profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub message: String,
    pub profile_id: String,
}

/// POST /profile
///
/// `name` and `email` are required; the email is the profile id.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(mut profile): Json<Profile>,
) -> Result<Json<SaveProfileResponse>, AppError> {
    for (field, value) in [("name", &profile.name), ("email", &profile.email)] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }

    profile.stamp();
    let profile_id = profile.email.trim().to_string();
    state.profiles.put(profile_id.clone(), profile);
    info!("Saved profile {profile_id}");

    Ok(Json(SaveProfileResponse {
        message: "Profile saved successfully".to_string(),
        profile_id,
    }))
}

/// GET /profile?email=
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<Profile>, AppError> {
    let email = params
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("email is required".to_string()))?;

    state
        .profiles
        .get(&email)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
}
