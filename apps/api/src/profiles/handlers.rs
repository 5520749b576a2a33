//! Axum route handlers for user profiles.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::user::{LanguageUpdate, ProfessionLevelUpdate, UserId, UserProfile, UserUpsert};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserAck {
    pub message: String,
    pub telegram_id: UserId,
}

/// POST /users
///
/// Creates the profile on first contact, otherwise updates the provided fields.
pub async fn handle_upsert_user(
    State(state): State<AppState>,
    Json(user): Json<UserUpsert>,
) -> Result<Json<UserAck>, AppError> {
    state.profiles.upsert(&user).await?;
    Ok(Json(UserAck {
        message: "User created or updated".to_string(),
        telegram_id: user.telegram_id,
    }))
}

/// GET /users/:telegram_id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(telegram_id): Path<UserId>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .profiles
        .get(telegram_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {telegram_id} not found")))?;
    Ok(Json(profile))
}

/// PATCH /users/:telegram_id/language
pub async fn handle_update_language(
    State(state): State<AppState>,
    Path(telegram_id): Path<UserId>,
    Json(update): Json<LanguageUpdate>,
) -> Result<Json<UserAck>, AppError> {
    if update.language_code.trim().is_empty() {
        return Err(AppError::Validation(
            "language_code cannot be empty".to_string(),
        ));
    }
    if !state
        .profiles
        .set_language(telegram_id, &update.language_code)
        .await?
    {
        return Err(AppError::NotFound(format!("User {telegram_id} not found")));
    }
    Ok(Json(UserAck {
        message: "Language updated".to_string(),
        telegram_id,
    }))
}

/// PATCH /users/:telegram_id/profession_level
pub async fn handle_update_profession_level(
    State(state): State<AppState>,
    Path(telegram_id): Path<UserId>,
    Json(update): Json<ProfessionLevelUpdate>,
) -> Result<Json<UserAck>, AppError> {
    if update.profession.trim().is_empty() || update.level.trim().is_empty() {
        return Err(AppError::Validation(
            "profession and level cannot be empty".to_string(),
        ));
    }
    if !state
        .profiles
        .set_profession_level(telegram_id, &update)
        .await?
    {
        return Err(AppError::NotFound(format!("User {telegram_id} not found")));
    }
    Ok(Json(UserAck {
        message: "Profession and level updated".to_string(),
        telegram_id,
    }))
}
