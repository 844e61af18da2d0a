use std::sync::Arc;

use anyhow::anyhow;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, warn};

use roomgate_db::Database;
use roomgate_token::{TokenIssuer, hash_password, verify_password};
use roomgate_types::api::{RegisterRequest, RegisterResponse, TokenRequest, TokenResponse};
use roomgate_types::grant::VideoGrant;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub issuer: TokenIssuer,
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::RegistrationFailed(anyhow!(e.body_text())))?;

    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(ApiError::RegistrationFailed(anyhow!("username or password missing")));
    };

    // Hashing and the insert both block; run them off the async runtime
    let db = state.clone();
    let name = username.clone();
    tokio::task::spawn_blocking(move || -> anyhow::Result<i64> {
        let password_hash = hash_password(&password)?;
        db.db.create_user(&name, &password_hash)
    })
    .await
    .map_err(|e| ApiError::RegistrationFailed(e.into()))?
    .map_err(ApiError::RegistrationFailed)?;

    info!("Registered user {}", username);

    Ok(Json(RegisterResponse {
        success: true,
        message: "注册成功".to_string(),
    }))
}

pub async fn get_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (room_name, participant_name, password) = payload
        .ok()
        .and_then(|Json(req)| req.into_parts())
        .ok_or(ApiError::MissingFields)?;

    let token = tokio::task::spawn_blocking(move || {
        issue_room_token(&state, &room_name, &participant_name, &password)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))??;

    Ok(Json(TokenResponse { token }))
}

/// Verify credentials, mint the token, then record the join.
///
/// The log row is written before the token leaves this function, so a
/// failed insert means no token is returned.
fn issue_room_token(
    state: &AppStateInner,
    room_name: &str,
    participant_name: &str,
    password: &str,
) -> Result<String, ApiError> {
    let user = state
        .db
        .get_user_by_username(participant_name)?
        .ok_or_else(|| {
            warn!("Token requested for unknown user {}", participant_name);
            ApiError::UserNotFound
        })?;

    if !verify_password(password, &user.password_hash)? {
        warn!("Wrong password for user {}", participant_name);
        return Err(ApiError::WrongPassword);
    }

    let token = state
        .issuer
        .issue(participant_name, VideoGrant::join_room(room_name))?;

    state.db.insert_meeting_log(room_name, user.id)?;

    info!("User {} joined room {}", participant_name, room_name);
    Ok(token)
}
