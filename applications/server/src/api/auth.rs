/// Authentication and account API routes
use crate::{
    error::Result,
    middleware::CurrentUser,
    services::NewAccount,
    state::AppState,
};
use super::extract;
use axum::{extract::State, Json};
use moon_core::{Playlist, UpdateProfile, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password: String,
}

/// OAuth2 password-grant form; extra grant fields are ignored
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /auth/signup
pub async fn signup(
    State(app_state): State<AppState>,
    extract::Json(req): extract::Json<SignupRequest>,
) -> Result<Json<User>> {
    let user = app_state
        .access
        .signup(NewAccount {
            username: req.username,
            password: req.password,
            firstname: req.firstname,
            lastname: req.lastname,
        })
        .await?;

    Ok(Json(user))
}

/// POST /auth/token
pub async fn login(
    State(app_state): State<AppState>,
    extract::Form(form): extract::Form<LoginForm>,
) -> Result<Json<TokenResponse>> {
    let user = app_state
        .access
        .authenticate(&form.username, &form.password)
        .await?;

    let access_token = app_state.auth_service.create_access_token(&user.username)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /auth/profile
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// PATCH /auth/profile
/// Only firstname/lastname are writable here
pub async fn update_profile(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    extract::Json(update): extract::Json<UpdateProfile>,
) -> Result<Json<User>> {
    let updated = app_state
        .db
        .update_profile(user.id, update)
        .await?
        .ok_or_else(|| moon_core::MoonError::not_found("User", user.id))?;

    Ok(Json(updated))
}

/// GET /auth/playlists
/// The caller's own playlists, songs included
pub async fn get_user_playlists(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Playlist>>> {
    let playlists = app_state.playlists.list_for(&user).await?;
    Ok(Json(playlists))
}
