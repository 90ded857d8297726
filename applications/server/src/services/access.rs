/// Access control - who is calling, and may they touch this resource
use crate::{
    error::{AuthError, Result, ServerError},
    services::{auth::MAX_PASSWORD_BYTES, AuthService},
};
use moon_core::{CreateUser, Playlist, Storage, User};
use std::sync::Arc;

/// Signup payload before hashing
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Resolves credentials and bearer tokens to users and enforces ownership
#[derive(Clone)]
pub struct AccessControl {
    db: Arc<dyn Storage>,
    auth: Arc<AuthService>,
}

impl AccessControl {
    pub fn new(db: Arc<dyn Storage>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Register an account and its default playlists
    pub async fn signup(&self, account: NewAccount) -> Result<User> {
        let username = account.username.trim();
        if username.is_empty() {
            return Err(ServerError::Validation("username must not be empty".to_string()));
        }
        if account.password.is_empty() {
            return Err(ServerError::Validation("password must not be empty".to_string()));
        }
        if account.password.len() > MAX_PASSWORD_BYTES {
            return Err(ServerError::Validation(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        if self.db.find_user_by_username(username).await?.is_some() {
            return Err(ServerError::Conflict("Username already exist".to_string()));
        }

        let hashed_password = self.auth.hash_password(&account.password)?;

        let created = self
            .db
            .create_user(CreateUser {
                username: username.to_string(),
                firstname: account.firstname,
                lastname: account.lastname,
                hashed_password,
            })
            .await;

        match created {
            Ok(user) => {
                tracing::info!("Created user {} ({})", user.username, user.id);
                Ok(user)
            }
            // Lost a race with a concurrent signup for the same name
            Err(moon_core::MoonError::Duplicate(_)) => {
                Err(ServerError::Conflict("Username already exist".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username/password pair
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        let Some(user) = self.db.find_user_by_username(username).await? else {
            tracing::warn!("Login attempt for unknown user {}", username);
            return Err(AuthError::UserNotFound.into());
        };

        if !self.auth.verify_password(password, &user.hashed_password) {
            tracing::warn!("Bad password for user {}", username);
            return Err(AuthError::BadCredentials.into());
        }

        Ok(user)
    }

    /// Resolve a bearer token to the user it was issued for
    pub async fn current_user(&self, token: &str) -> Result<User> {
        let username = self.auth.verify_token(token)?;

        self.db
            .find_user_by_username(&username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// True iff `user` owns `playlist`
    pub fn authorize_ownership(user: &User, playlist: &Playlist) -> bool {
        playlist.is_owned_by(user.id)
    }

    /// Fail with 403 unless `user` owns `playlist`
    pub fn require_owner(user: &User, playlist: &Playlist) -> Result<()> {
        if Self::authorize_ownership(user, playlist) {
            Ok(())
        } else {
            tracing::warn!(
                "User {} tried to modify playlist {} owned by {}",
                user.id,
                playlist.id,
                playlist.user_id
            );
            Err(ServerError::Forbidden(
                "Playlist belongs to another user".to_string(),
            ))
        }
    }
}
