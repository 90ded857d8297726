/// Bearer authentication
use crate::{
    error::{AuthError, ServerError},
    state::AppState,
};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use moon_core::User;

/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
///
/// Use as an extractor: a handler taking `CurrentUser` answers 401 before it
/// runs when the token is missing, invalid, expired or names an unknown user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Extract the token from an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingToken)?;

        let user = state.access.current_user(token).await.map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            e
        })?;

        Ok(CurrentUser(user))
    }
}
