/// User domain types
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// Avatar assigned to accounts that never set one
pub const DEFAULT_AVATAR: &str = "https://avatars.githubusercontent.com/ppvan";

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name, unique across the catalog
    pub username: String,

    pub firstname: String,
    pub lastname: String,

    /// Avatar URL
    pub avatar: String,

    /// bcrypt hash of the password. Never serialized.
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
}

/// Data for creating a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub hashed_password: String,
}

/// Profile update; username and password are not reachable from here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}
