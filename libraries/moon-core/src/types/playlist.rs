//! Playlist types

use super::song::Song;
use super::user::UserId;
use serde::{Deserialize, Serialize};

pub type PlaylistId = i64;

/// Labels of the playlists every account starts with
pub const DEFAULT_PLAYLISTS: [&str; 2] = ["_favorite", "_library"];

/// Unordered set of songs owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Playlist {
    pub id: PlaylistId,
    pub label: String,
    pub user_id: UserId,

    /// Songs in playlist (optional, populated when requested)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[cfg_attr(feature = "sqlx-support", sqlx(skip))]
    pub songs: Option<Vec<Song>>,
}

impl Playlist {
    /// True when `user_id` owns this playlist
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub label: String,
    pub user_id: UserId,
}
