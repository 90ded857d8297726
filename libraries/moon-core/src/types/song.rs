//! Song types

use serde::{Deserialize, Serialize};

pub type SongId = i64;

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub album: String,
    pub artist: String,
    pub thumbnail: String,
    /// Opaque reference to the media, usually a `/static` URL
    pub data: String,
}

/// Data for inserting a song into the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSong {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub thumbnail: String,
    pub data: String,
}

/// Sparse update: only `Some` fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSong {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}

impl UpdateSong {
    /// True when the payload carries no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.album.is_none() && self.artist.is_none()
    }
}
