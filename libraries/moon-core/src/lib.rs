//! Moon Core
//!
//! Domain types, the storage seam and error handling shared by the Moon
//! storage layer and HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `User`, `Playlist` and their create/update payloads
//! - **Storage Trait**: `Storage`, implemented by `moon-storage` on `SQLite`
//! - **Error Handling**: Unified `MoonError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use moon_core::types::{Playlist, DEFAULT_PLAYLISTS};
//!
//! let favorites = Playlist {
//!     id: 1,
//!     label: DEFAULT_PLAYLISTS[0].to_string(),
//!     user_id: 1,
//!     songs: None,
//! };
//! assert!(favorites.is_owned_by(1));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{MoonError, Result};
pub use storage::Storage;

pub use types::{
    CreatePlaylist, CreateSong, CreateUser, Playlist, PlaylistId, Song, SongId, UpdateProfile,
    UpdateSong, User, UserId, DEFAULT_AVATAR, DEFAULT_PLAYLISTS,
};
