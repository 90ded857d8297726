//! Storage trait: the entity store seam between the server and a database

use crate::error::Result;
use crate::types::{
    CreatePlaylist, CreateSong, CreateUser, Playlist, PlaylistId, Song, SongId, UpdateProfile,
    UpdateSong, User, UserId,
};
use async_trait::async_trait;

/// Persistent records for songs, users, playlists and their links.
///
/// Lookups return `Ok(None)` on a miss; only faults of the backend are errors.
/// Multi-step mutations (user signup, playlist delete, song delete) are atomic.
#[async_trait]
pub trait Storage: Send + Sync {
    // ========================================================================
    // Songs
    // ========================================================================

    /// Page through the catalog ordered by id
    async fn list_songs(&self, offset: i64, limit: i64) -> Result<Vec<Song>>;

    /// Case-insensitive regular expression match against titles
    async fn search_songs(&self, pattern: &str) -> Result<Vec<Song>>;

    /// Get song by ID
    async fn get_song(&self, id: SongId) -> Result<Option<Song>>;

    /// Insert a song
    async fn create_song(&self, song: CreateSong) -> Result<Song>;

    /// Apply a sparse update, returning `None` if the song does not exist
    async fn update_song(&self, id: SongId, update: UpdateSong) -> Result<Option<Song>>;

    /// Remove a song and every playlist link pointing at it.
    /// Returns `false` if the song did not exist.
    async fn delete_song(&self, id: SongId) -> Result<bool>;

    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user together with its default playlists.
    /// A taken username yields `MoonError::Duplicate`.
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Get user by login name
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Apply a sparse profile update, returning `None` if the user does not exist
    async fn update_profile(&self, id: UserId, update: UpdateProfile) -> Result<Option<User>>;

    /// Get all users (admin/CLI use)
    async fn get_all_users(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create a new playlist
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// Get playlist by ID, without songs
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>>;

    /// Get playlist with its songs loaded
    async fn get_playlist_with_songs(&self, id: PlaylistId) -> Result<Option<Playlist>>;

    /// Playlists owned by `user_id`, songs loaded
    async fn get_user_playlists(&self, user_id: UserId) -> Result<Vec<Playlist>>;

    /// Link a song to a playlist. Linking twice is a no-op; returns `true` if a
    /// link row was inserted.
    async fn add_song_to_playlist(&self, playlist_id: PlaylistId, song_id: SongId)
        -> Result<bool>;

    /// Unlink a song. Returns `false` if it was not linked.
    async fn remove_song_from_playlist(
        &self,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<bool>;

    /// Clear the playlist's links, then delete the playlist row.
    /// Returns `false` if the playlist did not exist.
    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool>;
}
