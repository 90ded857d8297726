/// Database implementation of the core `Storage` trait
use crate::{playlists, songs, users};
use async_trait::async_trait;
use moon_core::{
    error::Result, CreatePlaylist, CreateSong, CreateUser, Playlist, PlaylistId, Song, SongId,
    Storage, UpdateProfile, UpdateSong, User, UserId,
};
use sqlx::SqlitePool;

/// `SQLite`-backed entity store
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and bring the schema up to date
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (migrations are the caller's job)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Storage for Database {
    // Songs
    async fn list_songs(&self, offset: i64, limit: i64) -> Result<Vec<Song>> {
        songs::get_all(&self.pool, offset, limit).await
    }

    async fn search_songs(&self, pattern: &str) -> Result<Vec<Song>> {
        songs::search(&self.pool, pattern).await
    }

    async fn get_song(&self, id: SongId) -> Result<Option<Song>> {
        songs::get_by_id(&self.pool, id).await
    }

    async fn create_song(&self, song: CreateSong) -> Result<Song> {
        songs::create(&self.pool, song).await
    }

    async fn update_song(&self, id: SongId, update: UpdateSong) -> Result<Option<Song>> {
        songs::update(&self.pool, id, update).await
    }

    async fn delete_song(&self, id: SongId) -> Result<bool> {
        songs::delete(&self.pool, id).await
    }

    // Users
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        users::create_with_default_playlists(&self.pool, user).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        users::get_by_username(&self.pool, username).await
    }

    async fn update_profile(&self, id: UserId, update: UpdateProfile) -> Result<Option<User>> {
        users::update_profile(&self.pool, id, update).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    // Playlists
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn get_playlist_with_songs(&self, id: PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_with_songs(&self.pool, id).await
    }

    async fn get_user_playlists(&self, user_id: UserId) -> Result<Vec<Playlist>> {
        playlists::get_user_playlists(&self.pool, user_id).await
    }

    async fn add_song_to_playlist(
        &self,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<bool> {
        playlists::add_song(&self.pool, playlist_id, song_id).await
    }

    async fn remove_song_from_playlist(
        &self,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<bool> {
        playlists::remove_song(&self.pool, playlist_id, song_id).await
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool> {
        playlists::delete(&self.pool, id).await
    }
}
