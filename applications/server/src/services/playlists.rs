/// Playlist operations gated by ownership
use crate::{
    error::{Result, ServerError},
    services::AccessControl,
};
use moon_core::{CreatePlaylist, Playlist, PlaylistId, SongId, Storage, User};
use std::sync::Arc;

#[derive(Clone)]
pub struct PlaylistService {
    db: Arc<dyn Storage>,
}

impl PlaylistService {
    pub fn new(db: Arc<dyn Storage>) -> Self {
        Self { db }
    }

    /// Create a playlist owned by `owner`
    pub async fn create(&self, owner: &User, label: String) -> Result<Playlist> {
        let playlist = self
            .db
            .create_playlist(CreatePlaylist {
                label,
                user_id: owner.id,
            })
            .await?;

        tracing::debug!("User {} created playlist {}", owner.id, playlist.id);
        Ok(playlist)
    }

    /// Fetch any playlist with its songs; reads are not ownership-checked
    pub async fn get(&self, id: PlaylistId) -> Result<Playlist> {
        self.db
            .get_playlist_with_songs(id)
            .await?
            .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))
    }

    /// Playlists owned by `user`
    pub async fn list_for(&self, user: &User) -> Result<Vec<Playlist>> {
        Ok(self.db.get_user_playlists(user.id).await?)
    }

    /// Link a song into a playlist the caller owns.
    ///
    /// An unknown playlist or song is a bad request. Adding a song that is
    /// already present leaves the playlist unchanged.
    pub async fn add_song(
        &self,
        caller: &User,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<Playlist> {
        let playlist = self.db.get_playlist(playlist_id).await?;
        let song = self.db.get_song(song_id).await?;

        let (Some(playlist), Some(_)) = (playlist, song) else {
            return Err(ServerError::BadRequest(
                "Invalid playlist_id or song_id".to_string(),
            ));
        };

        AccessControl::require_owner(caller, &playlist)?;

        if !self.db.add_song_to_playlist(playlist.id, song_id).await? {
            tracing::debug!("Song {} already in playlist {}", song_id, playlist.id);
        }

        self.get(playlist.id).await
    }

    /// Unlink a song from a playlist the caller owns
    pub async fn remove_song(
        &self,
        caller: &User,
        playlist_id: PlaylistId,
        song_id: SongId,
    ) -> Result<Playlist> {
        let playlist = self.owned_playlist(caller, playlist_id).await?;

        if !self.db.remove_song_from_playlist(playlist.id, song_id).await? {
            return Err(ServerError::NotFound(
                "Song is not in this playlist".to_string(),
            ));
        }

        self.get(playlist.id).await
    }

    /// Two-phase delete of a playlist the caller owns
    pub async fn delete(&self, caller: &User, playlist_id: PlaylistId) -> Result<()> {
        let playlist = self.owned_playlist(caller, playlist_id).await?;

        if !self.db.delete_playlist(playlist.id).await? {
            // Deleted by a concurrent request between the lookup and here
            return Err(ServerError::NotFound("Playlist not found".to_string()));
        }

        tracing::info!("User {} deleted playlist {}", caller.id, playlist.id);
        Ok(())
    }

    async fn owned_playlist(&self, caller: &User, playlist_id: PlaylistId) -> Result<Playlist> {
        let playlist = self
            .db
            .get_playlist(playlist_id)
            .await?
            .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

        AccessControl::require_owner(caller, &playlist)?;
        Ok(playlist)
    }
}
