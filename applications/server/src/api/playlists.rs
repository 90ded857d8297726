/// Playlist API routes
use crate::{api::songs::DeletedResponse, error::Result, middleware::CurrentUser, state::AppState};
use super::extract::{self, Path};
use axum::{extract::State, Json};
use moon_core::{Playlist, PlaylistId, SongId};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    pub song_id: SongId,
}

/// POST /playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    extract::Json(req): extract::Json<CreatePlaylistRequest>,
) -> Result<Json<Playlist>> {
    let playlist = app_state.playlists.create(&user, req.label).await?;
    Ok(Json(playlist))
}

/// GET /playlists/:id
pub async fn get_playlist(
    State(app_state): State<AppState>,
    Path(id): Path<PlaylistId>,
) -> Result<Json<Playlist>> {
    Ok(Json(app_state.playlists.get(id).await?))
}

/// POST /playlists/:id
pub async fn add_song_to_playlist(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<PlaylistId>,
    extract::Json(req): extract::Json<AddSongRequest>,
) -> Result<Json<Playlist>> {
    let playlist = app_state.playlists.add_song(&user, id, req.song_id).await?;
    Ok(Json(playlist))
}

/// DELETE /playlists/:id/songs/:song_id
pub async fn remove_song_from_playlist(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((id, song_id)): Path<(PlaylistId, SongId)>,
) -> Result<Json<Playlist>> {
    let playlist = app_state.playlists.remove_song(&user, id, song_id).await?;
    Ok(Json(playlist))
}

/// DELETE /playlists/:id
pub async fn delete_playlist(
    State(app_state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<PlaylistId>,
) -> Result<Json<DeletedResponse>> {
    app_state.playlists.delete(&user, id).await?;
    Ok(Json(DeletedResponse { ok: true }))
}
