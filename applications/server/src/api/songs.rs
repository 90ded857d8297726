/// Song catalog API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use super::extract::{self, Path, Query};
use axum::{extract::State, Json};
use moon_core::{CreateSong, Song, SongId, UpdateSong};
use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct ListSongsQuery {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub ok: bool,
}

/// GET /songs
pub async fn list_songs(
    State(app_state): State<AppState>,
    Query(params): Query<ListSongsQuery>,
) -> Result<Json<Vec<Song>>> {
    if params.offset < 0 || params.limit < 0 {
        return Err(ServerError::Validation(
            "offset and limit must not be negative".to_string(),
        ));
    }

    let songs = app_state.db.list_songs(params.offset, params.limit).await?;
    Ok(Json(songs))
}

/// GET /songs/search?query=
///
/// Titles matching `query` as a case-insensitive regular expression.
/// The pattern is compiled here first so a malformed one is a 422
/// rather than a storage failure.
pub async fn search_songs(
    State(app_state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Song>>> {
    regex::Regex::new(&format!("(?i){}", params.query))
        .map_err(|e| ServerError::Validation(format!("Invalid search pattern: {}", e)))?;

    let songs = app_state.db.search_songs(&params.query).await?;
    Ok(Json(songs))
}

/// GET /songs/:id
pub async fn get_song(
    State(app_state): State<AppState>,
    Path(id): Path<SongId>,
) -> Result<Json<Song>> {
    let song = app_state
        .db
        .get_song(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;

    Ok(Json(song))
}

/// POST /songs
pub async fn create_song(
    State(app_state): State<AppState>,
    extract::Json(song): extract::Json<CreateSong>,
) -> Result<Json<Song>> {
    let song = app_state.db.create_song(song).await?;
    tracing::info!("Created song {} ({})", song.title, song.id);
    Ok(Json(song))
}

/// PATCH /songs/:id
pub async fn update_song(
    State(app_state): State<AppState>,
    Path(id): Path<SongId>,
    extract::Json(update): extract::Json<UpdateSong>,
) -> Result<Json<Song>> {
    let song = app_state
        .db
        .update_song(id, update)
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;

    Ok(Json(song))
}

/// DELETE /songs/:id
/// Playlist links to the song go with it
pub async fn delete_song(
    State(app_state): State<AppState>,
    Path(id): Path<SongId>,
) -> Result<Json<DeletedResponse>> {
    if !app_state.db.delete_song(id).await? {
        return Err(ServerError::NotFound("Song not found".to_string()));
    }

    tracing::info!("Deleted song {}", id);
    Ok(Json(DeletedResponse { ok: true }))
}
