use moon_core::{error::Result, CreatePlaylist, Playlist, PlaylistId, Song, SongId, UserId};
use sqlx::SqlitePool;

/// Get playlist by ID, songs not loaded
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let playlist =
        sqlx::query_as::<_, Playlist>("SELECT id, label, user_id FROM playlists WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(playlist)
}

/// Get playlist with all songs
pub async fn get_with_songs(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    // First get the playlist
    let Some(mut playlist) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    playlist.songs = Some(get_songs(pool, id).await?);

    Ok(Some(playlist))
}

/// Songs linked to a playlist, ordered by song id
pub async fn get_songs(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>(
        r#"
        SELECT s.id, s.title, s.album, s.artist, s.thumbnail, s.data
        FROM playlist_song_links l
        INNER JOIN songs s ON l.song_id = s.id
        WHERE l.playlist_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(songs)
}

/// Song ids linked to a playlist
pub async fn get_song_ids(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<SongId>> {
    let ids = sqlx::query_scalar::<_, SongId>(
        "SELECT song_id FROM playlist_song_links WHERE playlist_id = ? ORDER BY song_id",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Playlists owned by a user, each with its songs
pub async fn get_user_playlists(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Playlist>> {
    let mut playlists = sqlx::query_as::<_, Playlist>(
        "SELECT id, label, user_id FROM playlists WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    for playlist in &mut playlists {
        playlist.songs = Some(get_songs(pool, playlist.id).await?);
    }

    Ok(playlists)
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let result = sqlx::query("INSERT INTO playlists (label, user_id) VALUES (?, ?)")
        .bind(&playlist.label)
        .bind(playlist.user_id)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_with_songs(pool, id).await?.ok_or_else(|| {
        moon_core::MoonError::storage("Failed to retrieve created playlist")
    })
}

/// Link a song to a playlist.
///
/// The composite key makes a second link a no-op; returns whether a row was added.
pub async fn add_song(pool: &SqlitePool, playlist_id: PlaylistId, song_id: SongId) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO playlist_song_links (song_id, playlist_id)
        VALUES (?, ?)
        ON CONFLICT(song_id, playlist_id) DO NOTHING
        "#,
    )
    .bind(song_id)
    .bind(playlist_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Unlink a song from a playlist
pub async fn remove_song(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    song_id: SongId,
) -> Result<bool> {
    let result =
        sqlx::query("DELETE FROM playlist_song_links WHERE playlist_id = ? AND song_id = ?")
            .bind(playlist_id)
            .bind(song_id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete playlist: clear its links, then the playlist row
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM playlist_song_links WHERE playlist_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
