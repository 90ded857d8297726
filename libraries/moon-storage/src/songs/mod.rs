//! Song catalog queries

use moon_core::{error::Result, CreateSong, Song, SongId, UpdateSong};
use sqlx::SqlitePool;

const SONG_COLUMNS: &str = "id, title, album, artist, thumbnail, data";

/// Page through the catalog ordered by id
pub async fn get_all(pool: &SqlitePool, offset: i64, limit: i64) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>(&format!(
        "SELECT {SONG_COLUMNS} FROM songs ORDER BY id LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(songs)
}

/// Case-insensitive regular expression match on the title.
///
/// Unbounded: every match is returned.
pub async fn search(pool: &SqlitePool, pattern: &str) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>(&format!(
        "SELECT {SONG_COLUMNS} FROM songs WHERE title REGEXP ? ORDER BY id"
    ))
    .bind(format!("(?i){pattern}"))
    .fetch_all(pool)
    .await?;

    Ok(songs)
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: SongId) -> Result<Option<Song>> {
    let song = sqlx::query_as::<_, Song>(&format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(song)
}

/// Insert a song
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<Song> {
    let result = sqlx::query(
        r#"
        INSERT INTO songs (title, album, artist, thumbnail, data)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&song.title)
    .bind(&song.album)
    .bind(&song.artist)
    .bind(&song.thumbnail)
    .bind(&song.data)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id).await?.ok_or_else(|| {
        moon_core::MoonError::storage("Failed to retrieve created song")
    })
}

/// Apply a sparse update; absent fields keep their stored value
pub async fn update(pool: &SqlitePool, id: SongId, update: UpdateSong) -> Result<Option<Song>> {
    if update.is_empty() {
        return get_by_id(pool, id).await;
    }

    let result = sqlx::query(
        r#"
        UPDATE songs
        SET title = COALESCE(?, title),
            album = COALESCE(?, album),
            artist = COALESCE(?, artist)
        WHERE id = ?
        "#,
    )
    .bind(update.title)
    .bind(update.album)
    .bind(update.artist)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_by_id(pool, id).await
}

/// Delete a song after removing it from every playlist
pub async fn delete(pool: &SqlitePool, id: SongId) -> Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM playlist_song_links WHERE song_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
