//! User accounts and credentials

use moon_core::{error::Result, CreateUser, UpdateProfile, User, UserId, DEFAULT_PLAYLISTS};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, firstname, lastname, avatar, hashed_password";

/// Create a user and its default playlists in one transaction.
///
/// A taken username surfaces as `MoonError::Duplicate` through the unique index.
pub async fn create_with_default_playlists(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, firstname, lastname, hashed_password)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&user.username)
    .bind(&user.firstname)
    .bind(&user.lastname)
    .bind(&user.hashed_password)
    .execute(&mut *tx)
    .await?;

    let user_id = result.last_insert_rowid();

    for label in DEFAULT_PLAYLISTS {
        sqlx::query("INSERT INTO playlists (label, user_id) VALUES (?, ?)")
            .bind(label)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    get_by_id(pool, user_id).await?.ok_or_else(|| {
        moon_core::MoonError::storage("Failed to retrieve created user")
    })
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Get user by login name; a miss is `Ok(None)`
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Sparse update of the name fields
pub async fn update_profile(
    pool: &SqlitePool,
    id: UserId,
    update: UpdateProfile,
) -> Result<Option<User>> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET firstname = COALESCE(?, firstname),
            lastname = COALESCE(?, lastname)
        WHERE id = ?
        "#,
    )
    .bind(update.firstname)
    .bind(update.lastname)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_by_id(pool, id).await
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY username"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}
