use sqlx::{FromRow, SqlitePool};

use crate::error::ApiError;

/// A `users` row. Deliberately not `Serialize`: the password hash must never
/// reach a response body, so serialization goes through `UserView` only.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

pub fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.is_empty() {
        return Err(ApiError::Unprocessable("Username must be present".into()));
    }
    Ok(())
}

impl User {
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        password_hash: &str,
        image_url: Option<&str>,
        bio: Option<&str>,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, image_url, bio)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, password_hash, image_url, bio
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(image_url)
        .bind(bio)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_username(db: &SqlitePool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, image_url, bio
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, image_url, bio
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}
