use sqlx::{FromRow, SqlitePool};

use crate::error::ApiError;

#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i64>,
    pub user_id: i64,
}

/// A recipe joined with its owner's public columns. Owner columns are
/// nullable so a dangling `user_id` still yields a row.
#[derive(Debug, FromRow)]
pub struct RecipeWithOwner {
    pub id: i64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i64>,
    pub owner_id: Option<i64>,
    pub owner_username: Option<String>,
    pub owner_image_url: Option<String>,
    pub owner_bio: Option<String>,
}

pub fn validate_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::Unprocessable("Title must be present".into()));
    }
    Ok(())
}

pub fn validate_instructions(instructions: &str) -> Result<(), ApiError> {
    let trimmed = instructions.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Unprocessable(
            "Instructions must be present".into(),
        ));
    }
    if trimmed.chars().count() < 50 {
        return Err(ApiError::Unprocessable(
            "Instructions must be at least 50 characters long".into(),
        ));
    }
    Ok(())
}

pub async fn create(
    db: &SqlitePool,
    user_id: i64,
    title: &str,
    instructions: &str,
    minutes_to_complete: Option<i64>,
) -> sqlx::Result<Recipe> {
    sqlx::query_as::<_, Recipe>(
        r#"
        INSERT INTO recipes (title, instructions, minutes_to_complete, user_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, title, instructions, minutes_to_complete, user_id
        "#,
    )
    .bind(title)
    .bind(instructions)
    .bind(minutes_to_complete)
    .bind(user_id)
    .fetch_one(db)
    .await
}

pub async fn list_all(db: &SqlitePool) -> sqlx::Result<Vec<RecipeWithOwner>> {
    sqlx::query_as::<_, RecipeWithOwner>(
        r#"
        SELECT r.id, r.title, r.instructions, r.minutes_to_complete,
               u.id AS owner_id, u.username AS owner_username,
               u.image_url AS owner_image_url, u.bio AS owner_bio
        FROM recipes r
        LEFT JOIN users u ON u.id = r.user_id
        ORDER BY r.id
        "#,
    )
    .fetch_all(db)
    .await
}
