use serde::{Deserialize, Serialize};

use crate::auth::repo::User;
use crate::recipes::repo::{Recipe, RecipeWithOwner};

#[derive(Debug, Default, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub minutes_to_complete: Option<i64>,
}

/// Owner fields embedded in a recipe view. All null when the owning user row
/// is gone.
#[derive(Debug, Serialize)]
pub struct RecipeOwner {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipeView {
    pub id: i64,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i64>,
    pub user: RecipeOwner,
}

impl From<RecipeWithOwner> for RecipeView {
    fn from(row: RecipeWithOwner) -> Self {
        Self {
            id: row.id,
            title: row.title,
            instructions: row.instructions,
            minutes_to_complete: row.minutes_to_complete,
            user: RecipeOwner {
                id: row.owner_id,
                username: row.owner_username,
                image_url: row.owner_image_url,
                bio: row.owner_bio,
            },
        }
    }
}

impl RecipeView {
    /// View for a freshly created recipe; the owner is the session user.
    pub fn owned_by(recipe: Recipe, owner: &User) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            instructions: recipe.instructions,
            minutes_to_complete: recipe.minutes_to_complete,
            user: RecipeOwner {
                id: Some(owner.id),
                username: Some(owner.username.clone()),
                image_url: owner.image_url.clone(),
                bio: owner.bio.clone(),
            },
        }
    }
}
