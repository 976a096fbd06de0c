use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::ApiError,
    recipes::{
        dto::{CreateRecipeRequest, RecipeView},
        repo::{self, validate_instructions, validate_title},
    },
    session::CurrentUser,
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new().route("/recipes", get(list_recipes).post(create_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<RecipeView>>, ApiError> {
    let rows = repo::list_all(&state.db).await?;
    Ok(Json(rows.into_iter().map(RecipeView::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Option<Json<CreateRecipeRequest>>,
) -> Result<(StatusCode, Json<RecipeView>), ApiError> {
    let Json(payload) = payload.unwrap_or_default();

    let title = payload.title.unwrap_or_default();
    let instructions = payload.instructions.unwrap_or_default();
    validate_title(&title)?;
    validate_instructions(&instructions)?;

    let recipe = repo::create(
        &state.db,
        user.id,
        &title,
        &instructions,
        payload.minutes_to_complete,
    )
    .await?;

    info!(recipe_id = recipe.id, user_id = user.id, "recipe created");
    Ok((StatusCode::CREATED, Json(RecipeView::owned_by(recipe, &user))))
}
