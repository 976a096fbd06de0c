use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, SignupRequest, UserView},
        password::{hash_password, verify_password},
        repo::{validate_username, User},
    },
    error::ApiError,
    session::{removal_cookie, session_cookie, CurrentUser},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/check_session", get(check_session))
        .route("/login", post(login))
        .route("/logout", delete(logout))
}

#[instrument(skip(state, jar, payload))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Option<Json<SignupRequest>>,
) -> Result<(StatusCode, CookieJar, Json<UserView>), ApiError> {
    let Json(payload) = payload.unwrap_or_default();

    let (Some(username), Some(password)) = (
        payload.username.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
    ) else {
        warn!("signup with missing credentials");
        return Err(ApiError::MissingCredentials);
    };

    validate_username(&username)?;
    let hash = hash_password(&password)?;

    // a duplicate username surfaces here as a unique violation
    let user = User::create(
        &state.db,
        &username,
        &hash,
        payload.image_url.as_deref(),
        payload.bio.as_deref(),
    )
    .await?;

    let token = state.sessions.create(user.id);
    let jar = jar.add(session_cookie(&state.config.session_cookie, token));

    info!(user_id = user.id, username = %user.username, "user signed up");
    Ok((StatusCode::CREATED, jar, Json(UserView::from(user))))
}

#[instrument(skip_all)]
pub async fn check_session(CurrentUser(user): CurrentUser) -> Json<UserView> {
    Json(UserView::from(user))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Option<Json<LoginRequest>>,
) -> Result<(CookieJar, Json<UserView>), ApiError> {
    let Json(payload) = payload.unwrap_or_default();

    let (Some(username), Some(password)) = (
        payload.username.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
    ) else {
        warn!("login with missing credentials");
        return Err(ApiError::MissingCredentials);
    };

    let Some(user) = User::find_by_username(&state.db, &username).await? else {
        warn!(username = %username, "login unknown username");
        return Err(ApiError::Unauthorized);
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized);
    }

    let token = state.sessions.create(user.id);
    let jar = jar.add(session_cookie(&state.config.session_cookie, token));

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok((jar, Json(UserView::from(user))))
}

#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), ApiError> {
    let token = jar
        .get(&state.config.session_cookie)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    if !state.sessions.destroy(&token) {
        return Err(ApiError::Unauthorized);
    }

    let jar = jar.remove(removal_cookie(&state.config.session_cookie));
    Ok((StatusCode::NO_CONTENT, jar))
}
