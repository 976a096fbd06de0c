//! Server-side session state: an opaque client-held token mapped to the
//! authenticated user's id. The client never sees the user id, only the token,
//! which travels in an HTTP-only cookie.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use rand::{distributions::Alphanumeric, Rng};

use crate::{auth::repo::User, error::ApiError, state::AppState};

const TOKEN_LEN: usize = 32;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, i64>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh opaque token bound to `user_id`.
    pub fn create(&self, user_id: i64) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(token.clone(), user_id);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<i64> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(token)
            .copied()
    }

    /// Removes the session; returns whether it existed.
    pub fn destroy(&self, token: &str) -> bool {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token)
            .is_some()
    }
}

pub fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .build()
}

pub fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .path("/")
        .http_only(true)
        .build()
}

/// Resolves the session cookie to the authenticated user. Rejects with
/// 401 `{"error":"Unauthorized"}` when the cookie is missing, the token is
/// unknown, or the user row no longer exists.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&state.config.session_cookie)
            .map(|c| c.value().to_string())
            .ok_or(ApiError::Unauthorized)?;

        let user_id = state.sessions.resolve(&token).ok_or(ApiError::Unauthorized)?;

        let user = User::find_by_id(&state.db, user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_resolve_destroy_lifecycle() {
        let store = SessionStore::new();
        let token = store.create(7);
        assert_eq!(store.resolve(&token), Some(7));
        assert!(store.destroy(&token));
        assert_eq!(store.resolve(&token), None);
    }

    #[test]
    fn destroy_unknown_token_is_false() {
        let store = SessionStore::new();
        assert!(!store.destroy("nope"));
    }

    #[test]
    fn tokens_are_opaque_and_distinct() {
        let store = SessionStore::new();
        let a = store.create(1);
        let b = store.create(1);
        assert_eq!(a.len(), TOKEN_LEN);
        assert_ne!(a, b);
    }
}
