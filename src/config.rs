use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Name of the cookie carrying the opaque session token.
    pub session_cookie: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://cookbook.db".into());
        let session_cookie = std::env::var("SESSION_COOKIE").unwrap_or_else(|_| "session".into());
        Ok(Self {
            database_url,
            session_cookie,
        })
    }
}
