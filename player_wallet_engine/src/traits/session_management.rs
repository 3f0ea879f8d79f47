use thiserror::Error;

/// Session records live this long, in both lookup directions.
pub const SESSION_TTL_SECONDS: i64 = 60 * 60 * 5;

#[allow(async_fn_in_trait)]
pub trait SessionManagement {
    /// Issue a fresh opaque token for the player and store the mapping in
    /// both directions with the standard TTL.
    async fn create_session(&self, player_id: &str) -> Result<String, SessionApiError>;

    /// Resolve a token back to its player id. Unknown and expired tokens
    /// both resolve to `None`.
    async fn fetch_player_for_token(&self, token: &str) -> Result<Option<String>, SessionApiError>;

    /// The player's most recently issued, still-live token, if any.
    async fn fetch_token_for_player(&self, player_id: &str) -> Result<Option<String>, SessionApiError>;

    /// Atomically increment the named counter and return the new value.
    /// Counters start at zero the first time a key is seen.
    async fn increment_counter(&self, key: &str) -> Result<i64, SessionApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum SessionApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for SessionApiError {
    fn from(e: sqlx::Error) -> Self {
        SessionApiError::DatabaseError(e.to_string())
    }
}
