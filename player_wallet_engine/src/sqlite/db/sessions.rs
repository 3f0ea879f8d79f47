use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::traits::{SessionApiError, SESSION_TTL_SECONDS};

/// Issue a new token for the player. Expired rows are swept on each insert;
/// there is no background cleanup job.
pub async fn create_session(player_id: &str, conn: &mut SqliteConnection) -> Result<String, SessionApiError> {
    let token = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();
    let expires_at = now + SESSION_TTL_SECONDS;
    sqlx::query("DELETE FROM sessions WHERE expires_at <= $1").bind(now).execute(&mut *conn).await?;
    sqlx::query("INSERT INTO sessions (token, player_id, created_at, expires_at) VALUES ($1, $2, $3, $4)")
        .bind(&token)
        .bind(player_id)
        .bind(now)
        .bind(expires_at)
        .execute(conn)
        .await?;
    debug!("🗃️ Issued session token for player {player_id}, expires at {expires_at}");
    Ok(token)
}

pub async fn fetch_player_for_token(
    token: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<String>, SessionApiError> {
    let now = Utc::now().timestamp();
    let player = sqlx::query_scalar::<_, String>("SELECT player_id FROM sessions WHERE token = $1 AND expires_at > $2")
        .bind(token)
        .bind(now)
        .fetch_optional(conn)
        .await?;
    Ok(player)
}

pub async fn fetch_token_for_player(
    player_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<String>, SessionApiError> {
    let now = Utc::now().timestamp();
    let token = sqlx::query_scalar::<_, String>(
        r#"SELECT token FROM sessions WHERE player_id = $1 AND expires_at > $2
        ORDER BY created_at DESC, rowid DESC LIMIT 1"#,
    )
    .bind(player_id)
    .bind(now)
    .fetch_optional(conn)
    .await?;
    Ok(token)
}

pub async fn increment_counter(key: &str, conn: &mut SqliteConnection) -> Result<i64, SessionApiError> {
    let value = sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO counters (key, value) VALUES ($1, 1)
        ON CONFLICT (key) DO UPDATE SET value = value + 1
        RETURNING value"#,
    )
    .bind(key)
    .fetch_one(conn)
    .await?;
    Ok(value)
}
