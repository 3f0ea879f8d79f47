//! Storage backend tests over an in-memory SQLite database.

use player_wallet_engine::{
    traits::{SessionManagement, TenantManagement, SESSION_TTL_SECONDS},
    SqliteDatabase,
};
use pwg_common::{DecimalMultiplier, Secret, TenantProfile};

async fn new_db() -> SqliteDatabase {
    let _ = env_logger::try_init();
    SqliteDatabase::new_with_url("sqlite::memory:", 1).await.expect("Error creating in-memory database")
}

fn profile(id: i64) -> TenantProfile {
    TenantProfile {
        id,
        base_url: "https://wallets.example.com/api".to_string(),
        auth_header: "x-wallet-auth".to_string(),
        auth_secret: Secret::new("s3cret".to_string()),
        api_version: 1,
        multiplier: DecimalMultiplier::Hundred,
    }
}

#[tokio::test]
async fn tenant_profiles_round_trip() {
    let db = new_db().await;
    assert!(db.fetch_tenant(12).await.unwrap().is_none());

    db.upsert_tenant(&profile(12)).await.unwrap();
    let fetched = db.fetch_tenant(12).await.unwrap().expect("tenant 12 should exist");
    assert_eq!(fetched.id, 12);
    assert_eq!(fetched.base_url, "https://wallets.example.com/api");
    assert_eq!(fetched.auth_header, "x-wallet-auth");
    assert_eq!(fetched.auth_secret.reveal(), "s3cret");
    assert_eq!(fetched.api_version, 1);
    assert_eq!(fetched.multiplier, DecimalMultiplier::Hundred);
}

#[tokio::test]
async fn upserting_an_existing_tenant_updates_in_place() {
    let db = new_db().await;
    db.upsert_tenant(&profile(12)).await.unwrap();

    let mut updated = profile(12);
    updated.api_version = 2;
    updated.multiplier = DecimalMultiplier::Thousand;
    updated.base_url = "https://wallets.example.com/api2".to_string();
    db.upsert_tenant(&updated).await.unwrap();

    let fetched = db.fetch_tenant(12).await.unwrap().unwrap();
    assert_eq!(fetched.api_version, 2);
    assert_eq!(fetched.multiplier, DecimalMultiplier::Thousand);
    assert_eq!(fetched.base_url, "https://wallets.example.com/api2");
}

#[tokio::test]
async fn deleting_a_tenant_removes_it() {
    let db = new_db().await;
    db.upsert_tenant(&profile(12)).await.unwrap();
    db.delete_tenant(12).await.unwrap();
    assert!(db.fetch_tenant(12).await.unwrap().is_none());
    // deleting again is a no-op, not an error
    db.delete_tenant(12).await.unwrap();
}

#[tokio::test]
async fn unknown_multipliers_load_as_one() {
    let db = new_db().await;
    sqlx::query(
        r#"INSERT INTO tenants (account, base_url, authentication_header, authentication_string, api_version, decimal_multiplier)
        VALUES (7, 'https://wallets.example.com', 'x-wallet-auth', 's3cret', 1, 250)"#,
    )
    .execute(db.pool())
    .await
    .unwrap();

    let fetched = db.fetch_tenant(7).await.unwrap().unwrap();
    assert_eq!(fetched.multiplier, DecimalMultiplier::One);
}

#[tokio::test]
async fn sessions_resolve_in_both_directions() {
    let db = new_db().await;
    let token = db.create_session("42p-1001").await.unwrap();
    assert_eq!(db.fetch_player_for_token(&token).await.unwrap().as_deref(), Some("42p-1001"));
    assert_eq!(db.fetch_token_for_player("42p-1001").await.unwrap(), Some(token));
    assert!(db.fetch_player_for_token("no-such-token").await.unwrap().is_none());
}

#[tokio::test]
async fn the_newest_token_wins_for_a_player() {
    let db = new_db().await;
    let first = db.create_session("42p-1001").await.unwrap();
    let second = db.create_session("42p-1001").await.unwrap();
    assert_ne!(first, second);
    assert_eq!(db.fetch_token_for_player("42p-1001").await.unwrap(), Some(second.clone()));
    // the older token still resolves until it expires
    assert_eq!(db.fetch_player_for_token(&first).await.unwrap().as_deref(), Some("42p-1001"));
}

#[tokio::test]
async fn expired_sessions_are_invisible() {
    let db = new_db().await;
    let token = db.create_session("42p-1001").await.unwrap();

    // age the session past its expiry
    sqlx::query("UPDATE sessions SET expires_at = expires_at - $1 WHERE token = $2")
        .bind(SESSION_TTL_SECONDS + 60)
        .bind(&token)
        .execute(db.pool())
        .await
        .unwrap();

    assert!(db.fetch_player_for_token(&token).await.unwrap().is_none());
    assert!(db.fetch_token_for_player("42p-1001").await.unwrap().is_none());

    // the next write sweeps the dead row out entirely
    db.create_session("42p-2002").await.unwrap();
    let gone = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sessions WHERE token = $1")
        .bind(&token)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(gone, 0);
}

#[tokio::test]
async fn counters_increment_atomically_per_key() {
    let db = new_db().await;
    assert_eq!(db.increment_counter("rounds:42").await.unwrap(), 1);
    assert_eq!(db.increment_counter("rounds:42").await.unwrap(), 2);
    assert_eq!(db.increment_counter("rounds:42").await.unwrap(), 3);
    assert_eq!(db.increment_counter("rounds:43").await.unwrap(), 1);
}
