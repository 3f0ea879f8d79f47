//! `SqliteDatabase` is the bundled storage backend: the tenant registry and
//! the session store over a single SQLite pool.
use std::fmt::Debug;

use log::*;
use pwg_common::TenantProfile;
use sqlx::SqlitePool;

use super::db::{sessions, tenants};
use crate::traits::{SessionApiError, SessionManagement, TenantApiError, TenantManagement};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connect to `url` and bring the schema up to date.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = super::db::new_pool(url, max_connections).await?;
        sqlx::migrate!("./src/sqlite/migrations").run(&pool).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    /// Connect to the database named by `PWG_DATABASE_URL`, or the bundled
    /// default path.
    pub async fn new_default(max_connections: u32) -> Result<Self, sqlx::Error> {
        Self::new_with_url(&super::db::db_url(), max_connections).await
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl TenantManagement for SqliteDatabase {
    async fn fetch_tenant(&self, tenant_id: i64) -> Result<Option<TenantProfile>, TenantApiError> {
        let mut conn = self.pool.acquire().await.map_err(TenantApiError::from)?;
        tenants::fetch_tenant(tenant_id, &mut conn).await
    }

    async fn upsert_tenant(&self, profile: &TenantProfile) -> Result<(), TenantApiError> {
        let mut conn = self.pool.acquire().await.map_err(TenantApiError::from)?;
        tenants::upsert_tenant(profile, &mut conn).await?;
        debug!("🗃️ Tenant {} profile saved", profile.id);
        Ok(())
    }

    async fn delete_tenant(&self, tenant_id: i64) -> Result<(), TenantApiError> {
        let mut conn = self.pool.acquire().await.map_err(TenantApiError::from)?;
        tenants::delete_tenant(tenant_id, &mut conn).await?;
        debug!("🗃️ Tenant {tenant_id} profile deleted");
        Ok(())
    }
}

impl SessionManagement for SqliteDatabase {
    async fn create_session(&self, player_id: &str) -> Result<String, SessionApiError> {
        let mut conn = self.pool.acquire().await.map_err(SessionApiError::from)?;
        sessions::create_session(player_id, &mut conn).await
    }

    async fn fetch_player_for_token(&self, token: &str) -> Result<Option<String>, SessionApiError> {
        let mut conn = self.pool.acquire().await.map_err(SessionApiError::from)?;
        sessions::fetch_player_for_token(token, &mut conn).await
    }

    async fn fetch_token_for_player(&self, player_id: &str) -> Result<Option<String>, SessionApiError> {
        let mut conn = self.pool.acquire().await.map_err(SessionApiError::from)?;
        sessions::fetch_token_for_player(player_id, &mut conn).await
    }

    async fn increment_counter(&self, key: &str) -> Result<i64, SessionApiError> {
        let mut conn = self.pool.acquire().await.map_err(SessionApiError::from)?;
        sessions::increment_counter(key, &mut conn).await
    }
}
