//! Low-level SQLite interactions.
//!
//! Everything here is a plain function over a `&mut SqliteConnection`, so
//! callers can hand in a pooled connection or an open transaction without
//! any other changes.
use std::env;

use log::info;
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod sessions;
pub mod tenants;

const SQLITE_DB_URL: &str = "sqlite://data/wallet_gateway.db";

pub fn db_url() -> String {
    let result = env::var("PWG_DATABASE_URL").unwrap_or_else(|_| {
        info!("PWG_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
