//! Player Wallet Engine
//!
//! Storage backend for the player wallet gateway. Two concerns live here:
//!
//! 1. The tenant registry: the connection profile of every wallet provider
//!    tenant (base URL, auth header and secret, API version, decimal
//!    multiplier), keyed by tenant id. The gateway loads a profile per call
//!    and never writes one.
//! 2. The session store: short-lived opaque tokens mapping players to play
//!    sessions and back, with a fixed five-hour expiry in both directions,
//!    plus named atomic counters.
//!
//! Backends implement the traits in [`traits`]; SQLite is the bundled
//! implementation, with the schema applied from embedded migrations on
//! connect.

pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
