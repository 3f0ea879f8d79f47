//! SQLite storage backend for the player wallet gateway.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
