//! Shared primitives for the player wallet gateway.
//!
//! Everything in this crate is consumed by both the provider-facing client
//! (`wallet_client`) and the storage backend (`player_wallet_engine`):
//! the canonical fixed-point [`Amount`] type, the tenant decimal scale
//! ([`DecimalMultiplier`]), the per-tenant connection record
//! ([`TenantProfile`]) and the [`Secret`] wrapper that keeps credentials out
//! of logs.

mod amount;
mod multiplier;
mod op;
mod secret;
mod tenant;

pub use amount::{Amount, AmountConversionError, SUBUNITS_PER_UNIT};
pub use multiplier::DecimalMultiplier;
pub use secret::Secret;
pub use tenant::TenantProfile;
