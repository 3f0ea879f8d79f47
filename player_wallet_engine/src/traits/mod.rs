//! Interface contracts for gateway storage backends.
//!
//! * [`TenantManagement`] is the tenant registry: a keyed store of
//!   [`pwg_common::TenantProfile`] records.
//! * [`SessionManagement`] is the session-token store: opaque tokens with a
//!   fixed expiry, resolvable in both directions, plus named counters.
//!
//! The gateway itself only reads from these stores; writes come from the
//! operator-facing configuration and login flows.
mod session_management;
mod tenant_management;

pub use session_management::{SessionApiError, SessionManagement, SESSION_TTL_SECONDS};
pub use tenant_management::{TenantApiError, TenantManagement};
