use pwg_common::TenantProfile;
use thiserror::Error;

#[allow(async_fn_in_trait)]
pub trait TenantManagement {
    /// Fetch the connection profile for the given tenant, if one is
    /// configured.
    async fn fetch_tenant(&self, tenant_id: i64) -> Result<Option<TenantProfile>, TenantApiError>;

    /// Insert the profile, or update it in place if the tenant id is already
    /// registered.
    async fn upsert_tenant(&self, profile: &TenantProfile) -> Result<(), TenantApiError>;

    /// Remove the profile. Deleting an unknown tenant is not an error.
    async fn delete_tenant(&self, tenant_id: i64) -> Result<(), TenantApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum TenantApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for TenantApiError {
    fn from(e: sqlx::Error) -> Self {
        TenantApiError::DatabaseError(e.to_string())
    }
}
