use pwg_common::{DecimalMultiplier, Secret, TenantProfile};
use sqlx::{FromRow, SqliteConnection};

use crate::traits::TenantApiError;

/// Raw row shape. Kept separate from [`TenantProfile`] so the auth string
/// only ever leaves this module wrapped in a [`Secret`].
#[derive(FromRow)]
struct TenantRow {
    account: i64,
    base_url: String,
    authentication_header: String,
    authentication_string: String,
    api_version: i64,
    decimal_multiplier: i64,
}

impl From<TenantRow> for TenantProfile {
    fn from(row: TenantRow) -> Self {
        TenantProfile {
            id: row.account,
            base_url: row.base_url,
            auth_header: row.authentication_header,
            auth_secret: Secret::new(row.authentication_string),
            api_version: row.api_version,
            multiplier: DecimalMultiplier::from_value(row.decimal_multiplier),
        }
    }
}

pub async fn fetch_tenant(
    tenant_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<TenantProfile>, TenantApiError> {
    let row = sqlx::query_as::<_, TenantRow>(
        r#"SELECT account, base_url, authentication_header, authentication_string, api_version, decimal_multiplier
        FROM tenants WHERE account = $1"#,
    )
    .bind(tenant_id)
    .fetch_optional(conn)
    .await?;
    Ok(row.map(TenantProfile::from))
}

pub async fn upsert_tenant(profile: &TenantProfile, conn: &mut SqliteConnection) -> Result<(), TenantApiError> {
    sqlx::query(
        r#"INSERT INTO tenants
        (account, base_url, authentication_header, authentication_string, api_version, decimal_multiplier)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (account) DO UPDATE SET
            base_url = excluded.base_url,
            authentication_header = excluded.authentication_header,
            authentication_string = excluded.authentication_string,
            api_version = excluded.api_version,
            decimal_multiplier = excluded.decimal_multiplier,
            updated_at = strftime('%s', 'now')"#,
    )
    .bind(profile.id)
    .bind(&profile.base_url)
    .bind(&profile.auth_header)
    .bind(profile.auth_secret.reveal().as_str())
    .bind(profile.api_version)
    .bind(profile.multiplier.value())
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn delete_tenant(tenant_id: i64, conn: &mut SqliteConnection) -> Result<(), TenantApiError> {
    sqlx::query("DELETE FROM tenants WHERE account = $1").bind(tenant_id).execute(conn).await?;
    Ok(())
}
