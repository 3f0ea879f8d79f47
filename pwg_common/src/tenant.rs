use crate::{Amount, DecimalMultiplier, Secret};

//--------------------------------------    TenantProfile    ---------------------------------------------------------
/// Connection profile for one wallet provider tenant. Loaded from the tenant
/// registry once per call and treated as read-only by the gateway.
///
/// `api_version == 0` selects the legacy wire behavior: unversioned endpoint
/// paths and amounts passed through unscaled. Versions 1 and up use
/// `/v{N}/...` paths and the tenant's declared decimal scale.
#[derive(Debug, Clone, Default)]
pub struct TenantProfile {
    pub id: i64,
    pub base_url: String,
    pub auth_header: String,
    pub auth_secret: Secret<String>,
    pub api_version: i64,
    pub multiplier: DecimalMultiplier,
}

impl TenantProfile {
    pub fn is_versioned(&self) -> bool {
        self.api_version >= 1
    }

    /// The integer to write on this tenant's wire for a canonical amount.
    pub fn outbound_amount(&self, amount: Amount) -> i64 {
        if self.is_versioned() {
            amount.to_provider_scale(self.multiplier)
        } else {
            amount.value()
        }
    }

    /// Canonical amount for a balance read off this tenant's wire.
    pub fn inbound_amount(&self, raw: Amount) -> Amount {
        if self.is_versioned() {
            Amount::from_provider_scale(raw.value(), self.multiplier)
        } else {
            raw
        }
    }
}
