use log::*;

/// Process-wide identity of this gateway towards wallet providers, read from
/// the environment once at startup and treated as immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Numeric id this platform is registered under at the providers.
    pub provider_id: i64,
    pub provider_name: String,
    /// Prefix template for composite account ids; only its length matters
    /// when splitting, its digits pad small tenant ids when joining.
    pub account_prefix: String,
}

impl ProviderConfig {
    pub fn new(provider_id: i64, provider_name: impl Into<String>, account_prefix: impl Into<String>) -> Self {
        Self { provider_id, provider_name: provider_name.into(), account_prefix: account_prefix.into() }
    }

    pub fn new_from_env_or_default() -> Self {
        let provider_id = match std::env::var("PWG_PROVIDER_ID") {
            Ok(s) => s.parse::<i64>().unwrap_or_else(|e| {
                warn!("PWG_PROVIDER_ID is not a valid integer ({e}), using 0");
                0
            }),
            Err(_) => {
                warn!("PWG_PROVIDER_ID not set, using 0");
                0
            },
        };
        let provider_name = std::env::var("PWG_PROVIDER_NAME").unwrap_or_else(|_| {
            warn!("PWG_PROVIDER_NAME not set, using (probably useless) default");
            "unknown-provider".to_string()
        });
        let account_prefix = std::env::var("PWG_ACCOUNT_PREFIX").unwrap_or_else(|_| {
            warn!("PWG_ACCOUNT_PREFIX not set, using 000");
            "000".to_string()
        });
        Self { provider_id, provider_name, account_prefix }
    }

    pub fn user_agent(&self) -> String {
        format!("Player Wallet Gateway/1.0 (provider;{}) (providerID;{})", self.provider_name, self.provider_id)
    }

    /// Split a composite account id or API token with the configured prefix
    /// length. See [`crate::split_composite_id`] for the sentinel contract.
    pub fn split_account_id<'a>(&self, composite: &'a str) -> (i64, &'a str) {
        crate::account::split_composite_id(composite, self.account_prefix.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn split_uses_configured_prefix_length() {
        let config = ProviderConfig::new(9, "acme-games", "0000");
        assert_eq!(config.split_account_id("0042round-7"), (42, "round-7"));
        assert_eq!(config.split_account_id("007"), (0, ""));
    }

    #[test]
    fn user_agent_identifies_the_provider() {
        let config = ProviderConfig::new(9, "acme-games", "000");
        assert_eq!(config.user_agent(), "Player Wallet Gateway/1.0 (provider;acme-games) (providerID;9)");
    }
}
