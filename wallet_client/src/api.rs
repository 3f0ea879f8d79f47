use std::{sync::Arc, time::Duration};

use log::*;
use pwg_common::TenantProfile;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT},
    Client,
    StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::ProviderConfig,
    context::CorrelationContext,
    data_objects::{
        Adjustment,
        AdjustmentReceipt,
        AdjustmentRequest,
        Credit,
        CreditReceipt,
        CreditRequest,
        Debit,
        DebitReceipt,
        DebitRequest,
        ProfileRequest,
        Rollback,
        RollbackReceipt,
        RollbackRequest,
        Settlement,
        SettlementRequest,
        WalletProfile,
        STATUS_ACCEPTED,
    },
    error::WalletApiError,
    outcome::{DeclineReason, Rejection, TransactionOutcome},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the tenant wallet provider API.
///
/// One instance per process is enough: the HTTP client underneath is shared
/// and connection-pooled, every operation is an independent single-shot call,
/// and no state survives a call. Cloning is cheap. Cancellation is the
/// caller's: drop the future to abort the in-flight request, otherwise the
/// 30 second client timeout applies.
#[derive(Clone)]
pub struct WalletApi {
    config: ProviderConfig,
    client: Arc<Client>,
}

impl WalletApi {
    /// Create an instance with its own HTTP client.
    pub fn new(config: ProviderConfig) -> Result<Self, WalletApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .connect_timeout(REQUEST_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| WalletApiError::Initialization(e.to_string()))?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create an instance around a client built at process startup and
    /// shared with other components.
    pub fn with_client(config: ProviderConfig, client: Arc<Client>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Look up a player's wallet profile. The returned player id is prefixed
    /// with the tenant id (unconditionally, whatever the API version) so it
    /// is unique across tenants.
    pub async fn profile(&self, tenant: &TenantProfile, player_id: &str) -> Result<WalletProfile, WalletApiError> {
        let ctx = CorrelationContext::generate();
        let request = ProfileRequest {
            player_id: player_id.to_string(),
            span_id: ctx.span_id.clone(),
            trace_id: ctx.trace_id.clone(),
        };
        let endpoint = self.endpoint(tenant, "profile");
        let (status, body) = self.post(tenant, &endpoint, &ctx, &request).await?;
        if !status.is_success() {
            warn!("Invalid status {status} fetching profile for {player_id} from {endpoint}: {body}");
            return Err(WalletApiError::Provider { status: status.as_u16(), message: body });
        }
        info!("Fetched profile for {player_id} from {endpoint}. Status {status}: {body}");
        let mut profile: WalletProfile = decode_receipt(&body)?;
        profile.normalize(tenant);
        profile.id = format!("{}{}", tenant.id, profile.id);
        Ok(profile)
    }

    /// Take a stake from the player's wallet.
    ///
    /// A 402 means the balance cannot cover the stake and a 409 means the
    /// provider has already seen this transaction id; both come back as
    /// [`TransactionOutcome::Declined`], not as errors.
    pub async fn debit(
        &self,
        tenant: &TenantProfile,
        debit: Debit,
    ) -> Result<TransactionOutcome<DebitReceipt>, WalletApiError> {
        let ctx = CorrelationContext::generate();
        let request = DebitRequest {
            player_id: debit.player_id,
            provider_id: self.config.provider_id,
            provider_name: self.config.provider_name.clone(),
            game_name: debit.game_name,
            game_id: debit.game_id,
            transaction_id: debit.transaction_id,
            amount: tenant.outbound_amount(debit.amount),
            session_id: debit.session_id,
            round_id: debit.round_id,
            span_id: ctx.span_id.clone(),
            trace_id: ctx.trace_id.clone(),
        };
        let endpoint = self.endpoint(tenant, "debit");
        let (status, body) = self.post(tenant, &endpoint, &ctx, &request).await?;
        if !status.is_success() {
            warn!("Invalid status {status} debiting {} at {endpoint}: {body}", request.player_id);
            return classify_rejection(status, body, true).map(TransactionOutcome::Declined);
        }
        info!("Debit {} accepted at {endpoint}. Status {status}: {body}", request.transaction_id);
        let mut receipt: DebitReceipt = decode_receipt(&body)?;
        receipt.status = STATUS_ACCEPTED;
        receipt.normalize(tenant);
        Ok(TransactionOutcome::Accepted(receipt))
    }

    /// Pay winnings into the player's wallet against an earlier debit.
    /// A 409 (conflicting transaction id) is a decline, not an error.
    pub async fn credit(
        &self,
        tenant: &TenantProfile,
        credit: Credit,
    ) -> Result<TransactionOutcome<CreditReceipt>, WalletApiError> {
        let ctx = CorrelationContext::generate();
        let request = CreditRequest {
            player_id: credit.player_id,
            provider_id: self.config.provider_id,
            provider_name: self.config.provider_name.clone(),
            game_name: credit.game_name,
            game_id: credit.game_id,
            transaction_id: credit.transaction_id,
            amount: tenant.outbound_amount(credit.amount),
            session_id: credit.session_id,
            round_id: credit.round_id,
            span_id: ctx.span_id.clone(),
            trace_id: ctx.trace_id.clone(),
            debit_transaction_id: credit.debit_transaction_id,
            free_spin_win: credit.free_spin_win.map(|amount| tenant.outbound_amount(amount)),
        };
        let endpoint = self.endpoint(tenant, "credit");
        let (status, body) = self.post(tenant, &endpoint, &ctx, &request).await?;
        if !status.is_success() {
            warn!("Invalid status {status} crediting {} at {endpoint}: {body}", request.player_id);
            return classify_rejection(status, body, false).map(TransactionOutcome::Declined);
        }
        info!("Credit {} accepted at {endpoint}. Status {status}: {body}", request.transaction_id);
        let mut receipt: CreditReceipt = decode_receipt(&body)?;
        receipt.status = STATUS_ACCEPTED;
        receipt.normalize(tenant);
        Ok(TransactionOutcome::Accepted(receipt))
    }

    /// Correct the player's balance outside the bet/win flow.
    /// A 409 is a decline, not an error.
    pub async fn adjust(
        &self,
        tenant: &TenantProfile,
        adjustment: Adjustment,
    ) -> Result<TransactionOutcome<AdjustmentReceipt>, WalletApiError> {
        let ctx = CorrelationContext::generate();
        let request = AdjustmentRequest {
            provider_id: self.config.provider_id,
            provider_name: self.config.provider_name.clone(),
            player_id: adjustment.player_id,
            game_name: adjustment.game_name,
            game_id: adjustment.game_id,
            transaction_id: adjustment.transaction_id,
            amount: tenant.outbound_amount(adjustment.amount),
            session_id: adjustment.session_id,
            round_id: adjustment.round_id,
        };
        let endpoint = self.endpoint(tenant, "adjust");
        let (status, body) = self.post(tenant, &endpoint, &ctx, &request).await?;
        if !status.is_success() {
            warn!("Invalid status {status} adjusting {} at {endpoint}: {body}", request.player_id);
            return classify_rejection(status, body, false).map(TransactionOutcome::Declined);
        }
        info!("Adjustment {} accepted at {endpoint}. Status {status}: {body}", request.transaction_id);
        let mut receipt: AdjustmentReceipt = decode_receipt(&body)?;
        receipt.status = STATUS_ACCEPTED;
        receipt.normalize(tenant);
        Ok(TransactionOutcome::Accepted(receipt))
    }

    /// Reverse an earlier debit, e.g. for a voided round.
    /// A 409 is a decline, not an error.
    pub async fn rollback(
        &self,
        tenant: &TenantProfile,
        rollback: Rollback,
    ) -> Result<TransactionOutcome<RollbackReceipt>, WalletApiError> {
        let ctx = CorrelationContext::generate();
        let request = RollbackRequest {
            provider_id: self.config.provider_id,
            provider_name: self.config.provider_name.clone(),
            player_id: rollback.player_id,
            transaction_id: rollback.transaction_id,
            amount: tenant.outbound_amount(rollback.amount),
            session_id: rollback.session_id,
            round_id: rollback.round_id,
            debit_transaction_id: rollback.debit_transaction_id,
        };
        let endpoint = self.endpoint(tenant, "rollback");
        let (status, body) = self.post(tenant, &endpoint, &ctx, &request).await?;
        if !status.is_success() {
            warn!("Invalid status {status} on rollback for {} at {endpoint}: {body}", request.player_id);
            return classify_rejection(status, body, false).map(TransactionOutcome::Declined);
        }
        info!("Rollback {} accepted at {endpoint}. Status {status}: {body}", request.transaction_id);
        let mut receipt: RollbackReceipt = decode_receipt(&body)?;
        receipt.status = STATUS_ACCEPTED;
        receipt.normalize(tenant);
        Ok(TransactionOutcome::Accepted(receipt))
    }

    /// Report the final status of a settled bet. There is no response body
    /// and no decline branch: any non-2xx status is a hard error.
    pub async fn settle(&self, tenant: &TenantProfile, settlement: Settlement) -> Result<(), WalletApiError> {
        let ctx = CorrelationContext::generate();
        let request = SettlementRequest {
            provider_id: self.config.provider_id,
            player_id: settlement.player_id,
            status: settlement.status,
            session_id: settlement.session_id,
            round_id: settlement.round_id,
            debit_transaction_id: settlement.debit_transaction_id,
        };
        let endpoint = self.endpoint(tenant, "settlement");
        let (status, body) = self.post(tenant, &endpoint, &ctx, &request).await?;
        if !status.is_success() {
            warn!("Invalid status {status} on settlement for round {} at {endpoint}: {body}", request.round_id);
            return Err(WalletApiError::Provider { status: status.as_u16(), message: body });
        }
        info!("Settlement for round {} acknowledged. Status {status}", request.round_id);
        Ok(())
    }

    fn endpoint(&self, tenant: &TenantProfile, operation: &str) -> String {
        if tenant.is_versioned() {
            format!("{}/v{}/{operation}", tenant.base_url, tenant.api_version)
        } else {
            format!("{}/{operation}", tenant.base_url)
        }
    }

    fn auth_headers(&self, tenant: &TenantProfile, ctx: &CorrelationContext) -> Result<HeaderMap, WalletApiError> {
        let invalid = |e: &dyn std::fmt::Display| WalletApiError::InvalidAuthHeader {
            tenant: tenant.id,
            reason: e.to_string(),
        };
        let mut headers = HeaderMap::with_capacity(3);
        let name = HeaderName::try_from(tenant.auth_header.as_str()).map_err(|e| invalid(&e))?;
        let value = HeaderValue::from_str(tenant.auth_secret.reveal()).map_err(|e| invalid(&e))?;
        headers.insert(name, value);
        headers.insert("span-id", HeaderValue::from_str(&ctx.span_id).map_err(|e| invalid(&e))?);
        headers.insert("trace-id", HeaderValue::from_str(&ctx.trace_id).map_err(|e| invalid(&e))?);
        Ok(headers)
    }

    /// One outbound JSON POST. Only transport problems error here; callers
    /// classify the status/body pair themselves.
    async fn post<B: Serialize + std::fmt::Debug>(
        &self,
        tenant: &TenantProfile,
        endpoint: &str,
        ctx: &CorrelationContext,
        payload: &B,
    ) -> Result<(StatusCode, String), WalletApiError> {
        let headers = self.auth_headers(tenant, ctx)?;
        trace!("POST {endpoint} [trace {}]: {payload:?}", ctx.trace_id);
        let response = self
            .client
            .post(endpoint)
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Error sending request to {endpoint}: {e}");
                WalletApiError::Transport(e.to_string())
            })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Error reading response body from {endpoint}: {e}");
            WalletApiError::Transport(e.to_string())
        })?;
        Ok((status, body))
    }
}

/// Map a non-2xx status to a business rejection where the operation allows
/// one, or to a provider error otherwise. 402 is only a rejection on debits.
fn classify_rejection(
    status: StatusCode,
    body: String,
    payment_required_declines: bool,
) -> Result<Rejection, WalletApiError> {
    match status {
        StatusCode::PAYMENT_REQUIRED if payment_required_declines => {
            Ok(Rejection { reason: DeclineReason::InsufficientFunds, description: body })
        },
        StatusCode::CONFLICT => Ok(Rejection { reason: DeclineReason::TransactionConflict, description: body }),
        _ => Err(WalletApiError::Provider { status: status.as_u16(), message: body }),
    }
}

fn decode_receipt<T: DeserializeOwned>(body: &str) -> Result<T, WalletApiError> {
    serde_json::from_str(body).map_err(|e| {
        error!("Error decoding provider response: {e}");
        WalletApiError::Internal
    })
}

#[cfg(test)]
mod test {
    use pwg_common::{DecimalMultiplier, Secret};

    use super::*;

    fn api() -> WalletApi {
        WalletApi::new(ProviderConfig::new(7, "acme-games", "000")).unwrap()
    }

    fn tenant(api_version: i64) -> TenantProfile {
        TenantProfile {
            id: 3,
            base_url: "https://wallets.example.com/api".to_string(),
            auth_header: "x-wallet-auth".to_string(),
            auth_secret: Secret::new("s3cret".to_string()),
            api_version,
            multiplier: DecimalMultiplier::Hundred,
        }
    }

    #[test]
    fn legacy_endpoints_are_unversioned() {
        assert_eq!(api().endpoint(&tenant(0), "debit"), "https://wallets.example.com/api/debit");
    }

    #[test]
    fn versioned_endpoints_carry_the_version() {
        assert_eq!(api().endpoint(&tenant(1), "debit"), "https://wallets.example.com/api/v1/debit");
        assert_eq!(api().endpoint(&tenant(2), "settlement"), "https://wallets.example.com/api/v2/settlement");
    }

    #[test]
    fn auth_headers_carry_tenant_and_correlation_entries() {
        let ctx = CorrelationContext::generate();
        let headers = api().auth_headers(&tenant(1), &ctx).unwrap();
        assert_eq!(headers.get("x-wallet-auth").unwrap().to_str().unwrap(), "s3cret");
        assert_eq!(headers.get("span-id").unwrap().to_str().unwrap(), ctx.span_id);
        assert_eq!(headers.get("trace-id").unwrap().to_str().unwrap(), ctx.trace_id);
    }

    #[test]
    fn unusable_auth_header_name_is_reported() {
        let mut bad = tenant(1);
        bad.auth_header = "not a header name".to_string();
        let err = api().auth_headers(&bad, &CorrelationContext::generate()).unwrap_err();
        assert!(matches!(err, WalletApiError::InvalidAuthHeader { tenant: 3, .. }));
    }

    #[test]
    fn rejection_classification() {
        let r = classify_rejection(StatusCode::PAYMENT_REQUIRED, "no funds".into(), true).unwrap();
        assert_eq!(r.reason, DeclineReason::InsufficientFunds);
        assert_eq!(r.description, "no funds");

        let r = classify_rejection(StatusCode::CONFLICT, "duplicate".into(), false).unwrap();
        assert_eq!(r.reason, DeclineReason::TransactionConflict);

        // 402 is not a decline outside debits
        let err = classify_rejection(StatusCode::PAYMENT_REQUIRED, "no funds".into(), false).unwrap_err();
        assert!(matches!(err, WalletApiError::Provider { status: 402, .. }));

        let err = classify_rejection(StatusCode::SERVICE_UNAVAILABLE, "down".into(), true).unwrap_err();
        assert!(matches!(err, WalletApiError::Provider { status: 503, .. }));
    }
}
