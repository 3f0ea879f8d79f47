use pwg_common::{Amount, TenantProfile};
use serde::{Deserialize, Serialize};

/// Status stored on a receipt once the gateway has accepted the response.
/// Whatever status the provider put in the body is discarded at that point;
/// declines never produce a receipt at all.
pub const STATUS_ACCEPTED: i64 = 1;

//-----------------------------------    Operation inputs    ---------------------------------------------------------
// What the game platform hands the gateway, with amounts in canonical scale.
// The gateway turns these into the wire requests below.

/// A stake being taken from a player's wallet for a game round.
#[derive(Debug, Clone, Default)]
pub struct Debit {
    pub player_id: String,
    pub game_name: String,
    pub game_id: String,
    pub transaction_id: String,
    pub amount: Amount,
    pub session_id: String,
    pub round_id: String,
}

/// Winnings being paid out against an earlier debit.
#[derive(Debug, Clone, Default)]
pub struct Credit {
    pub player_id: String,
    pub game_name: String,
    pub game_id: String,
    pub transaction_id: String,
    pub debit_transaction_id: String,
    pub amount: Amount,
    pub session_id: String,
    pub round_id: String,
    /// Promotional winnings riding along with the payout, distinct from the
    /// wagered amount.
    pub free_spin_win: Option<Amount>,
}

/// An operator-driven balance correction outside the bet/win flow.
#[derive(Debug, Clone, Default)]
pub struct Adjustment {
    pub player_id: String,
    pub game_name: String,
    pub game_id: String,
    pub transaction_id: String,
    pub amount: Amount,
    pub session_id: String,
    pub round_id: String,
}

/// Reversal of an earlier debit, e.g. when a round is voided.
#[derive(Debug, Clone, Default)]
pub struct Rollback {
    pub player_id: String,
    pub transaction_id: String,
    pub amount: Amount,
    pub session_id: String,
    pub round_id: String,
    pub debit_transaction_id: String,
}

/// Final status report for a settled bet. Carries no amount.
#[derive(Debug, Clone, Default)]
pub struct Settlement {
    pub player_id: String,
    pub status: i64,
    pub session_id: String,
    pub round_id: String,
    pub debit_transaction_id: String,
}

//-----------------------------------      Wire requests     ---------------------------------------------------------
// Bodies as the provider sees them: provider identity injected from process
// configuration, amounts already at the tenant's scale.

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProfileRequest {
    pub player_id: String,
    pub span_id: String,
    pub trace_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DebitRequest {
    pub player_id: String,
    pub provider_id: i64,
    pub provider_name: String,
    pub game_name: String,
    pub game_id: String,
    pub transaction_id: String,
    pub amount: i64,
    pub session_id: String,
    pub round_id: String,
    pub span_id: String,
    pub trace_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreditRequest {
    pub player_id: String,
    pub provider_id: i64,
    pub provider_name: String,
    pub game_name: String,
    pub game_id: String,
    pub transaction_id: String,
    pub amount: i64,
    pub session_id: String,
    pub round_id: String,
    pub span_id: String,
    pub trace_id: String,
    pub debit_transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_spin_win: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AdjustmentRequest {
    pub provider_id: i64,
    pub provider_name: String,
    pub player_id: String,
    pub game_name: String,
    pub game_id: String,
    pub transaction_id: String,
    pub amount: i64,
    pub session_id: String,
    pub round_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RollbackRequest {
    pub provider_id: i64,
    pub provider_name: String,
    pub player_id: String,
    pub transaction_id: String,
    pub amount: i64,
    pub session_id: String,
    pub round_id: String,
    pub debit_transaction_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SettlementRequest {
    pub provider_id: i64,
    pub player_id: String,
    pub status: i64,
    pub session_id: String,
    pub round_id: String,
    pub debit_transaction_id: String,
}

//-----------------------------------        Receipts        ---------------------------------------------------------
// Decoded 2xx bodies. Providers routinely omit fields they consider
// irrelevant for an operation, so everything defaults. Balance fields arrive
// at the tenant's scale; `normalize` brings them back to canonical scale.

/// A player's wallet profile as reported by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletProfile {
    pub display_name: String,
    /// Globally unique id: the tenant id concatenated with the provider's
    /// own player id.
    #[serde(rename = "player_id")]
    pub id: String,
    pub balance: Amount,
    pub bonus: Amount,
}

impl WalletProfile {
    pub(crate) fn normalize(&mut self, tenant: &TenantProfile) {
        self.balance = tenant.inbound_amount(self.balance);
        self.bonus = tenant.inbound_amount(self.bonus);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DebitReceipt {
    /// Whether the stake was (partly) covered from bonus funds.
    pub bonus_bet: i64,
    pub bonus_balance: Amount,
    pub balance: Amount,
    pub bonus_deducted: Amount,
    pub status: i64,
    pub description: String,
}

impl DebitReceipt {
    pub(crate) fn normalize(&mut self, tenant: &TenantProfile) {
        self.balance = tenant.inbound_amount(self.balance);
        self.bonus_balance = tenant.inbound_amount(self.bonus_balance);
        self.bonus_deducted = tenant.inbound_amount(self.bonus_deducted);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreditReceipt {
    pub bonus_balance: Amount,
    pub balance: Amount,
    pub status: i64,
    pub description: String,
}

impl CreditReceipt {
    pub(crate) fn normalize(&mut self, tenant: &TenantProfile) {
        self.balance = tenant.inbound_amount(self.balance);
        self.bonus_balance = tenant.inbound_amount(self.bonus_balance);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdjustmentReceipt {
    pub bonus_balance: Amount,
    pub balance: Amount,
    pub status: i64,
    pub description: String,
}

impl AdjustmentReceipt {
    pub(crate) fn normalize(&mut self, tenant: &TenantProfile) {
        self.balance = tenant.inbound_amount(self.balance);
        self.bonus_balance = tenant.inbound_amount(self.bonus_balance);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RollbackReceipt {
    pub bonus_balance: Amount,
    pub balance: Amount,
    pub status: i64,
    pub description: String,
}

impl RollbackReceipt {
    pub(crate) fn normalize(&mut self, tenant: &TenantProfile) {
        self.balance = tenant.inbound_amount(self.balance);
        self.bonus_balance = tenant.inbound_amount(self.bonus_balance);
    }
}
