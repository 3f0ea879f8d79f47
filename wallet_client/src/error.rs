use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Tenant {tenant} has an unusable authentication header: {reason}")]
    InvalidAuthHeader { tenant: i64, reason: String },
    #[error("Could not reach the wallet provider: {0}")]
    Transport(String),
    #[error("Wallet provider returned status {status}. {message}")]
    Provider { status: u16, message: String },
    /// A 2xx response carried a body the gateway could not decode. The
    /// decode detail is logged but never echoed to callers.
    #[error("internal server error")]
    Internal,
}
