use thiserror::Error;

/// Problems with the hex private key supplied by the operator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("private key is empty")]
    Empty,

    #[error("invalid private key length: {0} characters (expected 64)")]
    InvalidLength(usize),

    #[error("private key contains non-hexadecimal characters")]
    NonHex,

    #[error("private key is not a valid secp256k1 scalar: {0}")]
    InvalidScalar(String),

    #[error("environment variable {0} is not set")]
    MissingEnv(String),
}

/// Conditions that abort the run before any transaction is attempted.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("RPC endpoint unreachable: {0}")]
    EndpointUnreachable(String),

    #[error("network mismatch: expected chain id {expected} ({name}), got {actual}")]
    ChainMismatch {
        name: String,
        expected: u64,
        actual: u64,
    },

    #[error("network check failed: {0}")]
    ChainQuery(String),

    #[error("no recipient addresses supplied")]
    NoRecipients,

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Why a single recipient's transfer failed. Never aborts the batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("construction failed: {0}")]
    Construction(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("broadcast failed: {0}")]
    Broadcast(String),

    #[error("confirmation failed: {0}")]
    Confirmation(String),
}
