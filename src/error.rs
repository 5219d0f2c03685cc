use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("No wallet provider detected")]
    ProviderMissing,

    #[error("Wallet connection denied: {0}")]
    ConnectionDenied(String),

    #[error("Invalid transfer amount: {0}")]
    InvalidAmount(String),

    #[error("Ledger call failed: {0}")]
    LedgerCallFailed(String),

    #[error("Finality confirmation timed out: {0}")]
    FinalityTimeout(String),

    #[error("Transfer partially completed: native transfer {native_tx_hash} sent but ledger annotation failed: {reason}")]
    PartiallyCompleted {
        native_tx_hash: String,
        reason: String,
    },

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl BridgeError {
    /// True for failures a UI should surface as a blocking notice
    /// rather than a background log line.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            BridgeError::ProviderMissing
                | BridgeError::InvalidAmount(_)
                | BridgeError::PartiallyCompleted { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
