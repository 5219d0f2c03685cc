//! Transfer-Bridge: wallet-to-ledger transfer orchestration
//!
//! Bridges a wallet provider (account/signing authority) and a remote
//! ledger-resident transfers contract, presenting a unified transaction
//! lifecycle to a consuming UI layer.
//!
//! # Architecture
//!
//! - **Wallet provider**: injected capability for account access and
//!   native value transfers
//! - **Contract factory**: binds the fixed contract address and signing
//!   authority into stateless handles for ledger reads/writes
//! - **Transfer manager**: reactive facade holding session identity,
//!   the form draft, the synchronized history and submission status
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use transfer_bridge::{BridgeConfig, DraftField, TransferManager};
//!
//! let config = BridgeConfig::from_env();
//! let manager = TransferManager::new(&config, provider, ledger);
//!
//! manager.connect_wallet().await?;
//! manager.handle_change(DraftField::Recipient, "0x...");
//! manager.handle_change(DraftField::Amount, "0.01");
//! let receipt = manager.send_transaction().await?;
//! ```

// Public modules
pub mod amount;
pub mod config;
pub mod contract;
pub mod draft;
pub mod error;
pub mod history;
pub mod manager;
pub mod provider;
pub mod session;
pub mod store;
pub mod submit;

// Re-exports for convenience
pub use amount::{parse_amount, to_display_amount, to_hex_value, validate_hex_value};
pub use config::BridgeConfig;
pub use contract::{
    AnnotationRequest, ContractFactory, ContractHandle, LedgerContract, PendingAnnotation,
    RawTransferRecord,
};
pub use draft::{DraftField, DraftStore, TransferDraft};
pub use error::{BridgeError, StorageError};
pub use history::TransferRecord;
pub use manager::TransferManager;
pub use provider::{NativeTransfer, WalletProvider, TRANSFER_GAS};
pub use session::AccountSession;
pub use store::CountCache;
pub use submit::{SubmissionReceipt, SubmissionStatus};

// Common result type
pub type Result<T> = std::result::Result<T, BridgeError>;
