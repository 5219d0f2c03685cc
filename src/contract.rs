//! Ledger contract binding
//!
//! The transfers contract lives at a fixed address on the remote ledger.
//! Its call surface is injected behind [`LedgerContract`]; the factory
//! binds it together with the current signing authority into a stateless
//! [`ContractHandle`] that can be recreated freely.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::provider::WalletProvider;

/// A transfer record as stored on the ledger, amounts in smallest units,
/// timestamps in epoch seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawTransferRecord {
    pub sender: String,
    pub receiver: String,
    pub amount: u128,
    pub keyword: String,
    pub timestamp: u64,
    pub message: String,
}

/// Arguments for recording an annotated transfer on the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationRequest {
    pub receiver: String,
    pub amount: u128,
    pub message: String,
    pub keyword: String,
}

/// Handle to a submitted annotation transaction, pending finality.
#[derive(Clone, Debug)]
pub struct PendingAnnotation {
    pub hash: String,
}

/// Call surface of the transfers contract.
#[async_trait]
pub trait LedgerContract: Send + Sync {
    async fn get_all_transactions(&self) -> Result<Vec<RawTransferRecord>, BridgeError>;

    async fn get_transaction_count(&self) -> Result<u64, BridgeError>;

    /// Record an annotated transfer entry. This is a separate transaction
    /// from the native value transfer and is not atomically linked to it.
    async fn add_to_blockchain(
        &self,
        request: AnnotationRequest,
    ) -> Result<PendingAnnotation, BridgeError>;

    /// Await finality confirmation of a submitted annotation.
    async fn wait_for_confirmation(
        &self,
        annotation: &PendingAnnotation,
    ) -> Result<(), BridgeError>;
}

/// Binds the fixed contract address and ledger connection into handles.
#[derive(Clone)]
pub struct ContractFactory {
    address: String,
    ledger: Arc<dyn LedgerContract>,
}

impl ContractFactory {
    pub fn new(address: &str, ledger: Arc<dyn LedgerContract>) -> Self {
        Self {
            address: address.to_string(),
            ledger,
        }
    }

    /// Build a handle bound to the current signing authority.
    ///
    /// Fails when no wallet provider is present; callers are expected to
    /// have checked provider presence already.
    pub fn handle(&self, provider: &dyn WalletProvider) -> Result<ContractHandle, BridgeError> {
        if !provider.has_provider() {
            return Err(BridgeError::ProviderMissing);
        }
        Ok(ContractHandle {
            address: self.address.clone(),
            ledger: Arc::clone(&self.ledger),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// A callable, stateless handle to the transfers contract.
pub struct ContractHandle {
    address: String,
    ledger: Arc<dyn LedgerContract>,
}

impl ContractHandle {
    pub fn address(&self) -> &str {
        &self.address
    }

    pub async fn get_all_transactions(&self) -> Result<Vec<RawTransferRecord>, BridgeError> {
        self.ledger.get_all_transactions().await
    }

    pub async fn get_transaction_count(&self) -> Result<u64, BridgeError> {
        self.ledger.get_transaction_count().await
    }

    pub async fn add_to_blockchain(
        &self,
        request: AnnotationRequest,
    ) -> Result<PendingAnnotation, BridgeError> {
        let pending = self.ledger.add_to_blockchain(request).await?;
        log::debug!("Annotation submitted - tx hash: {}", pending.hash);
        Ok(pending)
    }

    pub async fn wait_for_confirmation(
        &self,
        annotation: &PendingAnnotation,
    ) -> Result<(), BridgeError> {
        self.ledger.wait_for_confirmation(annotation).await
    }
}
