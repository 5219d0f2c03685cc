//! Transfer submission orchestration
//!
//! A submission is two coordinated on-chain operations: a native value
//! transfer signed by the wallet provider, then an annotated entry recorded
//! on the transfers contract. The two are not atomically linked; when the
//! annotation fails after the native transfer went out, the failure is
//! reported as partially completed so the operator can reconcile manually.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::amount::{parse_amount, to_hex_value, validate_hex_value};
use crate::contract::{AnnotationRequest, ContractFactory};
use crate::draft::TransferDraft;
use crate::error::BridgeError;
use crate::provider::{NativeTransfer, WalletProvider};
use crate::store::CountCache;

/// Shared submission state observed by the rendering layer.
///
/// `loading` is true exactly while the annotation's finality confirmation
/// is awaited; it never stays true across a failure. `in_flight` is the
/// single-slot guard that serializes submissions.
#[derive(Default)]
pub struct SubmissionStatus {
    in_flight: AtomicBool,
    loading: AtomicBool,
}

impl SubmissionStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Claim the single submission slot, or fail when one is in flight.
    fn claim(&self) -> Result<SubmissionSlot<'_>, BridgeError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(BridgeError::SubmissionInFlight);
        }
        Ok(SubmissionSlot { status: self })
    }
}

/// RAII holder of the submission slot. Dropping it releases the slot and
/// clears the loading flag, on success and failure alike.
struct SubmissionSlot<'a> {
    status: &'a SubmissionStatus,
}

impl SubmissionSlot<'_> {
    fn set_loading(&self, loading: bool) {
        self.status.loading.store(loading, Ordering::SeqCst);
    }
}

impl Drop for SubmissionSlot<'_> {
    fn drop(&mut self) {
        self.status.loading.store(false, Ordering::SeqCst);
        self.status.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Outcome of a confirmed submission.
#[derive(Clone, Debug)]
pub struct SubmissionReceipt {
    /// Hash returned by the wallet for the native value transfer.
    pub native_tx_hash: String,
    /// Hash of the confirmed ledger annotation transaction.
    pub annotation_tx_hash: String,
    /// Ledger record count after the annotation was recorded.
    pub transaction_count: u64,
}

/// Execute one transfer submission end to end.
///
/// Validation failures abort before any provider call. The native transfer
/// is always requested before the ledger annotation, but their relative
/// finality order on the ledger is not awaited jointly. There is no retry
/// and no rollback.
pub async fn submit(
    provider: &dyn WalletProvider,
    factory: &ContractFactory,
    cache: &CountCache,
    status: &SubmissionStatus,
    draft: &TransferDraft,
    sender: &str,
) -> Result<SubmissionReceipt, BridgeError> {
    if !provider.has_provider() || sender.is_empty() {
        return Err(BridgeError::ProviderMissing);
    }

    let slot = status.claim()?;

    let wei = parse_amount(&draft.amount)?;
    let hex_value = to_hex_value(wei);
    validate_hex_value(&hex_value)?;

    let handle = factory.handle(provider)?;

    // Step one: native value transfer through the wallet. Acceptance by
    // the wallet is a send request, not finality.
    let native_tx_hash = provider
        .send_transaction(NativeTransfer::new(sender, &draft.recipient, &hex_value))
        .await?;
    log::info!(
        "Native transfer requested - to: {}, value: {}, tx: {}",
        draft.recipient,
        hex_value,
        native_tx_hash
    );

    // Step two: record the annotated entry on the contract. From here on,
    // a failure leaves the chain in a partially completed state.
    let annotation = handle
        .add_to_blockchain(AnnotationRequest {
            receiver: draft.recipient.clone(),
            amount: wei,
            message: draft.message.clone(),
            keyword: draft.keyword.clone(),
        })
        .await
        .map_err(|e| partially_completed(&native_tx_hash, e))?;

    slot.set_loading(true);
    log::info!("Loading - {}", annotation.hash);
    handle
        .wait_for_confirmation(&annotation)
        .await
        .map_err(|e| partially_completed(&native_tx_hash, e))?;
    slot.set_loading(false);
    log::info!("Success - {}", annotation.hash);

    let transaction_count = handle.get_transaction_count().await?;
    if let Err(e) = cache.save(transaction_count) {
        log::warn!("Failed to persist transaction count: {}", e);
    }

    Ok(SubmissionReceipt {
        native_tx_hash,
        annotation_tx_hash: annotation.hash,
        transaction_count,
    })
}

fn partially_completed(native_tx_hash: &str, cause: BridgeError) -> BridgeError {
    log::error!(
        "Annotation failed after native transfer {}: {}",
        native_tx_hash,
        cause
    );
    BridgeError::PartiallyCompleted {
        native_tx_hash: native_tx_hash.to_string(),
        reason: cause.to_string(),
    }
}
