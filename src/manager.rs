//! Transfer Manager - Orchestration Layer
//!
//! Owns the reactive state the rendering layer observes (current account,
//! draft, history, loading flag, transaction count) and coordinates the
//! session, history and submission modules. All external collaborators
//! are injected at construction time.

use std::sync::{Arc, RwLock};

use crate::config::BridgeConfig;
use crate::contract::{ContractFactory, LedgerContract};
use crate::draft::{DraftField, DraftStore, TransferDraft};
use crate::error::BridgeError;
use crate::history::{self, TransferRecord};
use crate::provider::WalletProvider;
use crate::session::{self, AccountSession};
use crate::store::CountCache;
use crate::submit::{self, SubmissionReceipt, SubmissionStatus};

pub struct TransferManager {
    provider: Arc<dyn WalletProvider>,
    factory: ContractFactory,
    cache: CountCache,
    session: RwLock<AccountSession>,
    transactions: RwLock<Vec<TransferRecord>>,
    transaction_count: RwLock<Option<u64>>,
    draft: DraftStore,
    status: SubmissionStatus,
}

impl TransferManager {
    pub fn new(
        config: &BridgeConfig,
        provider: Arc<dyn WalletProvider>,
        ledger: Arc<dyn LedgerContract>,
    ) -> Self {
        let factory = ContractFactory::new(&config.contract_address, ledger);
        let cache = CountCache::new(config.cache_dir.clone());

        // Warm-start the count from the persisted cache when one exists.
        let cached_count = match cache.load() {
            Ok(count) => count,
            Err(e) => {
                log::warn!("Failed to read cached transaction count: {}", e);
                None
            }
        };

        Self {
            provider,
            factory,
            cache,
            session: RwLock::new(AccountSession::new()),
            transactions: RwLock::new(Vec::new()),
            transaction_count: RwLock::new(cached_count),
            draft: DraftStore::new(),
            status: SubmissionStatus::new(),
        }
    }

    // ============================================================================
    // Reactive surface
    // ============================================================================

    pub fn current_account(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .account()
            .map(str::to_string)
    }

    pub fn transactions(&self) -> Vec<TransferRecord> {
        self.transactions
            .read()
            .expect("transactions lock poisoned")
            .clone()
    }

    pub fn transaction_count(&self) -> Option<u64> {
        *self
            .transaction_count
            .read()
            .expect("transaction count lock poisoned")
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn draft(&self) -> TransferDraft {
        self.draft.snapshot()
    }

    /// Replace one field of the in-progress draft with user input.
    pub fn handle_change(&self, field: DraftField, value: &str) {
        self.draft.update(field, value);
    }

    // ============================================================================
    // Session operations
    // ============================================================================

    /// Detect an already-authorized account without prompting the user.
    ///
    /// When one exists the history is refreshed as a side effect; a
    /// history failure is logged and leaves the previous set untouched.
    pub async fn check_connection(&self) -> Result<Option<String>, BridgeError> {
        let account = session::check_connection(self.provider.as_ref()).await?;
        if let Some(ref account) = account {
            self.set_account(account.clone());
            self.refresh_history().await;
        }
        Ok(account)
    }

    /// Request account authorization, possibly prompting the user.
    pub async fn connect_wallet(&self) -> Result<String, BridgeError> {
        let account = session::connect(self.provider.as_ref()).await.map_err(|e| {
            log::warn!("Wallet connection failed: {}", e);
            e
        })?;
        self.set_account(account.clone());
        Ok(account)
    }

    /// Refresh the persisted transaction-count cache from the ledger.
    pub async fn check_transaction_count_cache(&self) -> Result<u64, BridgeError> {
        let handle = self.factory.handle(self.provider.as_ref())?;
        session::refresh_count_cache(&handle, &self.cache).await
    }

    // ============================================================================
    // Submission
    // ============================================================================

    /// Submit the current draft as a transfer from the connected account.
    ///
    /// On confirmed finality the cached count is refreshed and the full
    /// state is re-synchronized in place (no page reload).
    pub async fn send_transaction(&self) -> Result<SubmissionReceipt, BridgeError> {
        let sender = self.current_account().unwrap_or_default();
        let draft = self.draft.snapshot();

        let receipt = submit::submit(
            self.provider.as_ref(),
            &self.factory,
            &self.cache,
            &self.status,
            &draft,
            &sender,
        )
        .await?;

        *self
            .transaction_count
            .write()
            .expect("transaction count lock poisoned") = Some(receipt.transaction_count);

        self.resync().await;
        Ok(receipt)
    }

    /// Re-synchronize local state with the ledger: re-run the session
    /// check and refresh the history. Errors are logged, not surfaced;
    /// in-memory state is kept on failure.
    pub async fn resync(&self) {
        match session::check_connection(self.provider.as_ref()).await {
            Ok(Some(account)) => self.set_account(account),
            Ok(None) => {}
            Err(e) => log::warn!("Session re-check failed: {}", e),
        }
        self.refresh_history().await;
    }

    // ============================================================================
    // Internal helpers
    // ============================================================================

    fn set_account(&self, account: String) {
        self.session
            .write()
            .expect("session lock poisoned")
            .set_account(account);
    }

    /// Refresh the history, replacing the record set atomically on
    /// success. Failures are logged and leave the previous set in place.
    async fn refresh_history(&self) {
        let handle = match self.factory.handle(self.provider.as_ref()) {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("Cannot build contract handle: {}", e);
                return;
            }
        };
        match history::refresh(&handle).await {
            Ok(records) => {
                *self
                    .transactions
                    .write()
                    .expect("transactions lock poisoned") = records;
            }
            Err(e) => log::error!("History refresh failed: {}", e),
        }
    }
}
