/// Common test utilities for transfer-bridge integration tests
///
/// Provides configurable doubles for the two external collaborators
/// (wallet provider, ledger contract) plus a test environment wiring
/// them into a TransferManager with a temporary cache directory.
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use transfer_bridge::{
    AnnotationRequest, BridgeConfig, BridgeError, LedgerContract, NativeTransfer,
    PendingAnnotation, RawTransferRecord, TransferManager, WalletProvider,
};

pub const SENDER: &str = "0x5409ed021d9299bf6814279a6a1411a7e866a631";
pub const RECIPIENT: &str = "0x6ecbe1db9ef729cbe972c83fb886247691fb6beb";

/// Initialize logging once; subsequent calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Wallet provider double. Counts every RPC-shaped call so tests can
/// assert that validation failures make zero provider calls.
pub struct MockProvider {
    present: bool,
    accounts: Vec<String>,
    deny_authorization: bool,
    pub sent: Mutex<Vec<NativeTransfer>>,
    rpc_calls: AtomicUsize,
}

impl MockProvider {
    pub fn absent() -> Self {
        Self {
            present: false,
            accounts: Vec::new(),
            deny_authorization: false,
            sent: Mutex::new(Vec::new()),
            rpc_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_accounts(accounts: &[&str]) -> Self {
        Self {
            present: true,
            accounts: accounts.iter().map(|a| a.to_string()).collect(),
            deny_authorization: false,
            sent: Mutex::new(Vec::new()),
            rpc_calls: AtomicUsize::new(0),
        }
    }

    pub fn denying() -> Self {
        Self {
            present: true,
            accounts: Vec::new(),
            deny_authorization: true,
            sent: Mutex::new(Vec::new()),
            rpc_calls: AtomicUsize::new(0),
        }
    }

    pub fn rpc_calls(&self) -> usize {
        self.rpc_calls.load(Ordering::SeqCst)
    }

    pub fn sent_transfers(&self) -> Vec<NativeTransfer> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    fn has_provider(&self) -> bool {
        self.present
    }

    async fn accounts(&self) -> Result<Vec<String>, BridgeError> {
        self.rpc_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<String>, BridgeError> {
        self.rpc_calls.fetch_add(1, Ordering::SeqCst);
        if self.deny_authorization {
            return Err(BridgeError::ConnectionDenied(
                "user rejected the request".to_string(),
            ));
        }
        Ok(self.accounts.clone())
    }

    async fn send_transaction(&self, transfer: NativeTransfer) -> Result<String, BridgeError> {
        self.rpc_calls.fetch_add(1, Ordering::SeqCst);
        let mut sent = self.sent.lock().unwrap();
        sent.push(transfer);
        Ok(format!("0xnative{:04x}", sent.len()))
    }
}

/// In-memory ledger contract double with failure injection.
pub struct MockLedger {
    records: Mutex<Vec<RawTransferRecord>>,
    fail_fetch: AtomicBool,
    fail_annotation: AtomicBool,
    fail_confirmation: AtomicBool,
    annotation_delay_ms: AtomicU64,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_fetch: AtomicBool::new(false),
            fail_annotation: AtomicBool::new(false),
            fail_confirmation: AtomicBool::new(false),
            annotation_delay_ms: AtomicU64::new(0),
        }
    }

    pub fn seed(&self, record: RawTransferRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_annotation(&self, fail: bool) {
        self.fail_annotation.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_confirmation(&self, fail: bool) {
        self.fail_confirmation.store(fail, Ordering::SeqCst);
    }

    pub fn set_annotation_delay_ms(&self, delay: u64) {
        self.annotation_delay_ms.store(delay, Ordering::SeqCst);
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn last_record(&self) -> Option<RawTransferRecord> {
        self.records.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LedgerContract for MockLedger {
    async fn get_all_transactions(&self) -> Result<Vec<RawTransferRecord>, BridgeError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(BridgeError::LedgerCallFailed("fetch reverted".to_string()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get_transaction_count(&self) -> Result<u64, BridgeError> {
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn add_to_blockchain(
        &self,
        request: AnnotationRequest,
    ) -> Result<PendingAnnotation, BridgeError> {
        let delay = self.annotation_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
        }
        if self.fail_annotation.load(Ordering::SeqCst) {
            return Err(BridgeError::LedgerCallFailed(
                "annotation call reverted".to_string(),
            ));
        }
        let mut records = self.records.lock().unwrap();
        records.push(RawTransferRecord {
            sender: SENDER.to_string(),
            receiver: request.receiver,
            amount: request.amount,
            keyword: request.keyword,
            timestamp: 1_700_000_000,
            message: request.message,
        });
        Ok(PendingAnnotation {
            hash: format!("0xanno{:04x}", records.len()),
        })
    }

    async fn wait_for_confirmation(
        &self,
        _annotation: &PendingAnnotation,
    ) -> Result<(), BridgeError> {
        if self.fail_confirmation.load(Ordering::SeqCst) {
            return Err(BridgeError::FinalityTimeout(
                "confirmation never observed".to_string(),
            ));
        }
        Ok(())
    }
}

/// Test environment with a temp cache directory and automatic cleanup.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub provider: Arc<MockProvider>,
    pub ledger: Arc<MockLedger>,
    pub manager: Arc<TransferManager>,
}

impl TestEnvironment {
    pub fn new(provider: MockProvider) -> anyhow::Result<Self> {
        Self::with_ledger(provider, MockLedger::new())
    }

    pub fn with_ledger(provider: MockProvider, ledger: MockLedger) -> anyhow::Result<Self> {
        init_logging();
        let temp_dir = TempDir::new()?;
        let provider = Arc::new(provider);
        let ledger = Arc::new(ledger);
        let config = BridgeConfig {
            cache_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let manager = Arc::new(TransferManager::new(
            &config,
            provider.clone(),
            ledger.clone(),
        ));
        Ok(Self {
            temp_dir,
            provider,
            ledger,
            manager,
        })
    }

    /// A seeded on-chain record (one whole token, fixed timestamp).
    pub fn sample_record() -> RawTransferRecord {
        RawTransferRecord {
            sender: SENDER.to_string(),
            receiver: RECIPIENT.to_string(),
            amount: 1_000_000_000_000_000_000,
            keyword: "gm".to_string(),
            timestamp: 1_700_000_000,
            message: "first".to_string(),
        }
    }
}
