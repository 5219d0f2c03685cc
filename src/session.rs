//! Account session management
//!
//! Tracks the currently authorized account identity. The session manager
//! is the single writer of the identity; every other component reads it
//! through an explicit reference rather than ambient global state.

use crate::contract::ContractHandle;
use crate::error::BridgeError;
use crate::provider::WalletProvider;
use crate::store::CountCache;

/// The current account identity. Unset at process start, set on the
/// first successful connection or when an already-authorized account is
/// detected, and never explicitly cleared.
#[derive(Debug, Default)]
pub struct AccountSession {
    current_account: Option<String>,
}

impl AccountSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self) -> Option<&str> {
        self.current_account.as_deref()
    }

    pub(crate) fn set_account(&mut self, account: String) {
        log::info!("Session account set to {}", account);
        self.current_account = Some(account);
    }
}

/// Query the provider for already-authorized accounts, without prompting.
///
/// Returns the detected account when one exists, `None` when the user has
/// not authorized any (an informational condition, not an error).
pub async fn check_connection(
    provider: &dyn WalletProvider,
) -> Result<Option<String>, BridgeError> {
    if !provider.has_provider() {
        return Err(BridgeError::ProviderMissing);
    }

    let accounts = provider.accounts().await?;
    let account = accounts.into_iter().next();
    if account.is_none() {
        log::info!("No authorized accounts found");
    }
    Ok(account)
}

/// Actively request account authorization, possibly prompting the user.
pub async fn connect(provider: &dyn WalletProvider) -> Result<String, BridgeError> {
    if !provider.has_provider() {
        return Err(BridgeError::ProviderMissing);
    }

    let accounts = provider.request_accounts().await?;
    accounts
        .into_iter()
        .next()
        .ok_or_else(|| BridgeError::ConnectionDenied("provider returned no accounts".to_string()))
}

/// Read the ledger's current record count through a fresh handle and
/// persist it as a warm-start cache hint. Side effect only.
pub async fn refresh_count_cache(
    handle: &ContractHandle,
    cache: &CountCache,
) -> Result<u64, BridgeError> {
    let count = handle.get_transaction_count().await?;
    cache.save(count)?;
    log::debug!("Cached transaction count: {}", count);
    Ok(count)
}
