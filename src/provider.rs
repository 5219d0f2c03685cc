//! Wallet provider capability
//!
//! The account/signing authority is injected behind a trait so the core
//! never assumes a globally available provider object, and tests can
//! substitute a double.

use async_trait::async_trait;

use crate::error::BridgeError;

/// Fixed gas allowance for a plain native value transfer (21000 units).
pub const TRANSFER_GAS: u64 = 21_000;

/// A native value transfer request handed to the wallet provider.
///
/// `gas` and `value` are canonical hex encodings, matching the wire shape
/// of an `eth_sendTransaction` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeTransfer {
    pub from: String,
    pub to: String,
    pub gas: String,
    pub value: String,
}

impl NativeTransfer {
    pub fn new(from: &str, to: &str, hex_value: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            gas: format!("{:#x}", TRANSFER_GAS),
            value: hex_value.to_string(),
        }
    }
}

/// Capability interface over the browser-resident wallet.
///
/// `accounts` maps to `eth_accounts` (no user prompt), `request_accounts`
/// to `eth_requestAccounts` (may prompt), `send_transaction` to
/// `eth_sendTransaction`. `has_provider` reports whether a wallet
/// extension is present at all; callers check it before issuing requests.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn has_provider(&self) -> bool;

    /// Accounts the user has already authorized, without prompting.
    async fn accounts(&self) -> Result<Vec<String>, BridgeError>;

    /// Request account authorization, possibly prompting the user.
    async fn request_accounts(&self) -> Result<Vec<String>, BridgeError>;

    /// Ask the wallet to sign and broadcast a native value transfer.
    /// Returns the transaction hash; broadcast acceptance is not finality.
    async fn send_transaction(&self, transfer: NativeTransfer) -> Result<String, BridgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_gas_encoding() {
        let transfer = NativeTransfer::new("0xsender", "0xrecipient", "0x2386f26fc10000");
        assert_eq!(transfer.gas, "0x5208");
        assert_eq!(transfer.value, "0x2386f26fc10000");
    }
}
