/// Bridge configuration from environment variables
///
/// Controls the transfers contract address and where the persistent
/// transaction-count cache lives.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Address of the transfers contract on the ledger
    pub contract_address: String,
    /// Directory holding the persistent count cache
    pub cache_dir: PathBuf,
}

impl BridgeConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `CONTRACT_ADDRESS`: transfers contract address (optional, has a default)
    /// - `CACHE_DIR`: cache directory (optional, defaults to "./cache")
    pub fn from_env() -> Self {
        let contract_address = env::var("CONTRACT_ADDRESS").unwrap_or_else(|_| {
            log::info!("CONTRACT_ADDRESS not set, using default contract address");
            DEFAULT_CONTRACT_ADDRESS.to_string()
        });

        let cache_dir = env::var("CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./cache"));
        log::info!(
            "Bridge config - contract: {}, cache dir: {}",
            contract_address,
            cache_dir.display()
        );

        Self {
            contract_address,
            cache_dir,
        }
    }
}

const DEFAULT_CONTRACT_ADDRESS: &str = "0x2c1C85015aDB14C9913E7C8463e9c1Cf9F021f38";

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            cache_dir: PathBuf::from("./cache"),
        }
    }
}
