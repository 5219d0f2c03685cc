//! Persistent transaction-count cache
//!
//! A single JSON file holding the last known ledger record count, used as
//! a warm-start hint on the next load. Written by two independent paths
//! (session check and post-submission refresh); last writer wins.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Canonical file name for the cached count. The original design wrote the
/// count under two differently spelled keys; one name is used everywhere.
const CACHE_FILE: &str = "transaction_count.json";

#[derive(Debug, Serialize, Deserialize)]
struct CachedCount {
    transaction_count: u64,
}

#[derive(Clone)]
pub struct CountCache {
    base_path: PathBuf,
}

impl CountCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn cache_path(&self) -> PathBuf {
        self.base_path.join(CACHE_FILE)
    }

    /// Persist the last known ledger record count.
    pub fn save(&self, count: u64) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        let json = serde_json::to_string_pretty(&CachedCount {
            transaction_count: count,
        })?;
        fs::write(self.cache_path(), json)?;
        Ok(())
    }

    /// Load the cached count, or `None` if never written.
    pub fn load(&self) -> Result<Option<u64>, StorageError> {
        let path = self.cache_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        let cached: CachedCount = serde_json::from_str(&contents)?;
        Ok(Some(cached.transaction_count))
    }
}
