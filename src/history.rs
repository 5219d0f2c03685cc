//! Transaction history synchronization
//!
//! Fetches the full set of historical transfer records from the ledger and
//! maps each into a display-ready shape. The mapped set always replaces the
//! previous one wholesale; there is no incremental merge.

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::amount::to_display_amount;
use crate::contract::{ContractHandle, RawTransferRecord};
use crate::error::BridgeError;

/// A historical transfer in display form: amount scaled down from
/// smallest units, timestamp formatted for local display.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TransferRecord {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    pub keyword: String,
    pub message: String,
    pub timestamp: String,
}

/// Fetch all records and map them for display.
///
/// Callers replace their record set only on success, so a failure
/// mid-fetch leaves the previously synchronized set untouched.
pub async fn refresh(handle: &ContractHandle) -> Result<Vec<TransferRecord>, BridgeError> {
    let raw = handle.get_all_transactions().await?;
    let records: Vec<TransferRecord> = raw.iter().map(map_record).collect();
    log::debug!("Synchronized {} transfer records", records.len());
    Ok(records)
}

fn map_record(raw: &RawTransferRecord) -> TransferRecord {
    TransferRecord {
        sender: raw.sender.clone(),
        recipient: raw.receiver.clone(),
        amount: to_display_amount(raw.amount),
        keyword: raw.keyword.clone(),
        message: raw.message.clone(),
        timestamp: format_timestamp(raw.timestamp),
    }
}

/// Convert an epoch-seconds timestamp to its local display form.
fn format_timestamp(epoch_secs: u64) -> String {
    match Local.timestamp_opt(epoch_secs as i64, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => epoch_secs.to_string(),
    }
}
