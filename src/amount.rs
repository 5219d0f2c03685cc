//! Amount parsing and encoding
//!
//! The ledger stores value as smallest-unit integers (wei, 18 decimals).
//! User input arrives as a decimal string ("0.01"); the wallet provider
//! expects the value as a canonical hex encoding.

use crate::error::BridgeError;

/// Smallest units per whole token (fixed 18-decimal scale).
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Maximum fractional digits a decimal amount may carry.
const MAX_DECIMALS: usize = 18;

/// Parse a decimal amount string into its smallest-unit representation.
///
/// Accepts plain decimals like "1", "0.01" or ".5". Rejects empty input,
/// negative values, non-numeric characters and more than 18 fractional
/// digits. A value of zero parses successfully; callers that require a
/// non-zero amount check the encoding (see [`validate_hex_value`]).
pub fn parse_amount(input: &str) -> Result<u128, BridgeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BridgeError::InvalidAmount("empty amount".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(BridgeError::InvalidAmount(format!(
            "negative amount: {}",
            trimmed
        )));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(BridgeError::InvalidAmount(format!(
            "not a number: {}",
            trimmed
        )));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(BridgeError::InvalidAmount(format!(
            "not a number: {}",
            trimmed
        )));
    }
    if frac_part.len() > MAX_DECIMALS {
        return Err(BridgeError::InvalidAmount(format!(
            "more than {} decimal places: {}",
            MAX_DECIMALS, trimmed
        )));
    }

    let whole: u128 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| BridgeError::InvalidAmount(format!("amount too large: {}", trimmed)))?
    };

    // Pad the fractional part out to 18 digits before parsing.
    let frac: u128 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_part, width = MAX_DECIMALS);
        padded
            .parse()
            .map_err(|_| BridgeError::InvalidAmount(format!("not a number: {}", trimmed)))?
    };

    whole
        .checked_mul(WEI_PER_ETHER)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(|| BridgeError::InvalidAmount(format!("amount too large: {}", trimmed)))
}

/// Canonical hex encoding of a smallest-unit value: `0x`-prefixed,
/// minimal lowercase digits, `0x0` for zero.
pub fn to_hex_value(wei: u128) -> String {
    format!("{:#x}", wei)
}

/// Check that a value string is a well-formed hex encoding.
pub fn is_hex_value(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Validate the encoded value for submission: well-formed and non-zero.
pub fn validate_hex_value(value: &str) -> Result<(), BridgeError> {
    if !is_hex_value(value) {
        return Err(BridgeError::InvalidAmount(format!(
            "malformed hex value: {}",
            value
        )));
    }
    // Non-minimal encodings like "0x00" are still zero.
    let digits = value.trim_start_matches("0x");
    if digits.chars().all(|c| c == '0') {
        return Err(BridgeError::InvalidAmount(
            "zero-value transfer".to_string(),
        ));
    }
    Ok(())
}

/// Convert a raw smallest-unit amount to its display form.
pub fn to_display_amount(wei: u128) -> f64 {
    wei as f64 / WEI_PER_ETHER as f64
}
