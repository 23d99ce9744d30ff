//! Receipt numbers: `RCP-` followed by eight digits.

use core::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chemsales_core::DomainError;

const PREFIX: &str = "RCP-";
const MODULUS: u64 = 100_000_000;

/// Receipt identifier shown on the invoice.
///
/// Not guaranteed unique: nothing is persisted for it to collide with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReceiptNumber(u32);

impl ReceiptNumber {
    /// Keep the last eight decimal digits of `value`.
    pub fn from_suffix(value: u64) -> Self {
        // < 10^8 always fits in u32.
        Self((value % MODULUS) as u32)
    }
}

impl core::fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{PREFIX}{:08}", self.0)
    }
}

impl FromStr for ReceiptNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(PREFIX)
            .filter(|d| d.len() == 8 && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| DomainError::invalid_id(format!("ReceiptNumber: {s:?}")))?;
        let value = digits
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_id(format!("ReceiptNumber: {e}")))?;
        Ok(Self(value))
    }
}

impl TryFrom<String> for ReceiptNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReceiptNumber> for String {
    fn from(value: ReceiptNumber) -> Self {
        value.to_string()
    }
}

/// Strategy for numbering receipts.
pub trait ReceiptNumberSource: Send + Sync {
    fn next_number(&self, issued_at: DateTime<Utc>) -> ReceiptNumber;
}

/// Last eight digits of the issue time in epoch milliseconds.
///
/// Two receipts issued in the same millisecond share a number.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampReceiptNumbers;

impl ReceiptNumberSource for TimestampReceiptNumbers {
    fn next_number(&self, issued_at: DateTime<Utc>) -> ReceiptNumber {
        let millis = issued_at.timestamp_millis().rem_euclid(MODULUS as i64);
        ReceiptNumber::from_suffix(millis as u64)
    }
}

/// Monotonic counter, unique until it wraps after 10^8 receipts.
#[derive(Debug)]
pub struct SequentialReceiptNumbers {
    next: AtomicU64,
}

impl SequentialReceiptNumbers {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialReceiptNumbers {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl ReceiptNumberSource for SequentialReceiptNumbers {
    fn next_number(&self, _issued_at: DateTime<Utc>) -> ReceiptNumber {
        ReceiptNumber::from_suffix(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
