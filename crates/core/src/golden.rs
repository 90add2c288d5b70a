//! Reserved "golden" lock numbers.
//!
//! Golden numbers are excluded from random allocation and cannot be bought
//! directly. The operator sells them through golden-asset listings. The set is
//! plain data: the built-in list below, or a JSON array of integers loaded from
//! disk at startup.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CoreError;
use crate::types::{is_valid_lock_id, LockId};

/// Built-in golden numbers: repdigits, round numbers, counting sequences,
/// mathematical constants, mirrored numbers, meaningful years and dates, and
/// numbers with a love meaning.
#[rustfmt::skip]
pub const DEFAULT_RESERVED_IDS: &[LockId] = &[
    // Repdigits
    1, 2, 3, 4, 5, 6, 7, 8, 9,
    11, 22, 33, 44, 55, 66, 77, 88, 99,
    111, 222, 333, 444, 555, 666, 777, 888, 999,
    1111, 2222, 3333, 4444, 5555, 6666, 7777, 8888, 9999,
    11111, 22222, 33333, 44444, 55555, 66666, 77777, 88888, 99999,
    111111, 222222, 333333, 444444, 555555, 666666, 777777, 888888, 999999,
    // Round numbers
    10, 20, 30, 40, 50, 60, 70, 80, 90,
    100, 200, 300, 400, 500, 600, 700, 800, 900,
    1000, 2000, 3000, 4000, 5000, 6000, 7000, 8000, 9000,
    10000, 20000, 30000, 40000, 50000, 60000, 70000, 80000, 90000,
    100000, 200000, 300000, 400000, 500000, 600000, 700000, 800000, 900000,
    1000000,
    // Counting sequences
    12, 123, 1234, 12345, 123456,
    21, 321, 4321, 54321, 654321,
    234, 345, 456, 567, 678, 789,
    2345, 3456, 4567, 5678, 6789,
    98, 987, 9876, 98765, 987654,
    // Constants
    314, 3141, 31415, 314159,
    271, 2718, 27182, 271828,
    1618, 16180, 161803,
    // Mirrored numbers
    101, 1001, 1010, 10101, 101010,
    1221, 1331, 1441, 2112, 3003, 5005, 7007, 9009,
    12321, 123321,
    // Years
    1789, 1804, 1889, 1900, 1968, 1989, 1999,
    2001, 2010, 2012, 2020, 2024, 2025, 2026, 2027, 2028, 2030,
    // Dates (day-month and month-day)
    214, 1402, 1407, 714, 1225, 2512, 1231, 3112,
    // Love numbers
    143, 520, 521, 1314, 3344, 1437, 459, 831, 224,
    // Lucky numbers
    168, 518, 1688, 6688, 8899,
];

/// Immutable set of reserved lock numbers.
///
/// Built once at startup and shared read-only; membership tests only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedIds {
    ids: HashSet<LockId>,
}

impl Default for ReservedIds {
    fn default() -> Self {
        Self::from_ids(DEFAULT_RESERVED_IDS.iter().copied())
            .expect("built-in reserved ids are within range")
    }
}

impl ReservedIds {
    /// Build a set from arbitrary ids, rejecting any outside the lock range.
    pub fn from_ids(ids: impl IntoIterator<Item = LockId>) -> Result<Self, CoreError> {
        let mut set = HashSet::new();
        for id in ids {
            if !is_valid_lock_id(id) {
                return Err(CoreError::Validation(format!(
                    "Reserved id {id} is outside the lock number range"
                )));
            }
            set.insert(id);
        }
        Ok(Self { ids: set })
    }

    /// An empty set (nothing is golden).
    pub fn empty() -> Self {
        Self {
            ids: HashSet::new(),
        }
    }

    /// Parse a JSON array of integers, e.g. `[7, 77, 777]`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let ids: Vec<LockId> = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid reserved id list: {e}")))?;
        Self::from_ids(ids)
    }

    /// Load a JSON array of integers from `path`.
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!(
                "Failed to read reserved id file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn contains(&self, id: LockId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All reserved ids in ascending order.
    pub fn sorted(&self) -> Vec<LockId> {
        let mut ids: Vec<LockId> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
