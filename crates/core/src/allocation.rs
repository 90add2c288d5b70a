//! Random lock number allocation.
//!
//! Draws uniformly from the lock range a bounded number of times, then falls
//! back to a linear scan so the allocator always terminates with an answer.
//! The caller passes a fresh view of existing ids on every call; nothing is
//! cached here.

use std::collections::HashSet;

use rand::Rng;

use crate::golden::ReservedIds;
use crate::types::{LockId, MAX_LOCK_ID, MIN_LOCK_ID};

/// Number of random draws before falling back to a linear scan.
pub const RANDOM_ATTEMPTS: usize = 100;

/// Default number of allocate-and-insert rounds when an insert loses a race.
pub const DEFAULT_ALLOCATION_RETRIES: u32 = 3;

/// Reasons a lock number cannot be assigned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// A golden number was requested directly and has no active listing.
    #[error("Lock #{lock_id} is a reserved number and cannot be purchased directly")]
    ReservedNumber { lock_id: LockId },

    /// The number is owned, or was claimed by a concurrent purchase.
    #[error("Lock #{lock_id} has just been taken, please choose another number")]
    NumberTaken { lock_id: LockId },

    /// Every number on the bridge is owned or reserved.
    #[error("No lock numbers are left")]
    SoldOut,

    /// Random allocation kept colliding with concurrent purchases.
    #[error("Could not assign a lock number after {attempts} attempts, please try again")]
    RetriesExhausted { attempts: u32 },
}

/// Pick an id in the lock range that is neither existing nor reserved.
///
/// Returns `None` only when `existing ∪ reserved` covers the whole range.
pub fn allocate<R: Rng + ?Sized>(
    existing: &HashSet<LockId>,
    reserved: &ReservedIds,
    rng: &mut R,
) -> Option<LockId> {
    let is_free = |id: LockId| !existing.contains(&id) && !reserved.contains(id);

    for _ in 0..RANDOM_ATTEMPTS {
        let candidate = rng.random_range(MIN_LOCK_ID..=MAX_LOCK_ID);
        if is_free(candidate) {
            return Some(candidate);
        }
    }

    (MIN_LOCK_ID..=MAX_LOCK_ID).find(|&id| is_free(id))
}

/// [`allocate`] with the thread-local RNG.
pub fn allocate_random(existing: &HashSet<LockId>, reserved: &ReservedIds) -> Option<LockId> {
    allocate(existing, reserved, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn full_range_except(skip: &[LockId]) -> HashSet<LockId> {
        (MIN_LOCK_ID..=MAX_LOCK_ID)
            .filter(|id| !skip.contains(id))
            .collect()
    }

    #[test]
    fn never_returns_existing_or_reserved() {
        let reserved = ReservedIds::default();
        let existing: HashSet<LockId> = (1..=5_000).collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let id = allocate(&existing, &reserved, &mut rng).unwrap();
            assert!(!existing.contains(&id));
            assert!(!reserved.contains(id));
            assert!((MIN_LOCK_ID..=MAX_LOCK_ID).contains(&id));
        }
    }

    #[test]
    fn empty_bridge_allocates() {
        let id = allocate_random(&HashSet::new(), &ReservedIds::default());
        assert!(id.is_some());
    }

    #[test]
    fn falls_back_to_scan_for_last_free_id() {
        let existing = full_range_except(&[555123]);
        let mut rng = StdRng::seed_from_u64(42);

        let id = allocate(&existing, &ReservedIds::empty(), &mut rng);
        assert_eq!(id, Some(555123));
    }

    #[test]
    fn sold_out_when_existing_covers_range() {
        let existing = full_range_except(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(allocate(&existing, &ReservedIds::empty(), &mut rng), None);
    }

    #[test]
    fn sold_out_when_existing_and_reserved_cover_range() {
        let reserved = ReservedIds::from_ids([3, 999_999]).unwrap();
        let existing = full_range_except(&[3, 999_999]);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(allocate(&existing, &reserved, &mut rng), None);
    }

    #[test]
    fn reserved_gap_is_skipped_but_unreserved_gap_is_found() {
        let reserved = ReservedIds::from_ids([10]).unwrap();
        let existing = full_range_except(&[10, 11]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(allocate(&existing, &reserved, &mut rng), Some(11));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let reserved = ReservedIds::default();
        let existing = HashSet::new();
        let a = allocate(&existing, &reserved, &mut StdRng::seed_from_u64(99));
        let b = allocate(&existing, &reserved, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
