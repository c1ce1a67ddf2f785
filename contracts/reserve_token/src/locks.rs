use ink::prelude::vec::Vec;

use crate::errors::Error;
use crate::Timestamp;

/// One transfer restriction held by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Lock {
    /// Requested duration in milliseconds.
    pub duration: Timestamp,
    /// Block timestamp after which the lock no longer applies.
    pub unlock_time: Timestamp,
}

impl Lock {
    /// Builds a lock starting at `now`, after checking `duration` against
    /// `max_duration`.
    pub fn starting_at(
        now: Timestamp,
        duration: Timestamp,
        max_duration: Timestamp,
    ) -> Result<Self, Error> {
        if duration == 0 || duration > max_duration {
            return Err(Error::InvalidDuration);
        }
        let unlock_time = now.checked_add(duration).ok_or(Error::Overflow)?;
        Ok(Self { duration, unlock_time })
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        self.unlock_time > now
    }
}

/// True iff any entry is still in force at `now`.
pub fn is_locked(locks: &[Lock], now: Timestamp) -> bool {
    locks.iter().any(|lock| lock.is_active(now))
}

/// Drops expired entries in place, keeping survivors in their original
/// order. Returns the number of entries removed.
pub fn retain_active(locks: &mut Vec<Lock>, now: Timestamp) -> usize {
    let before = locks.len();
    locks.retain(|lock| lock.is_active(now));
    before - locks.len()
}

/// Latest unlock time among active entries.
pub fn latest_unlock(locks: &[Lock], now: Timestamp) -> Option<Timestamp> {
    locks
        .iter()
        .filter(|lock| lock.is_active(now))
        .map(|lock| lock.unlock_time)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink::prelude::vec;

    fn lock(duration: Timestamp, unlock_time: Timestamp) -> Lock {
        Lock { duration, unlock_time }
    }

    #[test]
    fn starting_at_rejects_zero_and_oversized_durations() {
        assert_eq!(Lock::starting_at(10, 0, 100), Err(Error::InvalidDuration));
        assert_eq!(Lock::starting_at(10, 101, 100), Err(Error::InvalidDuration));
        assert_eq!(Lock::starting_at(10, 100, 100), Ok(lock(100, 110)));
    }

    #[test]
    fn starting_at_overflow_is_surfaced() {
        assert_eq!(
            Lock::starting_at(Timestamp::MAX, 1, 100),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn lock_expires_exactly_at_unlock_time() {
        let locks = [lock(50, 150)];
        assert!(is_locked(&locks, 149));
        assert!(!is_locked(&locks, 150));
    }

    #[test]
    fn retain_active_preserves_order_of_survivors() {
        let mut locks = vec![lock(1, 10), lock(2, 300), lock(3, 20), lock(4, 200), lock(5, 400)];
        let removed = retain_active(&mut locks, 100);
        assert_eq!(removed, 2);
        assert_eq!(locks, vec![lock(2, 300), lock(4, 200), lock(5, 400)]);
    }

    #[test]
    fn retain_active_is_idempotent_without_time_passing() {
        let mut locks = vec![lock(1, 10), lock(2, 300)];
        retain_active(&mut locks, 100);
        let first = locks.clone();
        assert_eq!(retain_active(&mut locks, 100), 0);
        assert_eq!(locks, first);
    }

    #[test]
    fn latest_unlock_ignores_expired() {
        let locks = [lock(1, 500), lock(2, 300), lock(3, 50)];
        assert_eq!(latest_unlock(&locks, 100), Some(500));
        assert_eq!(latest_unlock(&locks, 500), None);
    }
}
