use ink::storage::traits::ManualKey;
use ink::storage::Lazy;

use crate::errors::Error;

/// Storage key of the in-progress flag.
pub const REENTRANCY_GUARD_KEY: u32 = 0x5245_4e54;

/// Single in-progress flag shared by every state-mutating message of one
/// contract instance.
///
/// The flag lives in its own storage cell and is written on every `enter`
/// and `exit`, so an invocation nested inside an outbound call loads
/// `entered == true` even though the outer message has not returned yet.
///
/// The contract never calls `enter`/`exit` directly; it goes through its
/// closure-scoped `non_reentrant` wrapper so the flag is cleared on every
/// return path.
#[ink::storage_item]
#[derive(Default, Debug)]
pub struct ReentrancyGuard {
    entered: Lazy<bool, ManualKey<REENTRANCY_GUARD_KEY>>,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard, failing if an operation is already running.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.is_entered() {
            return Err(Error::ReentrantCall);
        }
        self.entered.set(&true);
        Ok(())
    }

    pub fn exit(&mut self) {
        self.entered.set(&false);
    }

    /// Reads the persisted flag.
    pub fn is_entered(&self) -> bool {
        self.entered.get().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_flag() -> Option<bool> {
        ink::env::get_contract_storage::<u32, bool>(&REENTRANCY_GUARD_KEY)
            .expect("flag decodes")
    }

    #[ink::test]
    fn second_enter_is_rejected() {
        let mut guard = ReentrancyGuard::new();
        guard.enter().unwrap();
        assert_eq!(guard.enter(), Err(Error::ReentrantCall));
        assert!(guard.is_entered());
    }

    #[ink::test]
    fn exit_releases() {
        let mut guard = ReentrancyGuard::new();
        guard.enter().unwrap();
        guard.exit();
        assert!(!guard.is_entered());
        assert_eq!(guard.enter(), Ok(()));
    }

    #[ink::test]
    fn enter_persists_immediately() {
        let mut guard = ReentrancyGuard::new();
        assert_eq!(stored_flag(), None);
        guard.enter().unwrap();
        assert_eq!(stored_flag(), Some(true));

        // A separately loaded instance sees the claim.
        let mut reloaded = ReentrancyGuard::new();
        assert_eq!(reloaded.enter(), Err(Error::ReentrantCall));

        guard.exit();
        assert_eq!(stored_flag(), Some(false));
        assert_eq!(reloaded.enter(), Ok(()));
    }
}
