use core::fmt;

/// Every way a ledger operation can be rejected.
///
/// A message that returns one of these leaves storage untouched: all checks
/// run before the first write, and the host reverts on `Err` regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Caller lacks the role the operation requires.
    Unauthorized,
    /// A state-mutating operation is already in progress on this instance.
    ReentrantCall,
    /// Sender holds at least one lock that has not expired.
    AccountLocked,
    /// Sender's token balance or allowance is too small.
    InsufficientBalance,
    /// Native value sent with `buy` does not cover the cost.
    InsufficientPayment,
    /// Contract's native balance cannot cover the payout.
    InsufficientReserveFunds,
    /// Contract's own token holding cannot cover the sale.
    InsufficientTokenSupply,
    /// Mint would push total supply above `max_token_supply`.
    ExceedsSupplyCap,
    /// Mint would leave circulating supply under-backed by the reserve.
    ReserveInsufficient,
    /// Target is the null identity.
    InvalidAccount,
    /// Lock duration is zero or exceeds `max_lock_duration`.
    InvalidDuration,
    /// Target already holds `max_locks_allowed` active locks.
    TooManyLocks,
    /// A configuration or price parameter failed validation.
    InvalidParameter,
    /// No fresh market quote is available.
    PriceUnavailable,
    /// The host rejected a native-currency transfer.
    TransferFailed,
    /// An arithmetic operation overflowed.
    Overflow,
    /// Contract is paused.
    ContractPaused,
}

impl Error {
    /// Human-readable reason surfaced alongside the failure kind.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::Unauthorized => "caller lacks the required role",
            Error::ReentrantCall => "re-entrant call rejected",
            Error::AccountLocked => "account has an active transfer lock",
            Error::InsufficientBalance => "insufficient token balance",
            Error::InsufficientPayment => "payment does not cover the cost",
            Error::InsufficientReserveFunds => "contract cannot cover the native payout",
            Error::InsufficientTokenSupply => "contract holds too few tokens for this sale",
            Error::ExceedsSupplyCap => "mint exceeds the maximum token supply",
            Error::ReserveInsufficient => "reserve does not back the resulting supply",
            Error::InvalidAccount => "null account",
            Error::InvalidDuration => "lock duration out of range",
            Error::TooManyLocks => "maximum number of active locks reached",
            Error::InvalidParameter => "parameter failed validation",
            Error::PriceUnavailable => "market price unavailable or stale",
            Error::TransferFailed => "native transfer failed",
            Error::Overflow => "arithmetic overflow",
            Error::ContractPaused => "contract is paused",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self, self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_kind_and_reason() {
        let rendered = ink::prelude::format!("{}", Error::TooManyLocks);
        assert_eq!(rendered, "TooManyLocks: maximum number of active locks reached");
    }
}
