use ink::env::call::{build_call, ExecutionInput, Selector};
use ink::env::DefaultEnvironment;
use ink::primitives::AccountId;

use crate::errors::Error;
use crate::{Balance, Timestamp};

/// A market observation: token price plus the native conversion rate
/// valid at `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct PriceQuote {
    /// USD cents per whole token.
    pub market_price: Balance,
    /// Native base units per whole USD.
    pub native_rate: Balance,
    pub updated_at: Timestamp,
}

impl PriceQuote {
    /// Rejects zero prices and quotes older than `max_age` at `now`.
    pub fn validate(self, now: Timestamp, max_age: Timestamp) -> Result<Self, Error> {
        if self.market_price == 0 || self.native_rate == 0 {
            return Err(Error::PriceUnavailable);
        }
        if now > self.updated_at.saturating_add(max_age) {
            return Err(Error::PriceUnavailable);
        }
        Ok(self)
    }
}

/// External price source the ledger can be pointed at instead of posted
/// quotes.
#[ink::trait_definition]
pub trait PriceOracle {
    /// Latest quote, or `None` when the source has nothing current.
    #[ink(message)]
    fn latest_quote(&self) -> Option<PriceQuote>;
}

/// Asks `oracle` for its latest quote. A failed call and an empty answer
/// are both `PriceUnavailable`.
pub fn query(oracle: AccountId) -> Result<PriceQuote, Error> {
    let result = build_call::<DefaultEnvironment>()
        .call(oracle)
        .exec_input(ExecutionInput::new(Selector::new(ink::selector_bytes!(
            "PriceOracle::latest_quote"
        ))))
        .returns::<Option<PriceQuote>>()
        .try_invoke();

    match result {
        Ok(Ok(Some(quote))) => Ok(quote),
        _ => Err(Error::PriceUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(updated_at: Timestamp) -> PriceQuote {
        PriceQuote { market_price: 200, native_rate: 1_000, updated_at }
    }

    #[test]
    fn fresh_quote_passes() {
        assert_eq!(quote(1_000).validate(1_500, 500), Ok(quote(1_000)));
    }

    #[test]
    fn stale_quote_is_unavailable() {
        assert_eq!(quote(1_000).validate(1_501, 500), Err(Error::PriceUnavailable));
    }

    #[test]
    fn zero_rate_is_unavailable() {
        let q = PriceQuote { native_rate: 0, ..quote(0) };
        assert_eq!(q.validate(0, 500), Err(Error::PriceUnavailable));
    }
}
