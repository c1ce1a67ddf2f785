//! Reserve-driven pricing and the fixed-point conversions used by the
//! exchange messages.
//!
//! ```text
//! target_reserve = whole(total_supply) × reserve_ratio / 100
//! price          = initial_price                                   if reserve ≥ target
//!                = initial_price + (target − reserve) × initial_price / 1000   otherwise
//!
//! usd_value      = amount × price / 100          (USD, 18 decimals)
//! native         = usd_value × native_rate / 10^18
//! ```

use crate::errors::Error;
use crate::{Balance, PERCENT, PRICE_SCALE, SHORTFALL_DIVISOR, TOKEN_UNIT};

/// Whole tokens contained in `amount` base units (truncating).
pub const fn whole_tokens(amount: Balance) -> Balance {
    amount / TOKEN_UNIT
}

/// Reserve units the circulating supply should be backed by.
pub fn target_reserve(total_supply: Balance, reserve_ratio: u128) -> Result<Balance, Error> {
    whole_tokens(total_supply)
        .checked_mul(reserve_ratio)
        .ok_or(Error::Overflow)?
        .checked_div(PERCENT)
        .ok_or(Error::Overflow)
}

/// Sale price implied by reserve pressure.
///
/// Rises linearly with the reserve shortfall; never drops below
/// `initial_price`.
pub fn current_price(
    total_supply: Balance,
    reserve_ratio: u128,
    reserve_quantity: Balance,
    initial_price: Balance,
) -> Result<Balance, Error> {
    let target = target_reserve(total_supply, reserve_ratio)?;
    if reserve_quantity >= target {
        return Ok(initial_price);
    }

    let premium = (target - reserve_quantity)
        .checked_mul(initial_price)
        .ok_or(Error::Overflow)?
        / SHORTFALL_DIVISOR;

    initial_price.checked_add(premium).ok_or(Error::Overflow)
}

/// Price actually charged on a sale: the market price, floored.
pub fn sale_price(market_price: Balance, price_floor: Balance) -> Balance {
    market_price.max(price_floor)
}

/// USD value (18 decimals) of `amount` tokens at `price` cents per token.
pub fn usd_value(amount: Balance, price: Balance) -> Result<Balance, Error> {
    amount
        .checked_mul(price)
        .ok_or(Error::Overflow)?
        .checked_div(PRICE_SCALE)
        .ok_or(Error::Overflow)
}

/// Converts a USD value (18 decimals) to native base units, `native_rate`
/// being native base units per whole USD.
pub fn usd_to_native(usd: Balance, native_rate: Balance) -> Result<Balance, Error> {
    usd.checked_mul(native_rate)
        .ok_or(Error::Overflow)?
        .checked_div(TOKEN_UNIT)
        .ok_or(Error::Overflow)
}

/// True when `reserve_quantity` backs every whole token of `supply_after`.
pub fn reserve_covers(reserve_quantity: Balance, supply_after: Balance) -> bool {
    reserve_quantity >= whole_tokens(supply_after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_raises_price() {
        // target = 1000 × 10 / 100 = 100; premium = (100 − 50) × 50 / 1000 = 2
        let price = current_price(1_000 * TOKEN_UNIT, 10, 50, 50).unwrap();
        assert_eq!(price, 52);
    }

    #[test]
    fn fully_backed_supply_keeps_initial_price() {
        assert_eq!(current_price(1_000 * TOKEN_UNIT, 10, 100, 50), Ok(50));
        assert_eq!(current_price(1_000 * TOKEN_UNIT, 10, 5_000, 50), Ok(50));
    }

    #[test]
    fn fractional_supply_is_truncated() {
        // 999.9 tokens count as 999 whole tokens.
        let supply = 999 * TOKEN_UNIT + TOKEN_UNIT / 10 * 9;
        assert_eq!(target_reserve(supply, 100), Ok(999));
    }

    #[test]
    fn empty_supply_has_no_target() {
        assert_eq!(current_price(0, 100, 0, 75), Ok(75));
    }

    #[test]
    fn sale_price_respects_floor() {
        assert_eq!(sale_price(40, 50), 50);
        assert_eq!(sale_price(60, 50), 60);
    }

    #[test]
    fn usd_and_native_conversion() {
        // 10 tokens at 200 cents = 20 USD; at 1 000 native units per USD = 20 000.
        let usd = usd_value(10 * TOKEN_UNIT, 200).unwrap();
        assert_eq!(usd, 20 * TOKEN_UNIT);
        assert_eq!(usd_to_native(usd, 1_000), Ok(20_000));
    }

    #[test]
    fn conversion_overflow_is_surfaced() {
        assert_eq!(usd_value(Balance::MAX, 2), Err(Error::Overflow));
        assert_eq!(usd_to_native(Balance::MAX, 2), Err(Error::Overflow));
    }

    #[test]
    fn reserve_covers_whole_tokens_only() {
        assert!(reserve_covers(10, 10 * TOKEN_UNIT));
        assert!(reserve_covers(10, 10 * TOKEN_UNIT + 1));
        assert!(!reserve_covers(10, 11 * TOKEN_UNIT));
    }
}
