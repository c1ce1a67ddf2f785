use crate::errors::Error;
use crate::{
    Balance, Timestamp, DEFAULT_MAX_LOCKS, DEFAULT_MAX_LOCK_DURATION, DEFAULT_MAX_TOKEN_SUPPLY,
    DEFAULT_PRICE_UPDATE_INTERVAL, DEFAULT_REWARD_BONUS, MAX_LOCKS_CEILING, PERCENT,
};

/// Admin-tunable parameters, addressed by name through `update_config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum ConfigParam {
    MaxLocksAllowed,
    MaxLockDuration,
    MaxTokenSupply,
    RewardBonus,
    InitialPrice,
    PriceFloor,
    BuybackPrice,
    ReserveRatio,
    PriceUpdateInterval,
    /// `0` or `1`.
    ReserveBackedMinting,
}

/// Ledger parameters. Set once at construction, afterwards only through
/// [`Config::set`], which validates every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Config {
    pub max_locks_allowed: u32,
    /// Milliseconds.
    pub max_lock_duration: Timestamp,
    pub max_token_supply: Balance,
    pub reward_bonus: Balance,
    /// USD cents per whole token.
    pub initial_price: Balance,
    pub price_floor: Balance,
    pub buyback_price: Balance,
    /// Percent of whole supply the reserve should cover.
    pub reserve_ratio: u128,
    /// Maximum quote age in milliseconds.
    pub price_update_interval: Timestamp,
    pub reserve_backed_minting: bool,
}

impl Config {
    /// Defaults around a validated initial price and reserve ratio.
    pub fn new(initial_price: Balance, reserve_ratio: u128) -> Result<Self, Error> {
        if initial_price == 0 || !valid_ratio(reserve_ratio) {
            return Err(Error::InvalidParameter);
        }
        let buyback_price = initial_price
            .checked_mul(9)
            .ok_or(Error::InvalidParameter)?
            / 10;
        Ok(Self {
            max_locks_allowed: DEFAULT_MAX_LOCKS,
            max_lock_duration: DEFAULT_MAX_LOCK_DURATION,
            max_token_supply: DEFAULT_MAX_TOKEN_SUPPLY,
            reward_bonus: DEFAULT_REWARD_BONUS,
            initial_price,
            price_floor: initial_price,
            buyback_price: buyback_price.max(1),
            reserve_ratio,
            price_update_interval: DEFAULT_PRICE_UPDATE_INTERVAL,
            reserve_backed_minting: true,
        })
    }

    pub fn get(&self, param: ConfigParam) -> u128 {
        match param {
            ConfigParam::MaxLocksAllowed => self.max_locks_allowed.into(),
            ConfigParam::MaxLockDuration => self.max_lock_duration.into(),
            ConfigParam::MaxTokenSupply => self.max_token_supply,
            ConfigParam::RewardBonus => self.reward_bonus,
            ConfigParam::InitialPrice => self.initial_price,
            ConfigParam::PriceFloor => self.price_floor,
            ConfigParam::BuybackPrice => self.buyback_price,
            ConfigParam::ReserveRatio => self.reserve_ratio,
            ConfigParam::PriceUpdateInterval => self.price_update_interval.into(),
            ConfigParam::ReserveBackedMinting => self.reserve_backed_minting.into(),
        }
    }

    /// Validates and applies one parameter. `total_supply` bounds the
    /// supply cap from below. Returns the previous value.
    pub fn set(
        &mut self,
        param: ConfigParam,
        value: u128,
        total_supply: Balance,
    ) -> Result<u128, Error> {
        let previous = self.get(param);
        match param {
            ConfigParam::MaxLocksAllowed => {
                let max = u32::try_from(value).map_err(|_| Error::InvalidParameter)?;
                if max == 0 || max > MAX_LOCKS_CEILING {
                    return Err(Error::InvalidParameter);
                }
                self.max_locks_allowed = max;
            }
            ConfigParam::MaxLockDuration => {
                self.max_lock_duration = non_zero_millis(value)?;
            }
            ConfigParam::MaxTokenSupply => {
                if value == 0 || value < total_supply {
                    return Err(Error::InvalidParameter);
                }
                self.max_token_supply = value;
            }
            ConfigParam::RewardBonus => self.reward_bonus = value,
            ConfigParam::InitialPrice => {
                if value == 0 {
                    return Err(Error::InvalidParameter);
                }
                self.initial_price = value;
            }
            ConfigParam::PriceFloor => self.price_floor = value,
            ConfigParam::BuybackPrice => {
                if value == 0 {
                    return Err(Error::InvalidParameter);
                }
                self.buyback_price = value;
            }
            ConfigParam::ReserveRatio => {
                if !valid_ratio(value) {
                    return Err(Error::InvalidParameter);
                }
                self.reserve_ratio = value;
            }
            ConfigParam::PriceUpdateInterval => {
                self.price_update_interval = non_zero_millis(value)?;
            }
            ConfigParam::ReserveBackedMinting => {
                self.reserve_backed_minting = match value {
                    0 => false,
                    1 => true,
                    _ => return Err(Error::InvalidParameter),
                };
            }
        }
        Ok(previous)
    }
}

fn valid_ratio(ratio: u128) -> bool {
    (1..=PERCENT).contains(&ratio)
}

fn non_zero_millis(value: u128) -> Result<Timestamp, Error> {
    match Timestamp::try_from(value) {
        Ok(millis) if millis > 0 => Ok(millis),
        _ => Err(Error::InvalidParameter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TOKEN_UNIT;

    fn config() -> Config {
        Config::new(50, 10).unwrap()
    }

    #[test]
    fn new_rejects_zero_price_and_bad_ratio() {
        assert_eq!(Config::new(0, 10), Err(Error::InvalidParameter));
        assert_eq!(Config::new(50, 0), Err(Error::InvalidParameter));
        assert_eq!(Config::new(50, 101), Err(Error::InvalidParameter));
    }

    #[test]
    fn new_rejects_price_too_large_for_buyback_default() {
        assert_eq!(Config::new(Balance::MAX / 9 + 1, 10), Err(Error::InvalidParameter));
        assert!(Config::new(Balance::MAX / 9, 10).is_ok());
    }

    #[test]
    fn defaults_derive_from_initial_price() {
        let c = config();
        assert_eq!(c.price_floor, 50);
        assert_eq!(c.buyback_price, 45);
        assert!(c.reserve_backed_minting);
    }

    #[test]
    fn set_returns_previous_value() {
        let mut c = config();
        assert_eq!(c.set(ConfigParam::MaxLocksAllowed, 3, 0), Ok(DEFAULT_MAX_LOCKS.into()));
        assert_eq!(c.get(ConfigParam::MaxLocksAllowed), 3);
    }

    #[test]
    fn supply_cap_cannot_drop_below_supply() {
        let mut c = config();
        let supply = 500 * TOKEN_UNIT;
        assert_eq!(
            c.set(ConfigParam::MaxTokenSupply, supply - 1, supply),
            Err(Error::InvalidParameter)
        );
        assert!(c.set(ConfigParam::MaxTokenSupply, supply, supply).is_ok());
    }

    #[test]
    fn rejected_write_leaves_config_unchanged() {
        let mut c = config();
        let before = c;
        assert_eq!(c.set(ConfigParam::MaxLocksAllowed, 0, 0), Err(Error::InvalidParameter));
        assert_eq!(
            c.set(ConfigParam::MaxLockDuration, u128::from(u64::MAX) + 1, 0),
            Err(Error::InvalidParameter)
        );
        assert_eq!(c.set(ConfigParam::ReserveBackedMinting, 2, 0), Err(Error::InvalidParameter));
        assert_eq!(c, before);
    }

    #[test]
    fn reserve_backed_minting_toggles() {
        let mut c = config();
        assert_eq!(c.set(ConfigParam::ReserveBackedMinting, 0, 0), Ok(1));
        assert!(!c.reserve_backed_minting);
    }
}
