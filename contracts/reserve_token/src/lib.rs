#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod config;
pub mod errors;
pub mod guard;
pub mod locks;
pub mod oracle;
pub mod pricing;
pub mod roles;

pub use crate::config::{Config, ConfigParam};
pub use crate::errors::Error;
pub use crate::locks::Lock;
pub use crate::oracle::PriceQuote;
pub use crate::roles::Role;

pub type Balance = u128;
pub type Timestamp = u64;

// =============================================================================
// CONSTANTS
// =============================================================================

pub const TOKEN_NAME: &str = "Reserve Token";
pub const TOKEN_SYMBOL: &str = "RSV";
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token in base units (18 decimals).
pub const TOKEN_UNIT: Balance = 1_000_000_000_000_000_000;

/// Prices are USD cents per whole token.
pub const PRICE_SCALE: Balance = 100;

/// Denominator of `reserve_ratio`.
pub const PERCENT: u128 = 100;

/// Each whole reserve unit of shortfall adds `initial_price / 1000`.
pub const SHORTFALL_DIVISOR: Balance = 1_000;

// ── Configuration defaults ────────────────────────────────────────────────────

pub const DEFAULT_MAX_TOKEN_SUPPLY: Balance = 1_000_000_000 * TOKEN_UNIT;
pub const DEFAULT_MAX_LOCKS: u32 = 10;
/// Hard ceiling for `max_locks_allowed`; bounds the per-account lock list.
pub const MAX_LOCKS_CEILING: u32 = 64;
/// 365 days in milliseconds.
pub const DEFAULT_MAX_LOCK_DURATION: Timestamp = 365 * 24 * 60 * 60 * 1_000;
pub const DEFAULT_REWARD_BONUS: Balance = 10 * TOKEN_UNIT;
/// One hour in milliseconds.
pub const DEFAULT_PRICE_UPDATE_INTERVAL: Timestamp = 3_600_000;

/// Longest accepted `reward_chatroom_idea` reference tag, in bytes.
pub const MAX_REFERENCE_LEN: usize = 256;

/// The null identity; never a valid recipient, lock target or role member.
pub const NULL_ACCOUNT: [u8; 32] = [0u8; 32];

/// # Reserve Token
///
/// Reserve-backed token ledger with algorithmic pricing, a hard issuance cap
/// and time-locked transfer restriction.
///
/// ```text
///   caller ──► message ──► non_reentrant ──► role check ──► lock check
///                                                            │
///               pricing (reserve / oracle) ◄─────────────────┤
///                                                            ▼
///                                               balances / supply / locks
/// ```
///
/// ## Exchange
/// - `buy(to, amount)` sells tokens out of the contract's own holding at
///   `max(market_price, price_floor)`, refunding any overpayment.
/// - `sell_back(amount)` burns the caller's tokens and pays them out at
///   `buyback_price`.
///
/// Both convert USD value to native currency with the rate carried by the
/// current `PriceQuote` (posted by a `PriceFeeder`, or read from a
/// `PriceOracle` contract when one is configured).
///
/// ## Supply
/// `mint` and `reward_chatroom_idea` never push `total_supply` above
/// `max_token_supply`; with `reserve_backed_minting` they additionally
/// require one reserve unit per whole token in circulation.
///
/// ## Locks
/// A `Locker` can lock any account for up to `max_lock_duration`; while any
/// lock is active the account cannot transfer, be drawn from, or sell back.
/// Anyone can compact an account's expired locks.
///
/// ## Roles
/// `Admin` administers every role, itself included.
#[ink::contract]
mod reserve_token {
    use super::*;
    use crate::guard::ReentrancyGuard;
    use ink::prelude::string::{String, ToString};
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct ReserveToken {
        // ── Ledger ────────────────────────────────────────────────────────
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,
        total_burned: Balance,

        // ── Reserve ───────────────────────────────────────────────────────
        /// Backing units held against circulating supply.
        reserve_quantity: Balance,
        /// Last quote posted by a `PriceFeeder`.
        posted_quote: Option<PriceQuote>,
        /// External price source; takes precedence over posted quotes.
        price_oracle: Option<AccountId>,
        last_price_update: Timestamp,

        // ── Locks ─────────────────────────────────────────────────────────
        locks: Mapping<AccountId, Vec<Lock>>,
        lock_counts: Mapping<AccountId, u32>,

        // ── Access control ────────────────────────────────────────────────
        role_members: Mapping<(Role, AccountId), bool>,

        // ── Parameters ────────────────────────────────────────────────────
        config: Config,

        // ── Safety ───────────────────────────────────────────────────────
        /// Own storage cell; written through on `enter`/`exit`.
        guard: ReentrancyGuard,
        paused: bool,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    /// Emitted for every completed `buy`.
    #[ink(event)]
    pub struct TokensPurchased {
        #[ink(topic)]
        buyer: AccountId,
        #[ink(topic)]
        recipient: AccountId,
        amount: Balance,
        /// Cents per whole token actually charged.
        unit_price: Balance,
        /// Native units kept by the contract.
        cost: Balance,
        /// Native units returned to the buyer.
        refund: Balance,
    }

    /// Emitted for every completed `sell_back`.
    #[ink(event)]
    pub struct TokensBoughtBack {
        #[ink(topic)]
        seller: AccountId,
        amount: Balance,
        payout: Balance,
        total_burned: Balance,
    }

    #[ink(event)]
    pub struct IdeaRewarded {
        #[ink(topic)]
        user: AccountId,
        amount: Balance,
        reference: String,
    }

    #[ink(event)]
    pub struct TokensLocked {
        #[ink(topic)]
        account: AccountId,
        duration: Timestamp,
        unlock_time: Timestamp,
    }

    #[ink(event)]
    pub struct ReserveUpdated {
        previous: Balance,
        updated: Balance,
    }

    #[ink(event)]
    pub struct ConfigUpdated {
        param: ConfigParam,
        previous: u128,
        updated: u128,
    }

    #[ink(event)]
    pub struct RoleGranted {
        role: Role,
        #[ink(topic)]
        account: AccountId,
        #[ink(topic)]
        sender: AccountId,
    }

    #[ink(event)]
    pub struct RoleRevoked {
        role: Role,
        #[ink(topic)]
        account: AccountId,
        #[ink(topic)]
        sender: AccountId,
    }

    #[ink(event)]
    pub struct PriceQuoted {
        market_price: Balance,
        native_rate: Balance,
        timestamp: Timestamp,
    }

    #[ink(event)]
    pub struct PriceOracleUpdated {
        oracle: Option<AccountId>,
    }

    #[ink(event)]
    pub struct NativeDeposited {
        #[ink(topic)]
        from: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct NativeWithdrawn {
        #[ink(topic)]
        to: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct PausedChanged {
        paused: bool,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl ReserveToken {
        // ---------------------------------------------------------------------
        // Constructor
        // ---------------------------------------------------------------------

        /// One-time initialisation.
        ///
        /// Grants `Admin` to `admin`. The price floor starts at
        /// `initial_price` and the buyback price at 90% of it; supply starts
        /// at zero and is issued through `mint`.
        ///
        /// # Errors
        /// - [`Error::InvalidAccount`] if `admin` is the null identity.
        /// - [`Error::InvalidParameter`] on a zero price or a ratio outside 1..=100.
        #[ink(constructor)]
        pub fn new(
            admin: AccountId,
            initial_price: Balance,
            reserve_ratio: u128,
        ) -> Result<Self, Error> {
            Self::ensure_account(admin)?;
            let config = Config::new(initial_price, reserve_ratio)?;

            let mut role_members = Mapping::default();
            role_members.insert((Role::Admin, admin), &true);

            Self::env().emit_event(RoleGranted {
                role: Role::Admin,
                account: admin,
                sender: Self::env().caller(),
            });

            Ok(Self {
                total_supply: 0,
                balances: Mapping::default(),
                allowances: Mapping::default(),
                total_burned: 0,
                reserve_quantity: 0,
                posted_quote: None,
                price_oracle: None,
                last_price_update: 0,
                locks: Mapping::default(),
                lock_counts: Mapping::default(),
                role_members,
                config,
                guard: ReentrancyGuard::new(),
                paused: false,
            })
        }

        // =====================================================================
        // EXCHANGE
        // =====================================================================

        /// Sell `amount` tokens from the contract's holding to `to`.
        ///
        /// ```text
        /// unit_price = max(market_price, price_floor)
        /// cost       = amount × unit_price / 100 × native_rate / 10^18
        /// refund     = paid − cost
        /// ```
        ///
        /// # Errors
        /// - [`Error::InsufficientTokenSupply`] if contract holds fewer than `amount`.
        /// - [`Error::PriceUnavailable`] if no fresh quote exists.
        /// - [`Error::InsufficientPayment`] if the transferred value is below `cost`.
        #[ink(message, payable)]
        pub fn buy(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            self.non_reentrant(|this| this.buy_impl(to, amount))
        }

        /// Burn `amount` of the caller's tokens and pay out at `buyback_price`.
        ///
        /// # Errors
        /// - [`Error::AccountLocked`] if caller holds an active lock.
        /// - [`Error::InsufficientBalance`] if caller holds fewer than `amount`.
        /// - [`Error::PriceUnavailable`] if no fresh conversion rate exists.
        /// - [`Error::InsufficientReserveFunds`] if contract cannot cover the payout.
        #[ink(message)]
        pub fn sell_back(&mut self, amount: Balance) -> Result<Balance, Error> {
            self.non_reentrant(|this| this.sell_back_impl(amount))
        }

        /// Top up the native pool that funds buybacks.
        #[ink(message, payable)]
        pub fn deposit_native(&mut self) -> Result<(), Error> {
            self.non_reentrant(|this| {
                let amount = this.env().transferred_value();
                if amount == 0 {
                    return Err(Error::InvalidParameter);
                }
                let from = this.env().caller();
                this.env().emit_event(NativeDeposited { from, amount });
                Ok(())
            })
        }

        #[ink(message)]
        pub fn withdraw_native(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(Role::Admin)?;
                Self::ensure_account(to)?;
                if this.env().balance() < amount {
                    return Err(Error::InsufficientReserveFunds);
                }
                this.env()
                    .transfer(to, amount)
                    .map_err(|_| Error::TransferFailed)?;
                this.env().emit_event(NativeWithdrawn { to, amount });
                Ok(())
            })
        }

        fn buy_impl(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            self.assert_not_paused()?;
            Self::ensure_account(to)?;
            if amount == 0 {
                return Err(Error::InvalidParameter);
            }

            let buyer = self.env().caller();
            let vault = self.env().account_id();
            let paid = self.env().transferred_value();

            if self.balance_of(vault) < amount {
                return Err(Error::InsufficientTokenSupply);
            }

            let quote = self.resolve_quote()?;
            let unit_price = pricing::sale_price(quote.market_price, self.config.price_floor);
            let cost = pricing::usd_to_native(
                pricing::usd_value(amount, unit_price)?,
                quote.native_rate,
            )?;
            if paid < cost {
                return Err(Error::InsufficientPayment);
            }
            let refund = paid - cost;

            self.transfer_impl(vault, to, amount)?;

            if refund > 0 {
                self.env()
                    .transfer(buyer, refund)
                    .map_err(|_| Error::TransferFailed)?;
            }

            self.env().emit_event(TokensPurchased {
                buyer,
                recipient: to,
                amount,
                unit_price,
                cost,
                refund,
            });
            Ok(())
        }

        fn sell_back_impl(&mut self, amount: Balance) -> Result<Balance, Error> {
            self.assert_not_paused()?;
            if amount == 0 {
                return Err(Error::InvalidParameter);
            }

            let seller = self.env().caller();
            self.assert_unlocked(seller)?;
            if self.balance_of(seller) < amount {
                return Err(Error::InsufficientBalance);
            }

            let quote = self.resolve_quote()?;
            let payout = pricing::usd_to_native(
                pricing::usd_value(amount, self.config.buyback_price)?,
                quote.native_rate,
            )?;
            if self.env().balance() < payout {
                return Err(Error::InsufficientReserveFunds);
            }

            // ── Burn (before the native transfer) ─────────────────────────
            self.debit_balance(seller, amount)?;
            self.total_supply = self.total_supply.saturating_sub(amount);
            self.total_burned = self.total_burned.checked_add(amount).ok_or(Error::Overflow)?;
            self.env().emit_event(Transfer {
                from: Some(seller),
                to: None,
                value: amount,
            });

            self.env()
                .transfer(seller, payout)
                .map_err(|_| Error::TransferFailed)?;

            self.env().emit_event(TokensBoughtBack {
                seller,
                amount,
                payout,
                total_burned: self.total_burned,
            });
            Ok(payout)
        }

        // =====================================================================
        // PRICING
        // =====================================================================

        /// Reserve-implied price in cents per whole token.
        #[ink(message)]
        pub fn get_current_price(&self) -> Result<Balance, Error> {
            pricing::current_price(
                self.total_supply,
                self.config.reserve_ratio,
                self.reserve_quantity,
                self.config.initial_price,
            )
        }

        /// Market price from the configured source, in cents per whole token.
        #[ink(message)]
        pub fn get_market_price(&self) -> Result<Balance, Error> {
            Ok(self.resolve_quote()?.market_price)
        }

        /// Price `buy` would charge right now.
        #[ink(message)]
        pub fn get_sale_price(&self) -> Result<Balance, Error> {
            let market = self.get_market_price()?;
            Ok(pricing::sale_price(market, self.config.price_floor))
        }

        /// Native cost of buying `amount` right now.
        #[ink(message)]
        pub fn quote_buy(&self, amount: Balance) -> Result<Balance, Error> {
            let quote = self.resolve_quote()?;
            let unit_price = pricing::sale_price(quote.market_price, self.config.price_floor);
            pricing::usd_to_native(pricing::usd_value(amount, unit_price)?, quote.native_rate)
        }

        /// Native payout for selling back `amount` right now.
        #[ink(message)]
        pub fn quote_sell_back(&self, amount: Balance) -> Result<Balance, Error> {
            let quote = self.resolve_quote()?;
            pricing::usd_to_native(
                pricing::usd_value(amount, self.config.buyback_price)?,
                quote.native_rate,
            )
        }

        /// Publish a market observation. `PriceFeeder` only.
        #[ink(message)]
        pub fn post_price(&mut self, market_price: Balance, native_rate: Balance) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(Role::PriceFeeder)?;
                if market_price == 0 || native_rate == 0 {
                    return Err(Error::InvalidParameter);
                }
                let now = this.env().block_timestamp();
                this.posted_quote = Some(PriceQuote {
                    market_price,
                    native_rate,
                    updated_at: now,
                });
                this.last_price_update = now;
                this.env().emit_event(PriceQuoted {
                    market_price,
                    native_rate,
                    timestamp: now,
                });
                Ok(())
            })
        }

        /// Point the ledger at a `PriceOracle` contract, or back to posted
        /// quotes with `None`.
        #[ink(message)]
        pub fn set_price_oracle(&mut self, oracle: Option<AccountId>) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(Role::Admin)?;
                if let Some(account) = oracle {
                    Self::ensure_account(account)?;
                }
                this.price_oracle = oracle;
                this.env().emit_event(PriceOracleUpdated { oracle });
                Ok(())
            })
        }

        /// Replace the recorded reserve quantity. `Admin` only.
        #[ink(message)]
        pub fn update_reserve(&mut self, amount: Balance) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(Role::Admin)?;
                let previous = this.reserve_quantity;
                this.reserve_quantity = amount;
                this.env().emit_event(ReserveUpdated {
                    previous,
                    updated: amount,
                });
                Ok(())
            })
        }

        // =====================================================================
        // SUPPLY
        // =====================================================================

        /// Issue `amount` new tokens to `to`. `Minter` only.
        ///
        /// # Errors
        /// - [`Error::ExceedsSupplyCap`] if `total_supply + amount > max_token_supply`.
        /// - [`Error::ReserveInsufficient`] if reserve would not back the new supply.
        #[ink(message)]
        pub fn mint(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.assert_not_paused()?;
                this.ensure_role(Role::Minter)?;
                Self::ensure_account(to)?;
                this.issue(to, amount)
            })
        }

        /// Mint `base_amount + reward_bonus` to `user`, tagged with an opaque
        /// `reference` for provenance. `Minter` only; same limits as `mint`.
        #[ink(message)]
        pub fn reward_chatroom_idea(
            &mut self,
            user: AccountId,
            base_amount: Balance,
            reference: String,
        ) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.assert_not_paused()?;
                this.ensure_role(Role::Minter)?;
                Self::ensure_account(user)?;
                if reference.len() > MAX_REFERENCE_LEN {
                    return Err(Error::InvalidParameter);
                }
                let amount = base_amount
                    .checked_add(this.config.reward_bonus)
                    .ok_or(Error::Overflow)?;

                this.issue(user, amount)?;
                this.env().emit_event(IdeaRewarded {
                    user,
                    amount,
                    reference,
                });
                Ok(())
            })
        }

        /// Single issuance path; every mint goes through the cap and reserve checks.
        fn issue(&mut self, to: AccountId, amount: Balance) -> Result<(), Error> {
            let supply_after = self
                .total_supply
                .checked_add(amount)
                .ok_or(Error::ExceedsSupplyCap)?;
            if supply_after > self.config.max_token_supply {
                return Err(Error::ExceedsSupplyCap);
            }
            if self.config.reserve_backed_minting
                && !pricing::reserve_covers(self.reserve_quantity, supply_after)
            {
                return Err(Error::ReserveInsufficient);
            }

            self.credit_balance(to, amount)?;
            self.total_supply = supply_after;
            self.env().emit_event(Transfer {
                from: None,
                to: Some(to),
                value: amount,
            });
            Ok(())
        }

        // =====================================================================
        // LOCKS
        // =====================================================================

        /// Restrict `account` from transferring for `duration` milliseconds.
        /// `Locker` only.
        ///
        /// Expired entries are pruned first, so only active locks count
        /// towards `max_locks_allowed`.
        ///
        /// # Errors
        /// - [`Error::InvalidAccount`] on a null target.
        /// - [`Error::InvalidDuration`] on zero or above `max_lock_duration`.
        /// - [`Error::TooManyLocks`] if the target is already at `max_locks_allowed`.
        #[ink(message)]
        pub fn lock(&mut self, account: AccountId, duration: Timestamp) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(Role::Locker)?;
                Self::ensure_account(account)?;

                let now = this.env().block_timestamp();
                let lock = Lock::starting_at(now, duration, this.config.max_lock_duration)?;

                let mut entries = this.locks.get(account).unwrap_or_default();
                locks::retain_active(&mut entries, now);
                if entries.len() >= this.config.max_locks_allowed as usize {
                    return Err(Error::TooManyLocks);
                }

                entries.push(lock);
                this.store_locks(account, entries);
                this.env().emit_event(TokensLocked {
                    account,
                    duration,
                    unlock_time: lock.unlock_time,
                });
                Ok(())
            })
        }

        /// Drop `account`'s expired locks, keeping the order of the rest.
        /// Callable by anyone. Returns the number of entries removed.
        #[ink(message)]
        pub fn clean_expired_locks(&mut self, account: AccountId) -> Result<u32, Error> {
            self.non_reentrant(|this| {
                let now = this.env().block_timestamp();
                let mut entries = this.locks.get(account).unwrap_or_default();
                let removed = locks::retain_active(&mut entries, now);
                this.store_locks(account, entries);
                Ok(removed as u32)
            })
        }

        #[ink(message)]
        pub fn is_locked(&self, account: AccountId) -> bool {
            let entries = self.locks.get(account).unwrap_or_default();
            locks::is_locked(&entries, self.env().block_timestamp())
        }

        #[ink(message)]
        pub fn get_locks(&self, account: AccountId) -> Vec<Lock> {
            self.locks.get(account).unwrap_or_default()
        }

        #[ink(message)]
        pub fn lock_count(&self, account: AccountId) -> u32 {
            self.lock_counts.get(account).unwrap_or(0)
        }

        /// Latest unlock time among `account`'s active locks.
        #[ink(message)]
        pub fn unlock_time(&self, account: AccountId) -> Option<Timestamp> {
            let entries = self.locks.get(account).unwrap_or_default();
            locks::latest_unlock(&entries, self.env().block_timestamp())
        }

        fn store_locks(&mut self, account: AccountId, entries: Vec<Lock>) {
            if entries.is_empty() {
                self.locks.remove(account);
                self.lock_counts.remove(account);
            } else {
                self.locks.insert(account, &entries);
                self.lock_counts.insert(account, &(entries.len() as u32));
            }
        }

        // =====================================================================
        // ACCESS CONTROL
        // =====================================================================

        /// Members of `role.admin_role()` only. Granting a held role is a no-op.
        #[ink(message)]
        pub fn grant_role(&mut self, role: Role, account: AccountId) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(role.admin_role())?;
                Self::ensure_account(account)?;
                if !this.has_role(role, account) {
                    this.role_members.insert((role, account), &true);
                    this.env().emit_event(RoleGranted {
                        role,
                        account,
                        sender: this.env().caller(),
                    });
                }
                Ok(())
            })
        }

        /// Members of `role.admin_role()` only. Revoking an absent role is a no-op.
        #[ink(message)]
        pub fn revoke_role(&mut self, role: Role, account: AccountId) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(role.admin_role())?;
                this.remove_role(role, account);
                Ok(())
            })
        }

        /// Drop one of the caller's own roles.
        #[ink(message)]
        pub fn renounce_role(&mut self, role: Role) -> Result<(), Error> {
            self.non_reentrant(|this| {
                let caller = this.env().caller();
                this.remove_role(role, caller);
                Ok(())
            })
        }

        #[ink(message)]
        pub fn has_role(&self, role: Role, account: AccountId) -> bool {
            self.role_members.contains((role, account))
        }

        #[ink(message)]
        pub fn get_role_admin(&self, role: Role) -> Role {
            role.admin_role()
        }

        fn remove_role(&mut self, role: Role, account: AccountId) {
            if self.has_role(role, account) {
                self.role_members.remove((role, account));
                self.env().emit_event(RoleRevoked {
                    role,
                    account,
                    sender: self.env().caller(),
                });
            }
        }

        // =====================================================================
        // CONFIGURATION
        // =====================================================================

        /// Validate and apply one parameter. `Admin` only.
        #[ink(message)]
        pub fn update_config(&mut self, param: ConfigParam, value: u128) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(Role::Admin)?;
                let previous = this.config.set(param, value, this.total_supply)?;
                this.env().emit_event(ConfigUpdated {
                    param,
                    previous,
                    updated: value,
                });
                Ok(())
            })
        }

        #[ink(message)]
        pub fn set_paused(&mut self, paused: bool) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.ensure_role(Role::Admin)?;
                this.paused = paused;
                this.env().emit_event(PausedChanged { paused });
                Ok(())
            })
        }

        // =====================================================================
        // PSP22 Standard Token Interface
        // =====================================================================

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, account: AccountId) -> Balance {
            self.balances.get(account).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or(0)
        }

        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.assert_not_paused()?;
                let from = this.env().caller();
                this.transfer_impl(from, to, value)
            })
        }

        #[ink(message)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<(), Error> {
            self.non_reentrant(|this| {
                Self::ensure_account(spender)?;
                let owner = this.env().caller();
                this.allowances.insert((owner, spender), &value);
                this.env().emit_event(Approval { owner, spender, value });
                Ok(())
            })
        }

        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<(), Error> {
            self.non_reentrant(|this| {
                this.assert_not_paused()?;
                let caller = this.env().caller();
                let current_allowance = this.allowance(from, caller);
                if current_allowance < value {
                    return Err(Error::InsufficientBalance);
                }
                this.transfer_impl(from, to, value)?;
                this.allowances
                    .insert((from, caller), &(current_allowance - value));
                Ok(())
            })
        }

        // =====================================================================
        // VIEW FUNCTIONS
        // =====================================================================

        #[ink(message)]
        pub fn name(&self) -> String {
            TOKEN_NAME.to_string()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            TOKEN_SYMBOL.to_string()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            TOKEN_DECIMALS
        }

        #[ink(message)]
        pub fn total_burned(&self) -> Balance { self.total_burned }

        #[ink(message)]
        pub fn reserve_quantity(&self) -> Balance { self.reserve_quantity }

        #[ink(message)]
        pub fn reserve_ratio(&self) -> u128 { self.config.reserve_ratio }

        #[ink(message)]
        pub fn initial_price(&self) -> Balance { self.config.initial_price }

        #[ink(message)]
        pub fn price_floor(&self) -> Balance { self.config.price_floor }

        #[ink(message)]
        pub fn buyback_price(&self) -> Balance { self.config.buyback_price }

        #[ink(message)]
        pub fn last_price_update(&self) -> Timestamp { self.last_price_update }

        #[ink(message)]
        pub fn price_update_interval(&self) -> Timestamp { self.config.price_update_interval }

        #[ink(message)]
        pub fn price_oracle(&self) -> Option<AccountId> { self.price_oracle }

        #[ink(message)]
        pub fn max_locks_allowed(&self) -> u32 { self.config.max_locks_allowed }

        #[ink(message)]
        pub fn max_lock_duration(&self) -> Timestamp { self.config.max_lock_duration }

        #[ink(message)]
        pub fn max_token_supply(&self) -> Balance { self.config.max_token_supply }

        #[ink(message)]
        pub fn reward_bonus(&self) -> Balance { self.config.reward_bonus }

        #[ink(message)]
        pub fn reserve_backed_minting(&self) -> bool { self.config.reserve_backed_minting }

        #[ink(message)]
        pub fn get_config(&self, param: ConfigParam) -> u128 {
            self.config.get(param)
        }

        /// Native balance available for buybacks.
        #[ink(message)]
        pub fn native_balance(&self) -> Balance {
            self.env().balance()
        }

        #[ink(message)]
        pub fn is_paused(&self) -> bool { self.paused }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        /// Runs `op` holding the instance-wide re-entrancy guard. The guard is
        /// released on every return path of `op`.
        fn non_reentrant<R>(
            &mut self,
            op: impl FnOnce(&mut Self) -> Result<R, Error>,
        ) -> Result<R, Error> {
            self.guard.enter()?;
            let result = op(self);
            self.guard.exit();
            result
        }

        /// Current quote from the oracle if configured, else the posted one,
        /// rejected once older than `price_update_interval`.
        fn resolve_quote(&self) -> Result<PriceQuote, Error> {
            let quote = match self.price_oracle {
                Some(oracle) => oracle::query(oracle)?,
                None => self.posted_quote.ok_or(Error::PriceUnavailable)?,
            };
            quote.validate(self.env().block_timestamp(), self.config.price_update_interval)
        }

        /// Every balance movement between holders goes through here, so the
        /// lock check always precedes the debit.
        fn transfer_impl(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<(), Error> {
            self.assert_unlocked(from)?;
            Self::ensure_account(to)?;
            self.debit_balance(from, value)?;
            self.credit_balance(to, value)?;
            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                value,
            });
            Ok(())
        }

        fn debit_balance(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self.balance_of(account);
            if balance < amount {
                return Err(Error::InsufficientBalance);
            }
            self.balances.insert(account, &(balance - amount));
            Ok(())
        }

        fn credit_balance(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self.balance_of(account);
            let new_balance = balance.checked_add(amount).ok_or(Error::Overflow)?;
            self.balances.insert(account, &new_balance);
            Ok(())
        }

        fn ensure_role(&self, role: Role) -> Result<(), Error> {
            if !self.has_role(role, self.env().caller()) {
                return Err(Error::Unauthorized);
            }
            Ok(())
        }

        fn ensure_account(account: AccountId) -> Result<(), Error> {
            if account == AccountId::from(NULL_ACCOUNT) {
                return Err(Error::InvalidAccount);
            }
            Ok(())
        }

        fn assert_unlocked(&self, account: AccountId) -> Result<(), Error> {
            if self.is_locked(account) {
                return Err(Error::AccountLocked);
            }
            Ok(())
        }

        fn assert_not_paused(&self) -> Result<(), Error> {
            if self.paused {
                return Err(Error::ContractPaused);
            }
            Ok(())
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
