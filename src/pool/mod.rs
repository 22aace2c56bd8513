//! Pool
//!
//! One `PoolState` per unordered token pair. Fields are private: the only way
//! to change a pool is through the entry points in [`processor`], and every
//! mutating entry point requires the caller to be the pool's factory and
//! holds the pool lock for its whole duration.

pub mod accumulator;
pub mod processor;
pub mod shares;

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

use crate::error::AmmError;

pub use accumulator::PriceCumulative;
pub use processor::{FlashCallback, SwapArgs};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    address: Pubkey,
    bump: u8,
    factory: Pubkey,
    initialized: bool,

    // Canonical order: token_a < token_b
    token_a: Pubkey,
    token_b: Pubkey,

    reserve_a: u64,
    reserve_b: u64,

    total_shares: u64,
    share_balances: BTreeMap<Pubkey, u64>,

    price_cumulative_a: PriceCumulative,
    price_cumulative_b: PriceCumulative,
    last_update_timestamp: i64,

    /// reserve_a * reserve_b after the last mint/burn, 0 while the growth fee is off
    k_last: u128,

    locked: bool,
}

impl PoolState {
    /// A fresh, uninitialized pool living at `address` and owned by `factory`.
    pub fn new(address: Pubkey, bump: u8, factory: Pubkey) -> Self {
        Self {
            address,
            bump,
            factory,
            initialized: false,
            token_a: Pubkey::default(),
            token_b: Pubkey::default(),
            reserve_a: 0,
            reserve_b: 0,
            total_shares: 0,
            share_balances: BTreeMap::new(),
            price_cumulative_a: PriceCumulative::default(),
            price_cumulative_b: PriceCumulative::default(),
            last_update_timestamp: 0,
            k_last: 0,
            locked: false,
        }
    }

    pub fn address(&self) -> &Pubkey {
        &self.address
    }

    pub fn bump(&self) -> u8 {
        self.bump
    }

    pub fn factory(&self) -> &Pubkey {
        &self.factory
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn token_a(&self) -> &Pubkey {
        &self.token_a
    }

    pub fn token_b(&self) -> &Pubkey {
        &self.token_b
    }

    pub fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    pub fn share_balance_of(&self, holder: &Pubkey) -> u64 {
        self.share_balances.get(holder).copied().unwrap_or(0)
    }

    /// Every holder with a non-zero balance, including the locked null holder.
    pub fn share_holders(&self) -> impl Iterator<Item = (&Pubkey, &u64)> {
        self.share_balances.iter().filter(|(_, balance)| **balance > 0)
    }

    pub fn price_cumulative_a(&self) -> PriceCumulative {
        self.price_cumulative_a
    }

    pub fn price_cumulative_b(&self) -> PriceCumulative {
        self.price_cumulative_b
    }

    pub fn last_update_timestamp(&self) -> i64 {
        self.last_update_timestamp
    }

    pub fn k_last(&self) -> u128 {
        self.k_last
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn contains_token(&self, token: &Pubkey) -> bool {
        *token == self.token_a || *token == self.token_b
    }

    fn ensure_factory(&self, caller: &Pubkey) -> Result<(), AmmError> {
        if *caller != self.factory {
            msg!("❌ Pool {}: caller {} is not the factory", self.address, caller);
            return Err(AmmError::NotFactory { caller: *caller });
        }
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), AmmError> {
        if !self.initialized {
            return Err(AmmError::NotInitialized);
        }
        Ok(())
    }

    /// Outbound payouts may not go to the pool itself, either pool token or
    /// the null identity.
    fn ensure_valid_recipient(&self, recipient: &Pubkey) -> Result<(), AmmError> {
        if *recipient == self.address
            || self.contains_token(recipient)
            || *recipient == Pubkey::default()
        {
            return Err(AmmError::InvalidRecipient {
                recipient: *recipient,
            });
        }
        Ok(())
    }

    /// Runs `operation` with the pool lock held.
    ///
    /// The lock is released whether or not the operation succeeds; a failed
    /// operation is rolled back by the host anyway.
    fn with_lock<T>(
        &mut self,
        operation: impl FnOnce(&mut Self) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        if self.locked {
            msg!("❌ Pool {} is locked", self.address);
            return Err(AmmError::Locked);
        }
        self.locked = true;
        let result = operation(self);
        self.locked = false;
        result
    }

    /// Factory check, initialization check and lock, in that order.
    fn factory_entry<T>(
        &mut self,
        caller: &Pubkey,
        operation: impl FnOnce(&mut Self) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        self.ensure_factory(caller)?;
        self.ensure_initialized()?;
        self.with_lock(operation)
    }
}
