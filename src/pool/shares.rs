//! Share ledger and the optional growth fee
//!
//! `sum(share_balances) == total_shares` holds after every helper here.

use solana_program::{msg, pubkey::Pubkey};

use crate::{
    constants::GROWTH_FEE_DIVISOR,
    error::AmmError,
    math::integer_sqrt,
    pool::PoolState,
    types::{AmmEvent, EventLog},
};

impl PoolState {
    pub(crate) fn mint_shares(&mut self, holder: &Pubkey, amount: u64) -> Result<(), AmmError> {
        let total = self
            .total_shares
            .checked_add(amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let balance = self.share_balances.entry(*holder).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        self.total_shares = total;
        Ok(())
    }

    pub(crate) fn burn_shares(&mut self, holder: &Pubkey, amount: u64) -> Result<(), AmmError> {
        self.debit_shares(holder, amount)?;
        self.total_shares = self
            .total_shares
            .checked_sub(amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        Ok(())
    }

    pub(crate) fn move_shares(
        &mut self,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<(), AmmError> {
        // The minimum-liquidity lock is permanent
        if *from == Pubkey::default() {
            return Err(AmmError::InsufficientShares {
                holder: *from,
                required: amount,
                available: 0,
            });
        }
        self.debit_shares(from, amount)?;
        let balance = self.share_balances.entry(*to).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(AmmError::ArithmeticOverflow)?;
        Ok(())
    }

    fn debit_shares(&mut self, holder: &Pubkey, amount: u64) -> Result<(), AmmError> {
        let available = self.share_balance_of(holder);
        if available < amount {
            return Err(AmmError::InsufficientShares {
                holder: *holder,
                required: amount,
                available,
            });
        }
        if available == amount {
            self.share_balances.remove(holder);
        } else {
            self.share_balances.insert(*holder, available - amount);
        }
        Ok(())
    }

    /// Mints 1/(GROWTH_FEE_DIVISOR + 1) of the growth in sqrt(k) since the
    /// last mint/burn to `growth_fee_to`. Returns whether the fee is on.
    ///
    /// Runs on recorded reserves only, never inside the swap path.
    pub(crate) fn mint_growth_fee(
        &mut self,
        growth_fee_to: Option<&Pubkey>,
        events: &mut EventLog,
    ) -> Result<bool, AmmError> {
        let Some(recipient) = growth_fee_to else {
            if self.k_last != 0 {
                self.k_last = 0;
            }
            return Ok(false);
        };

        if self.k_last != 0 {
            let root_k = integer_sqrt(self.reserve_a as u128 * self.reserve_b as u128);
            let root_k_last = integer_sqrt(self.k_last);
            if root_k > root_k_last {
                let numerator = (self.total_shares as u128)
                    .checked_mul(root_k - root_k_last)
                    .ok_or(AmmError::ArithmeticOverflow)?;
                let denominator = root_k
                    .checked_mul(GROWTH_FEE_DIVISOR)
                    .and_then(|scaled| scaled.checked_add(root_k_last))
                    .ok_or(AmmError::ArithmeticOverflow)?;
                let liquidity = u64::try_from(numerator / denominator)
                    .map_err(|_| AmmError::ArithmeticOverflow)?;
                if liquidity > 0 {
                    self.mint_shares(recipient, liquidity)?;
                    msg!("💰 Growth fee: {} shares to {}", liquidity, recipient);
                    events.emit(AmmEvent::GrowthFeeMinted {
                        pool: self.address,
                        recipient: *recipient,
                        shares: liquidity,
                    });
                }
            }
        }
        Ok(true)
    }
}
