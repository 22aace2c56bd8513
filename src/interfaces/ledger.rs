//! Fungible token ledger
//!
//! `FungibleLedger` is the single token-dispatch capability used by the
//! factory and the pools. Implementations are expected to move exactly the
//! requested amount; callers still measure every balance change (see
//! `utils::token_transfers`) and reject tokens that do not.

use std::collections::{BTreeMap, BTreeSet};

use solana_program::pubkey::Pubkey;

use crate::error::LedgerError;

pub trait FungibleLedger {
    fn balance_of(&self, token: &Pubkey, holder: &Pubkey) -> u64;

    fn transfer(
        &mut self,
        token: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` out of `from` using an allowance previously granted to `spender`.
    fn transfer_from(
        &mut self,
        token: &Pubkey,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError>;
}

/// In-memory ledger with exact transfer semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    tokens: BTreeSet<Pubkey>,
    balances: BTreeMap<(Pubkey, Pubkey), u64>,
    allowances: BTreeMap<(Pubkey, Pubkey, Pubkey), u64>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token. Registering twice is a no-op.
    pub fn create_token(&mut self, token: Pubkey) {
        self.tokens.insert(token);
    }

    pub fn is_token(&self, token: &Pubkey) -> bool {
        self.tokens.contains(token)
    }

    pub fn mint_to(&mut self, token: &Pubkey, holder: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        self.ensure_token(token)?;
        self.credit(token, holder, amount)
    }

    /// Sets (not increments) the allowance of `spender` over `owner`'s balance.
    pub fn approve(
        &mut self,
        token: &Pubkey,
        owner: &Pubkey,
        spender: &Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.ensure_token(token)?;
        self.allowances.insert((*token, *owner, *spender), amount);
        Ok(())
    }

    pub fn allowance(&self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.allowances
            .get(&(*token, *owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn ensure_token(&self, token: &Pubkey) -> Result<(), LedgerError> {
        if self.tokens.contains(token) {
            Ok(())
        } else {
            Err(LedgerError::UnknownToken { token: *token })
        }
    }

    fn debit(&mut self, token: &Pubkey, holder: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let available = self.balance_of(token, holder);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                holder: *holder,
                required: amount,
                available,
            })?;
        self.balances.insert((*token, *holder), remaining);
        Ok(())
    }

    fn credit(&mut self, token: &Pubkey, holder: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let updated = self
            .balance_of(token, holder)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { holder: *holder })?;
        self.balances.insert((*token, *holder), updated);
        Ok(())
    }
}

impl FungibleLedger for TokenLedger {
    fn balance_of(&self, token: &Pubkey, holder: &Pubkey) -> u64 {
        self.balances.get(&(*token, *holder)).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        token: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.ensure_token(token)?;
        self.debit(token, from, amount)?;
        self.credit(token, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: &Pubkey,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.ensure_token(token)?;
        let approved = self.allowance(token, from, spender);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: *from,
                spender: *spender,
                required: amount,
                approved,
            });
        }
        self.debit(token, from, amount)?;
        self.credit(token, to, amount)?;
        self.allowances
            .insert((*token, *from, *spender), approved - amount);
        Ok(())
    }
}
