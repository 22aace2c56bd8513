/*
MIT License

Copyright (c) 2024 Davinci

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! # Test Token Ledgers
//!
//! `TestLedger` lets the harness fund and approve users on any ledger the
//! runtime can be built over. `FeeOnTransferLedger` models a token that
//! delivers less than the requested amount.

use std::collections::BTreeSet;

use constant_product_trading::{FungibleLedger, LedgerError, TokenLedger};
use solana_program::pubkey::Pubkey;

/// Ledger operations the harness needs outside the program.
pub trait TestLedger: FungibleLedger + Clone + Default {
    fn register_token(&mut self, token: Pubkey);

    fn fund(&mut self, token: &Pubkey, holder: &Pubkey, amount: u64);

    fn approve_spender(&mut self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey, amount: u64);
}

impl TestLedger for TokenLedger {
    fn register_token(&mut self, token: Pubkey) {
        self.create_token(token);
    }

    fn fund(&mut self, token: &Pubkey, holder: &Pubkey, amount: u64) {
        self.mint_to(token, holder, amount).unwrap();
    }

    fn approve_spender(&mut self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey, amount: u64) {
        self.approve(token, owner, spender, amount).unwrap();
    }
}

/// Burns `FEE_ON_TRANSFER_BPS` of every transfer of a taxed token.
#[derive(Debug, Clone, Default)]
pub struct FeeOnTransferLedger {
    inner: TokenLedger,
    taxed: BTreeSet<Pubkey>,
}

pub const FEE_ON_TRANSFER_BPS: u64 = 100;

impl FeeOnTransferLedger {
    pub fn tax(&mut self, token: Pubkey) {
        self.taxed.insert(token);
    }

    fn burn_tax(&mut self, token: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        if !self.taxed.contains(token) {
            return Ok(());
        }
        let tax = amount * FEE_ON_TRANSFER_BPS / 10_000;
        let sink = Pubkey::default();
        self.inner.transfer(token, to, &sink, tax)
    }
}

impl FungibleLedger for FeeOnTransferLedger {
    fn balance_of(&self, token: &Pubkey, holder: &Pubkey) -> u64 {
        self.inner.balance_of(token, holder)
    }

    fn transfer(
        &mut self,
        token: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.inner.transfer(token, from, to, amount)?;
        self.burn_tax(token, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: &Pubkey,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.inner.transfer_from(token, spender, from, to, amount)?;
        self.burn_tax(token, to, amount)
    }
}

impl TestLedger for FeeOnTransferLedger {
    fn register_token(&mut self, token: Pubkey) {
        self.inner.create_token(token);
    }

    fn fund(&mut self, token: &Pubkey, holder: &Pubkey, amount: u64) {
        self.inner.mint_to(token, holder, amount).unwrap();
    }

    fn approve_spender(&mut self, token: &Pubkey, owner: &Pubkey, spender: &Pubkey, amount: u64) {
        self.inner.approve(token, owner, spender, amount).unwrap();
    }
}
