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

//! # Pool Helpers
//!
//! Parameter builders for the router operations, a standard seeded pool and
//! flash-swap borrowers.

use constant_product_trading::{
    types::{
        AddLiquidityParams, FlashSwapParams, LiquidityOutcome, RemoveLiquidityParams, SwapParams,
    },
    FlashLedger, FlashSwapCallee, FlashSwapRequest,
};
use solana_program::pubkey::Pubkey;

use crate::common::{
    setup::{TestEnvironment, FAR_DEADLINE},
    tokens::TestLedger,
};

pub const SEED_AMOUNT_A: u64 = 10_000;
pub const SEED_AMOUNT_B: u64 = 40_000;

pub fn swap_params(
    token_in: &Pubkey,
    token_out: &Pubkey,
    amount_in: u64,
    min_amount_out: u64,
    recipient: &Pubkey,
) -> SwapParams {
    SwapParams {
        token_in: *token_in,
        token_out: *token_out,
        amount_in,
        min_amount_out,
        recipient: *recipient,
        deadline: FAR_DEADLINE,
    }
}

pub fn add_liquidity_params(
    token_a: &Pubkey,
    token_b: &Pubkey,
    amount_a: u64,
    amount_b: u64,
    recipient: &Pubkey,
) -> AddLiquidityParams {
    AddLiquidityParams {
        token_a: *token_a,
        token_b: *token_b,
        amount_a_desired: amount_a,
        amount_b_desired: amount_b,
        amount_a_min: 0,
        amount_b_min: 0,
        recipient: *recipient,
        deadline: FAR_DEADLINE,
    }
}

pub fn remove_liquidity_params(
    token_a: &Pubkey,
    token_b: &Pubkey,
    shares: u64,
    recipient: &Pubkey,
) -> RemoveLiquidityParams {
    RemoveLiquidityParams {
        token_a: *token_a,
        token_b: *token_b,
        shares,
        amount_a_min: 0,
        amount_b_min: 0,
        recipient: *recipient,
        deadline: FAR_DEADLINE,
    }
}

/// Flash swap with a three-byte callback payload.
pub fn flash_swap_params(
    pool: &Pubkey,
    amount_a_out: u64,
    amount_b_out: u64,
    recipient: &Pubkey,
) -> FlashSwapParams {
    FlashSwapParams {
        pool: *pool,
        amount_a_out,
        amount_b_out,
        recipient: *recipient,
        data: vec![1, 2, 3],
        deadline: FAR_DEADLINE,
    }
}

impl<L: TestLedger> TestEnvironment<L> {
    /// Deployer deposits `amount_a`/`amount_b`, creating the pool on demand.
    pub fn seed_pool_with(&mut self, amount_a: u64, amount_b: u64) -> LiquidityOutcome {
        let params = add_liquidity_params(
            &self.token_a,
            &self.token_b,
            amount_a,
            amount_b,
            &self.deployer,
        );
        let deployer = self.deployer;
        self.runtime.add_liquidity(&deployer, &params).unwrap()
    }

    /// The 10,000 A / 40,000 B pool most tests start from.
    pub fn seed_pool(&mut self) -> Pubkey {
        self.seed_pool_with(SEED_AMOUNT_A, SEED_AMOUNT_B).pool
    }
}

/// Flash borrower that returns `repay` of `repay_token` from its own
/// balance to the pool.
pub struct RepayingBorrower {
    pub repay_token: Pubkey,
    pub repay: u64,
    pub calls: usize,
    pub last_request: Option<FlashSwapRequest>,
}

impl RepayingBorrower {
    pub fn new(repay_token: Pubkey, repay: u64) -> Self {
        Self {
            repay_token,
            repay,
            calls: 0,
            last_request: None,
        }
    }
}

impl FlashSwapCallee for RepayingBorrower {
    fn on_flash_swap(
        &mut self,
        ledger: &mut FlashLedger<'_>,
        request: &FlashSwapRequest,
        _data: &[u8],
    ) -> Result<(), String> {
        self.calls += 1;
        self.last_request = Some(request.clone());
        ledger
            .transfer(&self.repay_token, &request.borrower, &request.pool, self.repay)
            .map_err(|err| err.to_string())
    }
}

/// Flash borrower that refuses to repay.
pub struct FailingBorrower;

impl FlashSwapCallee for FailingBorrower {
    fn on_flash_swap(
        &mut self,
        _ledger: &mut FlashLedger<'_>,
        _request: &FlashSwapRequest,
        data: &[u8],
    ) -> Result<(), String> {
        Err(format!("borrower rejected {} byte payload", data.len()))
    }
}

/// Flash borrower that tries to repay out of someone else's balance.
pub struct DebitingBorrower {
    pub token: Pubkey,
    pub from: Pubkey,
    pub amount: u64,
}

impl FlashSwapCallee for DebitingBorrower {
    fn on_flash_swap(
        &mut self,
        ledger: &mut FlashLedger<'_>,
        request: &FlashSwapRequest,
        _data: &[u8],
    ) -> Result<(), String> {
        // Swallows the refusal and reports success
        let _ = ledger.transfer(&self.token, &self.from, &request.pool, self.amount);
        Ok(())
    }
}
