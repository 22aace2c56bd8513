//! Operation outcomes and read-only views returned to callers.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::{pool::PriceCumulative, state::FeeParameters};

/// How a swap's input was divided.
///
/// `protocol_fee = lp_fee + vault_fee` and
/// `net_amount_in + protocol_fee = amount_in`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub protocol_fee: u64,
    pub net_amount_in: u64,
    pub lp_fee: u64,
    pub vault_fee: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub pool: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fees: FeeBreakdown,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    pub pool: Pubkey,
    pub amount_out: u64,
    pub fees: FeeBreakdown,
    pub reserve_in: u64,
    pub reserve_out: u64,
}

/// Amounts are reported in the caller's token order, not the pool's.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct LiquidityOutcome {
    pub pool: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares: u64,
    pub pool_created: bool,
}

/// Canonical token order.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlashSwapOutcome {
    pub pool: Pubkey,
    pub amount_a_in: u64,
    pub amount_b_in: u64,
    pub amount_a_out: u64,
    pub amount_b_out: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SkimOutcome {
    pub pool: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct PoolInfo {
    pub pool: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub total_shares: u64,
    pub price_cumulative_a: PriceCumulative,
    pub price_cumulative_b: PriceCumulative,
    pub last_update_timestamp: i64,
    pub k_last: u128,
    pub pool_paused: bool,
    pub globally_paused: bool,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct PoolPage {
    pub pools: Vec<Pubkey>,
    pub total: u64,
    /// Offset of the next page, `None` on the last page
    pub next_offset: Option<u64>,
}

/// Borsh-encoded result of `Runtime::process_instruction`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum InstructionOutcome {
    PoolCreated { pool: Pubkey },
    Swap(SwapOutcome),
    Liquidity(LiquidityOutcome),
    Skim(SkimOutcome),
    SharesTransferred,
    EmergencyActionApplied { nonce: u64 },
    PoolInfo(PoolInfo),
    Pools(PoolPage),
    FeeParameters(FeeParameters),
    Quote(SwapQuote),
}
