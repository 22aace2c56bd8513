//! View Processors
//!
//! Read-only queries. None of these are pause-gated and none touch the
//! ledger or the oracle.

use solana_program::pubkey::Pubkey;

use crate::{
    constants::MAX_POOLS_PER_PAGE,
    error::AmmError,
    math::get_amount_out,
    state::{FactoryState, ProgramAccounts},
    types::{PauseTarget, PoolInfo, PoolPage, SwapQuote},
    utils::{
        fee_validation::compute_fee_breakdown,
        system_pause_compliance::is_paused,
        validation::{check_nonzero, validate_token_pair},
    },
};

pub fn pool_info(accounts: &ProgramAccounts, pool_id: &Pubkey) -> Result<PoolInfo, AmmError> {
    let pool = accounts.pool(pool_id)?;
    let (reserve_a, reserve_b) = pool.reserves();
    Ok(PoolInfo {
        pool: *pool_id,
        token_a: *pool.token_a(),
        token_b: *pool.token_b(),
        reserve_a,
        reserve_b,
        total_shares: pool.total_shares(),
        price_cumulative_a: pool.price_cumulative_a(),
        price_cumulative_b: pool.price_cumulative_b(),
        last_update_timestamp: pool.last_update_timestamp(),
        k_last: pool.k_last(),
        pool_paused: is_paused(&accounts.factory, &PauseTarget::Pool(*pool_id)),
        globally_paused: accounts.factory.global_paused,
    })
}

/// One page of pools in creation order. `limit` is clamped to
/// `MAX_POOLS_PER_PAGE`; a zero limit is rejected.
pub fn pools_page(factory: &FactoryState, offset: u64, limit: u16) -> Result<PoolPage, AmmError> {
    check_nonzero(limit as u64, "page limit")?;
    let limit = limit.min(MAX_POOLS_PER_PAGE) as usize;
    let total = factory.pool_list.len() as u64;

    let pools: Vec<Pubkey> = match usize::try_from(offset) {
        Ok(start) => factory.pool_list.iter().skip(start).take(limit).copied().collect(),
        Err(_) => Vec::new(),
    };
    let end = offset.saturating_add(pools.len() as u64);
    let next_offset = if end < total { Some(end) } else { None };

    Ok(PoolPage {
        pools,
        total,
        next_offset,
    })
}

/// Output and fee breakdown for a prospective exact-input swap at current
/// reserves and fee parameters.
pub fn quote_swap(
    accounts: &ProgramAccounts,
    token_in: &Pubkey,
    token_out: &Pubkey,
    amount_in: u64,
) -> Result<SwapQuote, AmmError> {
    validate_token_pair(token_in, token_out)?;
    check_nonzero(amount_in, "swap input")?;
    let pool_id = accounts.pool_id_for_pair(token_in, token_out)?;
    let pool = accounts.pool(&pool_id)?;

    let (reserve_a, reserve_b) = pool.reserves();
    let (reserve_in, reserve_out) = if token_in == pool.token_a() {
        (reserve_a, reserve_b)
    } else {
        (reserve_b, reserve_a)
    };

    let fees = compute_fee_breakdown(amount_in, &accounts.factory.fees)?;
    let amount_out = get_amount_out(fees.net_amount_in, reserve_in, reserve_out)?;

    Ok(SwapQuote {
        pool: pool_id,
        amount_out,
        fees,
        reserve_in,
        reserve_out,
    })
}
