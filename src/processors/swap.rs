//! Swap Processors
//!
//! Exact-input router swaps and flash swaps. The router charges the protocol
//! fee on the input before pricing, so the pool checks the constant product
//! with no further fee. Flash swaps have no router-side pricing; the pool
//! charges the protocol fee on the repaid input inside its K check.

use solana_program::{msg, pubkey::Pubkey};

use crate::{
    error::AmmError,
    interfaces::FlashSwapCallee,
    math::get_amount_out,
    pool::{FlashCallback, SwapArgs},
    runtime::FactoryContext,
    state::ProgramAccounts,
    types::{AmmEvent, FlashSwapOutcome, FlashSwapParams, SwapOutcome, SwapParams},
    utils::{
        compliance::require_parties_compliant,
        fee_validation::compute_fee_breakdown,
        token_transfers::transfer_from_exact,
        system_pause_compliance::{ensure_not_globally_paused, ensure_not_paused, GatedOperation},
        validation::{check_deadline, check_nonzero, check_recipient, validate_token_pair},
    },
};

/// Processes an exact-input swap through the pool for `token_in`/`token_out`.
///
/// # How It Works
/// 1. **Global Pause**: checked before the pair is even looked at
/// 2. **Pool Lookup**: the pair must have a pool, which must not be paused
/// 3. **Deadline**: `now > deadline` fails
/// 4. **Compliance**: caller for both tokens, recipient for `token_out`
/// 5. **Fee Split**: protocol fee off the input, split LP / vault
/// 6. **Pricing**: `amount_out = reserve_out * net_in / (reserve_in + net_in)`
/// 7. **Slippage**: `amount_out >= min_amount_out`
/// 8. **Transfers**: `net_in + lp_fee` to the pool, `vault_fee` to the fee vault (measured)
/// 9. **Pool Swap**: the pool pays out and checks K
///
/// # Arguments
/// * `caller` - Swapper; pays the input through an allowance granted to the program
/// * `params` - Tokens, amounts, recipient and deadline
pub fn process_swap(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    caller: &Pubkey,
    params: &SwapParams,
) -> Result<SwapOutcome, AmmError> {
    msg!(
        "Processing Swap: {} {} -> {}",
        params.amount_in,
        params.token_in,
        params.token_out
    );

    ensure_not_globally_paused(&accounts.factory, GatedOperation::Swap)?;
    validate_token_pair(&params.token_in, &params.token_out)?;
    let pool_id = accounts.pool_id_for_pair(&params.token_in, &params.token_out)?;

    ensure_not_paused(&accounts.factory, &pool_id, GatedOperation::Swap)?;
    check_deadline(params.deadline, ctx.now())?;
    check_nonzero(params.amount_in, "swap input")?;
    check_recipient(&params.recipient)?;

    require_parties_compliant(
        ctx.oracle,
        caller,
        &[&params.token_in, &params.token_out],
        &params.recipient,
        &[&params.token_out],
    )?;

    let fees = compute_fee_breakdown(params.amount_in, &accounts.factory.fees)?;
    let fee_vault = accounts.factory.fees.fee_vault;

    let pool = accounts.pool_mut(&pool_id)?;
    let a_to_b = params.token_in == *pool.token_a();
    let (reserve_a, reserve_b) = pool.reserves();
    let (reserve_in, reserve_out) = if a_to_b {
        (reserve_a, reserve_b)
    } else {
        (reserve_b, reserve_a)
    };

    let amount_out = get_amount_out(fees.net_amount_in, reserve_in, reserve_out)?;
    if amount_out < params.min_amount_out {
        msg!(
            "❌ Slippage: output {} below minimum {}",
            amount_out,
            params.min_amount_out
        );
        return Err(AmmError::SlippageExceeded {
            token: params.token_out,
            minimum: params.min_amount_out,
            actual: amount_out,
        });
    }
    if amount_out == 0 {
        return Err(AmmError::InsufficientOutputAmount);
    }

    let to_pool = fees
        .net_amount_in
        .checked_add(fees.lp_fee)
        .ok_or(AmmError::ArithmeticOverflow)?;
    transfer_from_exact(
        ctx.invoke.ledger,
        &params.token_in,
        &ctx.program_id,
        caller,
        pool.address(),
        to_pool,
    )?;
    transfer_from_exact(
        ctx.invoke.ledger,
        &params.token_in,
        &ctx.program_id,
        caller,
        &fee_vault,
        fees.vault_fee,
    )?;

    let (amount_a_out, amount_b_out) = if a_to_b {
        (0, amount_out)
    } else {
        (amount_out, 0)
    };
    pool.swap(
        &ctx.program_id,
        SwapArgs {
            amount_a_out,
            amount_b_out,
            recipient: params.recipient,
            fee_bps: 0,
        },
        None,
        &mut ctx.invoke,
    )?;

    msg!(
        "✅ SWAP COMPLETE: {} in, {} out, fee {} (LP {}, vault {})",
        params.amount_in,
        amount_out,
        fees.protocol_fee,
        fees.lp_fee,
        fees.vault_fee
    );
    ctx.invoke.events.emit(AmmEvent::Swap {
        pool: pool_id,
        caller: *caller,
        recipient: params.recipient,
        token_in: params.token_in,
        token_out: params.token_out,
        amount_in: params.amount_in,
        amount_out,
        fees,
    });

    Ok(SwapOutcome {
        pool: pool_id,
        amount_in: params.amount_in,
        amount_out,
        fees,
    })
}

/// Processes a flash swap: the pool pays out first, then `callee` runs
/// and must repay enough for the fee-adjusted K check. The callee may only
/// debit `caller`.
pub fn process_flash_swap(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    caller: &Pubkey,
    params: &FlashSwapParams,
    callee: &mut dyn FlashSwapCallee,
) -> Result<FlashSwapOutcome, AmmError> {
    msg!("Processing FlashSwap on pool {}", params.pool);

    ensure_not_globally_paused(&accounts.factory, GatedOperation::FlashSwap)?;
    let fee_bps = accounts.factory.fees.protocol_fee_bps;
    let (token_a, token_b) = {
        let pool = accounts.pool(&params.pool)?;
        (*pool.token_a(), *pool.token_b())
    };

    ensure_not_paused(&accounts.factory, &params.pool, GatedOperation::FlashSwap)?;
    check_deadline(params.deadline, ctx.now())?;
    check_recipient(&params.recipient)?;

    let mut received: Vec<&Pubkey> = Vec::with_capacity(2);
    if params.amount_a_out > 0 {
        received.push(&token_a);
    }
    if params.amount_b_out > 0 {
        received.push(&token_b);
    }
    require_parties_compliant(
        ctx.oracle,
        caller,
        &[&token_a, &token_b],
        &params.recipient,
        &received,
    )?;

    let pool = accounts.pool_mut(&params.pool)?;
    let (amount_a_in, amount_b_in) = pool.swap(
        &ctx.program_id,
        SwapArgs {
            amount_a_out: params.amount_a_out,
            amount_b_out: params.amount_b_out,
            recipient: params.recipient,
            fee_bps,
        },
        Some(FlashCallback {
            callee,
            borrower: *caller,
            data: &params.data,
        }),
        &mut ctx.invoke,
    )?;

    ctx.invoke.events.emit(AmmEvent::FlashSwap {
        pool: params.pool,
        caller: *caller,
        recipient: params.recipient,
        amount_a_out: params.amount_a_out,
        amount_b_out: params.amount_b_out,
        amount_a_in,
        amount_b_in,
        fee_bps,
    });
    Ok(FlashSwapOutcome {
        pool: params.pool,
        amount_a_in,
        amount_b_in,
        amount_a_out: params.amount_a_out,
        amount_b_out: params.amount_b_out,
    })
}
