//! Liquidity Processors
//!
//! Deposits and withdrawals through the factory. Callers name the pair in
//! any order; amounts and minimums are mapped onto the pool's canonical
//! order before any math and mapped back for the outcome.

use solana_program::{msg, pubkey::Pubkey};

use crate::{
    error::AmmError,
    math::quote,
    processors::pool_creation::create_registered_pool,
    runtime::FactoryContext,
    state::ProgramAccounts,
    types::{AddLiquidityParams, AmmEvent, LiquidityOutcome, RemoveLiquidityParams},
    utils::{
        compliance::require_parties_compliant,
        token_transfers::transfer_from_exact,
        system_pause_compliance::{ensure_not_globally_paused, ensure_not_paused, GatedOperation},
        validation::{check_deadline, check_nonzero, check_recipient, validate_token_pair},
    },
};

/// Picks the deposit that preserves the current reserve ratio.
///
/// Empty pools take the desired amounts as-is. Otherwise the side that
/// limits the deposit is used in full and the other side is quoted from it;
/// a quoted side below its minimum fails with `SlippageExceeded`.
///
/// All amounts are canonical (pool token order).
pub fn optimal_deposit(
    reserves: (u64, u64),
    desired: (u64, u64),
    minimums: (u64, u64),
    tokens: (&Pubkey, &Pubkey),
) -> Result<(u64, u64), AmmError> {
    let (reserve_a, reserve_b) = reserves;
    let (desired_a, desired_b) = desired;
    let (min_a, min_b) = minimums;

    if reserve_a == 0 && reserve_b == 0 {
        return Ok((desired_a, desired_b));
    }

    let optimal_b = quote(desired_a, reserve_a, reserve_b)?;
    if optimal_b <= desired_b {
        if optimal_b < min_b {
            return Err(AmmError::SlippageExceeded {
                token: *tokens.1,
                minimum: min_b,
                actual: optimal_b,
            });
        }
        return Ok((desired_a, optimal_b));
    }

    let optimal_a = quote(desired_b, reserve_b, reserve_a)?;
    if optimal_a > desired_a || optimal_a < min_a {
        return Err(AmmError::SlippageExceeded {
            token: *tokens.0,
            minimum: min_a,
            actual: optimal_a,
        });
    }
    Ok((optimal_a, desired_b))
}

/// Processes a deposit of both pool tokens.
///
/// # How It Works
/// 1. **Global Pause**: checked before the pair is even looked at
/// 2. **Pool Lookup**: creates the pool on demand when the caller may create pools,
///    then checks the pool's own pause
/// 3. **Deadline / Inputs**: non-zero amounts, non-null recipient
/// 4. **Compliance**: caller for both tokens, recipient for both tokens
/// 5. **Ratio**: caller amounts reordered to canonical order, then the
///    optimal ratio-preserving pair is computed
/// 6. **Transfers**: both amounts from the caller to the pool (measured)
/// 7. **Mint**: the pool credits shares to the recipient
pub fn process_add_liquidity(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    caller: &Pubkey,
    params: &AddLiquidityParams,
) -> Result<LiquidityOutcome, AmmError> {
    msg!(
        "Processing AddLiquidity: {} {} + {} {}",
        params.amount_a_desired,
        params.token_a,
        params.amount_b_desired,
        params.token_b
    );

    ensure_not_globally_paused(&accounts.factory, GatedOperation::AddLiquidity)?;
    validate_token_pair(&params.token_a, &params.token_b)?;

    let (pool_id, pool_created) = match accounts
        .factory
        .pool_for_pair(&params.token_a, &params.token_b)
    {
        Some(pool_id) => (pool_id, false),
        None if accounts.factory.is_allowed_creator(caller) => {
            msg!("Pool does not exist yet, creating it for allowed creator {}", caller);
            let pool_id =
                create_registered_pool(accounts, ctx, caller, &params.token_a, &params.token_b)?;
            (pool_id, true)
        }
        None => {
            return Err(AmmError::PairNotFound {
                token_a: params.token_a,
                token_b: params.token_b,
            })
        }
    };

    ensure_not_paused(&accounts.factory, &pool_id, GatedOperation::AddLiquidity)?;
    check_deadline(params.deadline, ctx.now())?;
    check_nonzero(params.amount_a_desired, "desired amount A")?;
    check_nonzero(params.amount_b_desired, "desired amount B")?;
    check_recipient(&params.recipient)?;

    require_parties_compliant(
        ctx.oracle,
        caller,
        &[&params.token_a, &params.token_b],
        &params.recipient,
        &[&params.token_a, &params.token_b],
    )?;

    let growth_fee_to = accounts.factory.growth_fee_recipient;
    let pool = accounts.pool_mut(&pool_id)?;
    let token_a = *pool.token_a();
    let token_b = *pool.token_b();
    let caller_order_matches = params.token_a == token_a;

    let (desired, minimums) = if caller_order_matches {
        (
            (params.amount_a_desired, params.amount_b_desired),
            (params.amount_a_min, params.amount_b_min),
        )
    } else {
        (
            (params.amount_b_desired, params.amount_a_desired),
            (params.amount_b_min, params.amount_a_min),
        )
    };

    let (amount_a, amount_b) =
        optimal_deposit(pool.reserves(), desired, minimums, (&token_a, &token_b))?;

    transfer_from_exact(
        ctx.invoke.ledger,
        &token_a,
        &ctx.program_id,
        caller,
        pool.address(),
        amount_a,
    )?;
    transfer_from_exact(
        ctx.invoke.ledger,
        &token_b,
        &ctx.program_id,
        caller,
        pool.address(),
        amount_b,
    )?;

    let shares = pool.mint(
        &ctx.program_id,
        &params.recipient,
        growth_fee_to.as_ref(),
        &mut ctx.invoke,
    )?;

    let (caller_amount_a, caller_amount_b) = if caller_order_matches {
        (amount_a, amount_b)
    } else {
        (amount_b, amount_a)
    };
    msg!(
        "✅ LIQUIDITY ADDED: ({}, {}) for {} shares",
        caller_amount_a,
        caller_amount_b,
        shares
    );
    ctx.invoke.events.emit(AmmEvent::LiquidityAdded {
        pool: pool_id,
        caller: *caller,
        recipient: params.recipient,
        token_a: params.token_a,
        token_b: params.token_b,
        amount_a: caller_amount_a,
        amount_b: caller_amount_b,
        shares,
    });
    Ok(LiquidityOutcome {
        pool: pool_id,
        amount_a: caller_amount_a,
        amount_b: caller_amount_b,
        shares,
        pool_created,
    })
}

/// Processes a withdrawal: the caller's shares move into the pool's own
/// balance, then the pool burns them.
///
/// Pause-gated like every other balance-affecting operation.
pub fn process_remove_liquidity(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    caller: &Pubkey,
    params: &RemoveLiquidityParams,
) -> Result<LiquidityOutcome, AmmError> {
    msg!("Processing RemoveLiquidity: {} shares", params.shares);

    ensure_not_globally_paused(&accounts.factory, GatedOperation::RemoveLiquidity)?;
    validate_token_pair(&params.token_a, &params.token_b)?;
    let pool_id = accounts.pool_id_for_pair(&params.token_a, &params.token_b)?;

    ensure_not_paused(&accounts.factory, &pool_id, GatedOperation::RemoveLiquidity)?;
    check_deadline(params.deadline, ctx.now())?;
    check_nonzero(params.shares, "shares to burn")?;
    check_recipient(&params.recipient)?;

    require_parties_compliant(
        ctx.oracle,
        caller,
        &[&params.token_a, &params.token_b],
        &params.recipient,
        &[&params.token_a, &params.token_b],
    )?;

    let growth_fee_to = accounts.factory.growth_fee_recipient;
    let pool = accounts.pool_mut(&pool_id)?;
    let pool_address = *pool.address();
    let caller_order_matches = params.token_a == *pool.token_a();

    pool.transfer_shares(
        &ctx.program_id,
        caller,
        &pool_address,
        params.shares,
        &mut ctx.invoke,
    )?;
    let (amount_a, amount_b) = pool.burn(
        &ctx.program_id,
        &params.recipient,
        growth_fee_to.as_ref(),
        &mut ctx.invoke,
    )?;

    let (caller_amount_a, caller_amount_b) = if caller_order_matches {
        (amount_a, amount_b)
    } else {
        (amount_b, amount_a)
    };
    if caller_amount_a < params.amount_a_min {
        return Err(AmmError::SlippageExceeded {
            token: params.token_a,
            minimum: params.amount_a_min,
            actual: caller_amount_a,
        });
    }
    if caller_amount_b < params.amount_b_min {
        return Err(AmmError::SlippageExceeded {
            token: params.token_b,
            minimum: params.amount_b_min,
            actual: caller_amount_b,
        });
    }

    msg!(
        "✅ LIQUIDITY REMOVED: {} shares for ({}, {})",
        params.shares,
        caller_amount_a,
        caller_amount_b
    );
    ctx.invoke.events.emit(AmmEvent::LiquidityRemoved {
        pool: pool_id,
        caller: *caller,
        recipient: params.recipient,
        token_a: params.token_a,
        token_b: params.token_b,
        amount_a: caller_amount_a,
        amount_b: caller_amount_b,
        shares: params.shares,
    });
    Ok(LiquidityOutcome {
        pool: pool_id,
        amount_a: caller_amount_a,
        amount_b: caller_amount_b,
        shares: params.shares,
        pool_created: false,
    })
}
