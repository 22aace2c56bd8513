//! Pool Management Processors
//!
//! Quorum-governed configuration (pool-creator allow-list, fee parameters)
//! and the gated share-level operations (skim, share transfers).

use solana_program::{msg, pubkey::Pubkey};

use crate::{
    error::AmmError,
    runtime::FactoryContext,
    state::{FeeParameters, ProgramAccounts},
    types::{AmmEvent, EmergencyAction, EmergencyApproval, SkimOutcome},
    utils::{
        compliance::require_parties_compliant,
        fee_validation::validate_fee_parameters,
        quorum::verify_quorum,
        system_pause_compliance::{ensure_not_globally_paused, ensure_not_paused, GatedOperation},
        validation::{check_nonzero, check_recipient},
    },
};

/// Adds or removes a pool creator. Quorum-authorized.
pub fn process_set_pool_creator(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    creator: &Pubkey,
    allowed: bool,
    nonce: u64,
    approvals: &[EmergencyApproval],
) -> Result<(), AmmError> {
    msg!("Processing SetPoolCreator: {} -> {}", creator, allowed);

    let action = EmergencyAction::SetPoolCreator {
        creator: *creator,
        allowed,
    };
    verify_quorum(&accounts.factory, &ctx.program_id, &action, nonce, approvals)?;

    if *creator == Pubkey::default() {
        return Err(AmmError::InvalidRecipient {
            recipient: *creator,
        });
    }
    if allowed {
        accounts.factory.allowed_creators.insert(*creator);
    } else {
        accounts.factory.allowed_creators.remove(creator);
    }
    accounts.factory.emergency_nonce = nonce;

    ctx.invoke.events.emit(AmmEvent::PoolCreatorUpdated {
        creator: *creator,
        allowed,
        nonce,
    });
    Ok(())
}

/// Replaces the protocol fee and its LP/vault split. Quorum-authorized.
/// The fee vault address itself is fixed at genesis.
pub fn process_set_fee_parameters(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    protocol_fee_bps: u16,
    lp_fee_share_bps: u16,
    nonce: u64,
    approvals: &[EmergencyApproval],
) -> Result<(), AmmError> {
    msg!(
        "Processing SetFeeParameters: {} bps, LP share {} bps",
        protocol_fee_bps,
        lp_fee_share_bps
    );

    let action = EmergencyAction::SetFeeParameters {
        protocol_fee_bps,
        lp_fee_share_bps,
    };
    verify_quorum(&accounts.factory, &ctx.program_id, &action, nonce, approvals)?;
    validate_fee_parameters(protocol_fee_bps, lp_fee_share_bps)?;

    let fee_vault = accounts.factory.fees.fee_vault;
    accounts.factory.fees = FeeParameters::new(protocol_fee_bps, lp_fee_share_bps, fee_vault);
    accounts.factory.emergency_nonce = nonce;

    ctx.invoke.events.emit(AmmEvent::FeeParametersUpdated {
        protocol_fee_bps,
        lp_fee_share_bps,
        vault_fee_share_bps: accounts.factory.fees.vault_fee_share_bps,
        nonce,
    });
    Ok(())
}

/// Pays a pool's excess balances (above reserves) to `recipient`.
pub fn process_skim(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    caller: &Pubkey,
    pool_id: &Pubkey,
    recipient: &Pubkey,
) -> Result<SkimOutcome, AmmError> {
    msg!("Processing Skim on pool {}", pool_id);

    ensure_not_globally_paused(&accounts.factory, GatedOperation::Skim)?;
    let (token_a, token_b) = {
        let pool = accounts.pool(pool_id)?;
        (*pool.token_a(), *pool.token_b())
    };
    ensure_not_paused(&accounts.factory, pool_id, GatedOperation::Skim)?;
    check_recipient(recipient)?;
    require_parties_compliant(
        ctx.oracle,
        caller,
        &[&token_a, &token_b],
        recipient,
        &[&token_a, &token_b],
    )?;

    let (amount_a, amount_b) =
        accounts
            .pool_mut(pool_id)?
            .skim(&ctx.program_id, recipient, &mut ctx.invoke)?;
    Ok(SkimOutcome {
        pool: *pool_id,
        amount_a,
        amount_b,
    })
}

/// Moves the caller's liquidity shares to another holder.
pub fn process_transfer_shares(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    caller: &Pubkey,
    pool_id: &Pubkey,
    recipient: &Pubkey,
    amount: u64,
) -> Result<(), AmmError> {
    msg!("Processing TransferShares: {} on pool {}", amount, pool_id);

    ensure_not_globally_paused(&accounts.factory, GatedOperation::TransferShares)?;
    let (token_a, token_b) = {
        let pool = accounts.pool(pool_id)?;
        (*pool.token_a(), *pool.token_b())
    };
    ensure_not_paused(&accounts.factory, pool_id, GatedOperation::TransferShares)?;
    check_nonzero(amount, "share transfer")?;
    check_recipient(recipient)?;
    // Shares parked on the pool address would be burned by the next withdrawal
    if recipient == pool_id {
        return Err(AmmError::InvalidRecipient {
            recipient: *recipient,
        });
    }
    require_parties_compliant(
        ctx.oracle,
        caller,
        &[&token_a, &token_b],
        recipient,
        &[&token_a, &token_b],
    )?;

    accounts
        .pool_mut(pool_id)?
        .transfer_shares(&ctx.program_id, caller, recipient, amount, &mut ctx.invoke)
}
