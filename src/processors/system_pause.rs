//! Emergency Pause Processors
//!
//! Pause and unpause are authorized only by a quorum of emergency signer
//! signatures; the submitting caller is a relayer and is recorded in the
//! event but grants nothing.

use solana_program::{msg, pubkey::Pubkey};

use crate::{
    error::AmmError,
    runtime::FactoryContext,
    state::ProgramAccounts,
    types::{AmmEvent, EmergencyAction, EmergencyApproval, PauseTarget},
    utils::{
        quorum::verify_quorum,
        system_pause_compliance::{apply_pause, apply_unpause},
    },
};

/// Pauses the whole system or a single pool.
///
/// # How It Works
/// 1. **Target Check**: a pool target must exist
/// 2. **Quorum**: fresh nonce, distinct known signers, valid signatures, at least 3
/// 3. **Transition**: pausing an already paused target fails with `AlreadyPaused`
/// 4. **Nonce**: recorded so the same approvals cannot be replayed
pub fn process_emergency_pause(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    relayer: &Pubkey,
    target: PauseTarget,
    nonce: u64,
    approvals: &[EmergencyApproval],
) -> Result<(), AmmError> {
    msg!("Processing EmergencyPause: {} (nonce {})", target, nonce);
    ensure_target_exists(accounts, &target)?;

    let action = EmergencyAction::Pause(target);
    let signers = verify_quorum(&accounts.factory, &ctx.program_id, &action, nonce, approvals)?;

    apply_pause(&mut accounts.factory, &target)?;
    accounts.factory.emergency_nonce = nonce;

    ctx.invoke.events.emit(AmmEvent::EmergencyPaused {
        target,
        nonce,
        signers,
        relayer: *relayer,
    });
    Ok(())
}

/// Lifts a global or per-pool pause. Same quorum rules as pausing.
pub fn process_emergency_unpause(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    relayer: &Pubkey,
    target: PauseTarget,
    nonce: u64,
    approvals: &[EmergencyApproval],
) -> Result<(), AmmError> {
    msg!("Processing EmergencyUnpause: {} (nonce {})", target, nonce);
    ensure_target_exists(accounts, &target)?;

    let action = EmergencyAction::Unpause(target);
    let signers = verify_quorum(&accounts.factory, &ctx.program_id, &action, nonce, approvals)?;

    apply_unpause(&mut accounts.factory, &target)?;
    accounts.factory.emergency_nonce = nonce;

    ctx.invoke.events.emit(AmmEvent::EmergencyUnpaused {
        target,
        nonce,
        signers,
        relayer: *relayer,
    });
    Ok(())
}

fn ensure_target_exists(accounts: &ProgramAccounts, target: &PauseTarget) -> Result<(), AmmError> {
    if let PauseTarget::Pool(pool) = target {
        accounts.pool(pool)?;
    }
    Ok(())
}
