//! System Pause Compliance
//!
//! Every balance-affecting factory operation passes the layered pause check
//! before anything else is validated:
//!
//! ```text
//! Global Pause -> Pool Pause -> Operation Logic
//! ```
//!
//! ## Exemptions
//!
//! - Read-only views and quotes
//! - `sync`, which only reconciles reserves with balances
//! - Emergency actions themselves (they are authorized by quorum)
//!
//! Removing liquidity is NOT exempt: no forced exits during an incident.

use solana_program::{msg, pubkey::Pubkey};

use crate::{error::AmmError, state::FactoryState, types::PauseTarget};

/// Operations subject to the layered pause check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedOperation {
    Swap,
    FlashSwap,
    AddLiquidity,
    RemoveLiquidity,
    Skim,
    TransferShares,
}

impl GatedOperation {
    pub fn name(&self) -> &'static str {
        match self {
            GatedOperation::Swap => "Swap",
            GatedOperation::FlashSwap => "FlashSwap",
            GatedOperation::AddLiquidity => "AddLiquidity",
            GatedOperation::RemoveLiquidity => "RemoveLiquidity",
            GatedOperation::Skim => "Skim",
            GatedOperation::TransferShares => "TransferShares",
        }
    }
}

/// Global pause only. Runs before the pair or pool is resolved, so an
/// unknown pair still reports `Paused` during an incident.
pub fn ensure_not_globally_paused(
    factory: &FactoryState,
    operation: GatedOperation,
) -> Result<(), AmmError> {
    if factory.global_paused {
        msg!("⏸️ {} blocked: system is globally paused", operation.name());
        return Err(AmmError::Paused {
            target: PauseTarget::Global,
        });
    }
    Ok(())
}

/// Global pause first, then the pool's own pause.
pub fn ensure_not_paused(
    factory: &FactoryState,
    pool: &Pubkey,
    operation: GatedOperation,
) -> Result<(), AmmError> {
    ensure_not_globally_paused(factory, operation)?;
    if factory.paused_pools.contains(pool) {
        msg!("⏸️ {} blocked: pool {} is paused", operation.name(), pool);
        return Err(AmmError::Paused {
            target: PauseTarget::Pool(*pool),
        });
    }
    Ok(())
}

pub fn is_paused(factory: &FactoryState, target: &PauseTarget) -> bool {
    match target {
        PauseTarget::Global => factory.global_paused,
        PauseTarget::Pool(pool) => factory.paused_pools.contains(pool),
    }
}

/// Sets the pause flag for `target`; pausing twice is an error.
pub fn apply_pause(factory: &mut FactoryState, target: &PauseTarget) -> Result<(), AmmError> {
    if is_paused(factory, target) {
        return Err(AmmError::AlreadyPaused { target: *target });
    }
    match target {
        PauseTarget::Global => factory.global_paused = true,
        PauseTarget::Pool(pool) => {
            factory.paused_pools.insert(*pool);
        }
    }
    msg!("🛑 PAUSED: {}", target);
    Ok(())
}

/// Clears the pause flag for `target`; it must currently be set.
pub fn apply_unpause(factory: &mut FactoryState, target: &PauseTarget) -> Result<(), AmmError> {
    if !is_paused(factory, target) {
        return Err(AmmError::NotPaused { target: *target });
    }
    match target {
        PauseTarget::Global => factory.global_paused = false,
        PauseTarget::Pool(pool) => {
            factory.paused_pools.remove(pool);
        }
    }
    msg!("▶️ UNPAUSED: {}", target);
    Ok(())
}
