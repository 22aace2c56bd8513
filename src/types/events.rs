//! Emitted events
//!
//! Every successful state change appends one or more `AmmEvent`s. Each event
//! is logged as a readable `msg!` line and as borsh-encoded `sol_log_data` so
//! indexers can decode it. Events emitted during an operation that later fails
//! are discarded along with the rest of its effects.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{log::sol_log_data, msg, pubkey::Pubkey};

use crate::types::{FeeBreakdown, PauseTarget};

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum AmmEvent {
    PoolCreated {
        pool: Pubkey,
        token_a: Pubkey,
        token_b: Pubkey,
        creator: Pubkey,
        pool_index: u64,
    },
    Mint {
        pool: Pubkey,
        recipient: Pubkey,
        amount_a: u64,
        amount_b: u64,
        shares: u64,
    },
    Burn {
        pool: Pubkey,
        recipient: Pubkey,
        amount_a: u64,
        amount_b: u64,
        shares: u64,
    },
    /// Pool-level swap record, in canonical token order
    PoolSwap {
        pool: Pubkey,
        amount_a_in: u64,
        amount_b_in: u64,
        amount_a_out: u64,
        amount_b_out: u64,
        recipient: Pubkey,
    },
    /// Router-level swap record with the protocol fee breakdown
    Swap {
        pool: Pubkey,
        caller: Pubkey,
        recipient: Pubkey,
        token_in: Pubkey,
        token_out: Pubkey,
        amount_in: u64,
        amount_out: u64,
        fees: FeeBreakdown,
    },
    Sync {
        pool: Pubkey,
        reserve_a: u64,
        reserve_b: u64,
    },
    Skim {
        pool: Pubkey,
        recipient: Pubkey,
        amount_a: u64,
        amount_b: u64,
    },
    SharesTransferred {
        pool: Pubkey,
        from: Pubkey,
        to: Pubkey,
        amount: u64,
    },
    GrowthFeeMinted {
        pool: Pubkey,
        recipient: Pubkey,
        shares: u64,
    },
    EmergencyPaused {
        target: PauseTarget,
        nonce: u64,
        signers: Vec<Pubkey>,
        relayer: Pubkey,
    },
    EmergencyUnpaused {
        target: PauseTarget,
        nonce: u64,
        signers: Vec<Pubkey>,
        relayer: Pubkey,
    },
    PoolCreatorUpdated {
        creator: Pubkey,
        allowed: bool,
        nonce: u64,
    },
    FeeParametersUpdated {
        protocol_fee_bps: u16,
        lp_fee_share_bps: u16,
        vault_fee_share_bps: u16,
        nonce: u64,
    },
    /// Router-level deposit record, amounts in the caller's token order
    LiquidityAdded {
        pool: Pubkey,
        caller: Pubkey,
        recipient: Pubkey,
        token_a: Pubkey,
        token_b: Pubkey,
        amount_a: u64,
        amount_b: u64,
        shares: u64,
    },
    /// Router-level withdrawal record, amounts in the caller's token order
    LiquidityRemoved {
        pool: Pubkey,
        caller: Pubkey,
        recipient: Pubkey,
        token_a: Pubkey,
        token_b: Pubkey,
        amount_a: u64,
        amount_b: u64,
        shares: u64,
    },
    FlashSwap {
        pool: Pubkey,
        caller: Pubkey,
        recipient: Pubkey,
        amount_a_out: u64,
        amount_b_out: u64,
        amount_a_in: u64,
        amount_b_in: u64,
        fee_bps: u16,
    },
}

impl AmmEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AmmEvent::PoolCreated { .. } => "PoolCreated",
            AmmEvent::Mint { .. } => "Mint",
            AmmEvent::Burn { .. } => "Burn",
            AmmEvent::PoolSwap { .. } => "PoolSwap",
            AmmEvent::Swap { .. } => "Swap",
            AmmEvent::Sync { .. } => "Sync",
            AmmEvent::Skim { .. } => "Skim",
            AmmEvent::SharesTransferred { .. } => "SharesTransferred",
            AmmEvent::GrowthFeeMinted { .. } => "GrowthFeeMinted",
            AmmEvent::EmergencyPaused { .. } => "EmergencyPaused",
            AmmEvent::EmergencyUnpaused { .. } => "EmergencyUnpaused",
            AmmEvent::PoolCreatorUpdated { .. } => "PoolCreatorUpdated",
            AmmEvent::FeeParametersUpdated { .. } => "FeeParametersUpdated",
            AmmEvent::LiquidityAdded { .. } => "LiquidityAdded",
            AmmEvent::LiquidityRemoved { .. } => "LiquidityRemoved",
            AmmEvent::FlashSwap { .. } => "FlashSwap",
        }
    }
}

/// Ordered events produced by one operation (or, on the runtime, by every
/// committed operation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<AmmEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: AmmEvent) {
        msg!("📣 EVENT {}: {:?}", event.name(), event);
        match event.try_to_vec() {
            Ok(data) => sol_log_data(&[&data]),
            Err(e) => msg!("⚠️ Failed to encode {} event: {}", event.name(), e),
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[AmmEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Moves every event out of `other`, preserving order.
    pub fn append(&mut self, other: &mut EventLog) {
        self.events.append(&mut other.events);
    }

    pub fn take(&mut self) -> Vec<AmmEvent> {
        std::mem::take(&mut self.events)
    }
}
