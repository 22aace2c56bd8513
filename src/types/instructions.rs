//! Program Instructions
//!
//! Borsh-encoded command surface. `FactoryInstruction` is what end users,
//! integrators and emergency signers submit; `PoolInstruction` addresses a
//! pool directly, where every mutating variant is rejected unless the caller
//! is the pool's factory.

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// Scope of an emergency pause.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseTarget {
    /// Every pool
    Global,
    /// A single pool by id
    Pool(Pubkey),
}

impl fmt::Display for PauseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauseTarget::Global => write!(f, "global"),
            PauseTarget::Pool(pool) => write!(f, "pool {}", pool),
        }
    }
}

/// Payload covered by the emergency signers' signatures.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum EmergencyAction {
    Pause(PauseTarget),
    Unpause(PauseTarget),
    SetPoolCreator { creator: Pubkey, allowed: bool },
    SetFeeParameters {
        protocol_fee_bps: u16,
        lp_fee_share_bps: u16,
    },
}

impl EmergencyAction {
    pub fn name(&self) -> &'static str {
        match self {
            EmergencyAction::Pause(_) => "Pause",
            EmergencyAction::Unpause(_) => "Unpause",
            EmergencyAction::SetPoolCreator { .. } => "SetPoolCreator",
            EmergencyAction::SetFeeParameters { .. } => "SetFeeParameters",
        }
    }
}

/// One emergency signer's ed25519 signature over an emergency message.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmergencyApproval {
    pub signer: Pubkey,
    pub signature: [u8; 64],
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub token_in: Pubkey,
    pub token_out: Pubkey,
    pub amount_in: u64,
    pub min_amount_out: u64,
    pub recipient: Pubkey,
    pub deadline: i64,
}

/// Token order is the caller's; the factory maps it onto the pool's
/// canonical order.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct AddLiquidityParams {
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub amount_a_desired: u64,
    pub amount_b_desired: u64,
    pub amount_a_min: u64,
    pub amount_b_min: u64,
    pub recipient: Pubkey,
    pub deadline: i64,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoveLiquidityParams {
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub shares: u64,
    pub amount_a_min: u64,
    pub amount_b_min: u64,
    pub recipient: Pubkey,
    pub deadline: i64,
}

/// Outputs are in the pool's canonical token order.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlashSwapParams {
    pub pool: Pubkey,
    pub amount_a_out: u64,
    pub amount_b_out: u64,
    pub recipient: Pubkey,
    pub data: Vec<u8>,
    pub deadline: i64,
}

/// All instructions accepted by the factory/router.
///
/// Flash swaps are not part of the encoded surface because they carry a
/// callback; they are reachable through `Runtime::flash_swap`.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum FactoryInstruction {
    /// Create the pool for an unordered token pair (allowed creators only)
    CreatePool { token_a: Pubkey, token_b: Pubkey },

    /// Exact-input swap through the pool for `token_in`/`token_out`
    Swap(SwapParams),

    /// Deposit both tokens, creating the pool on demand for allowed creators
    AddLiquidity(AddLiquidityParams),

    /// Burn shares for both tokens
    RemoveLiquidity(RemoveLiquidityParams),

    /// Pay out balances held above recorded reserves
    Skim { pool: Pubkey, recipient: Pubkey },

    /// Move liquidity shares between holders
    TransferShares {
        pool: Pubkey,
        recipient: Pubkey,
        amount: u64,
    },

    /// Quorum-signed pause (global or single pool)
    EmergencyPause {
        target: PauseTarget,
        nonce: u64,
        approvals: Vec<EmergencyApproval>,
    },

    /// Quorum-signed unpause (global or single pool)
    EmergencyUnpause {
        target: PauseTarget,
        nonce: u64,
        approvals: Vec<EmergencyApproval>,
    },

    /// Quorum-signed change to the pool-creator allow-list
    SetPoolCreator {
        creator: Pubkey,
        allowed: bool,
        nonce: u64,
        approvals: Vec<EmergencyApproval>,
    },

    /// Quorum-signed change to the protocol fee and its LP/vault split
    SetFeeParameters {
        protocol_fee_bps: u16,
        lp_fee_share_bps: u16,
        nonce: u64,
        approvals: Vec<EmergencyApproval>,
    },

    /// View: reserves, shares, accumulators and pause state of a pool
    GetPoolInfo { pool: Pubkey },

    /// View: one page of the pool list
    GetPools { offset: u64, limit: u16 },

    /// View: current fee parameters
    GetFeeParameters,

    /// View: output and fee breakdown for a prospective swap
    QuoteSwap {
        token_in: Pubkey,
        token_out: Pubkey,
        amount_in: u64,
    },
}

impl FactoryInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            FactoryInstruction::CreatePool { .. } => "CreatePool",
            FactoryInstruction::Swap(_) => "Swap",
            FactoryInstruction::AddLiquidity(_) => "AddLiquidity",
            FactoryInstruction::RemoveLiquidity(_) => "RemoveLiquidity",
            FactoryInstruction::Skim { .. } => "Skim",
            FactoryInstruction::TransferShares { .. } => "TransferShares",
            FactoryInstruction::EmergencyPause { .. } => "EmergencyPause",
            FactoryInstruction::EmergencyUnpause { .. } => "EmergencyUnpause",
            FactoryInstruction::SetPoolCreator { .. } => "SetPoolCreator",
            FactoryInstruction::SetFeeParameters { .. } => "SetFeeParameters",
            FactoryInstruction::GetPoolInfo { .. } => "GetPoolInfo",
            FactoryInstruction::GetPools { .. } => "GetPools",
            FactoryInstruction::GetFeeParameters => "GetFeeParameters",
            FactoryInstruction::QuoteSwap { .. } => "QuoteSwap",
        }
    }
}

/// Direct pool entry points. Mutating variants succeed only for the factory.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum PoolInstruction {
    Mint { recipient: Pubkey },
    Burn { recipient: Pubkey },
    Swap {
        amount_a_out: u64,
        amount_b_out: u64,
        recipient: Pubkey,
    },
    Skim { recipient: Pubkey },
    /// Permissionless reserve reconciliation
    Sync,
}
