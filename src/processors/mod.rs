//! Processors Module
//!
//! Factory/router operations, organized by functionality. Each processor
//! receives the program accounts and a `FactoryContext` and re-validates
//! everything it depends on. `process_instruction` is the program's
//! instruction dispatch.

use borsh::BorshDeserialize;
use solana_program::{msg, pubkey::Pubkey};

use crate::{
    error::AmmError,
    runtime::FactoryContext,
    state::ProgramAccounts,
    types::{FactoryInstruction, InstructionOutcome},
};

pub mod liquidity;
pub mod pool_creation;
pub mod pool_management;
pub mod swap;
pub mod system_pause;
pub mod utilities;

// Re-export pool creation functions
pub use pool_creation::*;

// Re-export liquidity management functions
pub use liquidity::*;

// Re-export swap operations functions
pub use swap::*;

// Re-export emergency pause functions
pub use system_pause::*;

// Re-export quorum-governed configuration and share management functions
pub use pool_management::*;

// Re-export view functions
pub use utilities::*;

/// Decodes a borsh `FactoryInstruction` and routes it to its processor.
///
/// `caller` is the transaction signer. The whole call is one transaction:
/// the host discards every account, ledger and event change if this returns
/// an error.
pub fn process_instruction(
    program_id: &Pubkey,
    caller: &Pubkey,
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    instruction_data: &[u8],
) -> Result<InstructionOutcome, AmmError> {
    if *program_id != ctx.program_id {
        return Err(AmmError::IncorrectProgramId {
            expected: ctx.program_id,
            actual: *program_id,
        });
    }
    let instruction = FactoryInstruction::try_from_slice(instruction_data)?;
    msg!("Instruction: {}", instruction.name());

    let outcome = match instruction {
        FactoryInstruction::CreatePool { token_a, token_b } => InstructionOutcome::PoolCreated {
            pool: process_create_pool(accounts, ctx, caller, &token_a, &token_b)?,
        },
        FactoryInstruction::Swap(params) => {
            InstructionOutcome::Swap(process_swap(accounts, ctx, caller, &params)?)
        }
        FactoryInstruction::AddLiquidity(params) => {
            InstructionOutcome::Liquidity(process_add_liquidity(accounts, ctx, caller, &params)?)
        }
        FactoryInstruction::RemoveLiquidity(params) => {
            InstructionOutcome::Liquidity(process_remove_liquidity(accounts, ctx, caller, &params)?)
        }
        FactoryInstruction::Skim { pool, recipient } => {
            InstructionOutcome::Skim(process_skim(accounts, ctx, caller, &pool, &recipient)?)
        }
        FactoryInstruction::TransferShares {
            pool,
            recipient,
            amount,
        } => {
            process_transfer_shares(accounts, ctx, caller, &pool, &recipient, amount)?;
            InstructionOutcome::SharesTransferred
        }
        FactoryInstruction::EmergencyPause {
            target,
            nonce,
            approvals,
        } => {
            process_emergency_pause(accounts, ctx, caller, target, nonce, &approvals)?;
            InstructionOutcome::EmergencyActionApplied { nonce }
        }
        FactoryInstruction::EmergencyUnpause {
            target,
            nonce,
            approvals,
        } => {
            process_emergency_unpause(accounts, ctx, caller, target, nonce, &approvals)?;
            InstructionOutcome::EmergencyActionApplied { nonce }
        }
        FactoryInstruction::SetPoolCreator {
            creator,
            allowed,
            nonce,
            approvals,
        } => {
            process_set_pool_creator(accounts, ctx, &creator, allowed, nonce, &approvals)?;
            InstructionOutcome::EmergencyActionApplied { nonce }
        }
        FactoryInstruction::SetFeeParameters {
            protocol_fee_bps,
            lp_fee_share_bps,
            nonce,
            approvals,
        } => {
            process_set_fee_parameters(
                accounts,
                ctx,
                protocol_fee_bps,
                lp_fee_share_bps,
                nonce,
                &approvals,
            )?;
            InstructionOutcome::EmergencyActionApplied { nonce }
        }
        FactoryInstruction::GetPoolInfo { pool } => {
            InstructionOutcome::PoolInfo(pool_info(accounts, &pool)?)
        }
        FactoryInstruction::GetPools { offset, limit } => {
            InstructionOutcome::Pools(pools_page(&accounts.factory, offset, limit)?)
        }
        FactoryInstruction::GetFeeParameters => {
            InstructionOutcome::FeeParameters(accounts.factory.fees.clone())
        }
        FactoryInstruction::QuoteSwap {
            token_in,
            token_out,
            amount_in,
        } => InstructionOutcome::Quote(quote_swap(accounts, &token_in, &token_out, amount_in)?),
    };
    Ok(outcome)
}
