/*
MIT License

Copyright (c) 2024 Davinci

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! # Constant Product Trading - Client SDK
//!
//! Helpers for integrators and emergency signers.
//!
//! ## Features
//! - Pool address derivation
//! - Emergency message construction and quorum signing
//! - Instruction building for every factory operation
//!
//! ## Quick Start
//!
//! ```rust
//! use constant_product_trading::client_sdk::PoolClient;
//! use constant_product_trading::types::PauseTarget;
//! use solana_program::pubkey::Pubkey;
//! use solana_sdk::signature::Keypair;
//!
//! let program_id = Pubkey::new_unique();
//! let client = PoolClient::new(program_id);
//!
//! let (pool, _bump) = client.derive_pool_address(&Pubkey::new_unique(), &Pubkey::new_unique());
//!
//! let signers = [Keypair::new(), Keypair::new(), Keypair::new()];
//! let approvals = client
//!     .sign_pause(PauseTarget::Pool(pool), 1, &[&signers[0], &signers[1], &signers[2]])
//!     .unwrap();
//! assert_eq!(approvals.len(), 3);
//! ```

use std::fmt;

use borsh::BorshSerialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use solana_sdk::signature::{Keypair, Signer};

use crate::{
    error::AmmError,
    types::{
        AddLiquidityParams, EmergencyAction, EmergencyApproval, FactoryInstruction, PauseTarget,
        RemoveLiquidityParams, SwapParams,
    },
    utils::{quorum::emergency_message, validation::derive_pool_address},
};

/// Errors that can occur when using the pool client
#[derive(Debug)]
pub enum ClientError {
    /// Pool tokens must be distinct and non-null
    InvalidTokenPair,
    /// Error during instruction or message serialization
    SerializationError,
    /// The program rejected the request
    Program(AmmError),
}

impl From<std::io::Error> for ClientError {
    fn from(_error: std::io::Error) -> Self {
        Self::SerializationError
    }
}

impl From<AmmError> for ClientError {
    fn from(error: AmmError) -> Self {
        match error {
            AmmError::InvalidInstruction => Self::SerializationError,
            other => Self::Program(other),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidTokenPair => write!(f, "Invalid token pair: tokens must be distinct and non-null"),
            ClientError::SerializationError => write!(f, "Failed to serialize instruction data"),
            ClientError::Program(error) => write!(f, "Program error {}: {}", error.error_code(), error),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Program(error) => Some(error),
            _ => None,
        }
    }
}

/// High-level client for building factory instructions and emergency approvals.
pub struct PoolClient {
    /// The program ID of the deployed program
    program_id: Pubkey,
}

impl PoolClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Derives the pool id for a pair, in either order.
    ///
    /// # Returns
    /// * `(Pubkey, u8)` - The pool address and its bump seed
    pub fn derive_pool_address(&self, token_a: &Pubkey, token_b: &Pubkey) -> (Pubkey, u8) {
        derive_pool_address(&self.program_id, token_a, token_b)
    }

    /// The message emergency signers sign for `action` at `nonce`.
    pub fn emergency_message(&self, action: &EmergencyAction, nonce: u64) -> Result<[u8; 32], ClientError> {
        Ok(emergency_message(&self.program_id, action, nonce)?)
    }

    /// Collects one approval per keypair for `action` at `nonce`.
    ///
    /// # Arguments
    /// * `action` - The emergency action being authorized
    /// * `nonce` - Must exceed the factory's current emergency nonce
    /// * `signers` - Emergency signer keypairs; at least three are needed on-chain
    pub fn sign_emergency_action(
        &self,
        action: &EmergencyAction,
        nonce: u64,
        signers: &[&Keypair],
    ) -> Result<Vec<EmergencyApproval>, ClientError> {
        let message = self.emergency_message(action, nonce)?;
        Ok(signers
            .iter()
            .map(|keypair| {
                let signature = keypair.sign_message(&message);
                let mut bytes = [0u8; 64];
                bytes.copy_from_slice(signature.as_ref());
                EmergencyApproval {
                    signer: keypair.pubkey(),
                    signature: bytes,
                }
            })
            .collect())
    }

    pub fn sign_pause(
        &self,
        target: PauseTarget,
        nonce: u64,
        signers: &[&Keypair],
    ) -> Result<Vec<EmergencyApproval>, ClientError> {
        self.sign_emergency_action(&EmergencyAction::Pause(target), nonce, signers)
    }

    pub fn sign_unpause(
        &self,
        target: PauseTarget,
        nonce: u64,
        signers: &[&Keypair],
    ) -> Result<Vec<EmergencyApproval>, ClientError> {
        self.sign_emergency_action(&EmergencyAction::Unpause(target), nonce, signers)
    }

    /// Wraps a factory instruction with the caller as the only signer.
    pub fn build_instruction(
        &self,
        caller: &Pubkey,
        instruction: &FactoryInstruction,
    ) -> Result<Instruction, ClientError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![AccountMeta::new(*caller, true)],
            data: instruction.try_to_vec()?,
        })
    }

    pub fn create_pool_data(&self, token_a: &Pubkey, token_b: &Pubkey) -> Result<Vec<u8>, ClientError> {
        if token_a == token_b || *token_a == Pubkey::default() || *token_b == Pubkey::default() {
            return Err(ClientError::InvalidTokenPair);
        }
        Ok(FactoryInstruction::CreatePool {
            token_a: *token_a,
            token_b: *token_b,
        }
        .try_to_vec()?)
    }

    pub fn swap_data(&self, params: SwapParams) -> Result<Vec<u8>, ClientError> {
        Ok(FactoryInstruction::Swap(params).try_to_vec()?)
    }

    pub fn add_liquidity_data(&self, params: AddLiquidityParams) -> Result<Vec<u8>, ClientError> {
        Ok(FactoryInstruction::AddLiquidity(params).try_to_vec()?)
    }

    pub fn remove_liquidity_data(&self, params: RemoveLiquidityParams) -> Result<Vec<u8>, ClientError> {
        Ok(FactoryInstruction::RemoveLiquidity(params).try_to_vec()?)
    }

    pub fn emergency_pause_data(
        &self,
        target: PauseTarget,
        nonce: u64,
        approvals: Vec<EmergencyApproval>,
    ) -> Result<Vec<u8>, ClientError> {
        Ok(FactoryInstruction::EmergencyPause {
            target,
            nonce,
            approvals,
        }
        .try_to_vec()?)
    }

    pub fn emergency_unpause_data(
        &self,
        target: PauseTarget,
        nonce: u64,
        approvals: Vec<EmergencyApproval>,
    ) -> Result<Vec<u8>, ClientError> {
        Ok(FactoryInstruction::EmergencyUnpause {
            target,
            nonce,
            approvals,
        }
        .try_to_vec()?)
    }

    pub fn set_pool_creator_data(
        &self,
        creator: &Pubkey,
        allowed: bool,
        nonce: u64,
        signers: &[&Keypair],
    ) -> Result<Vec<u8>, ClientError> {
        let approvals = self.sign_emergency_action(
            &EmergencyAction::SetPoolCreator {
                creator: *creator,
                allowed,
            },
            nonce,
            signers,
        )?;
        Ok(FactoryInstruction::SetPoolCreator {
            creator: *creator,
            allowed,
            nonce,
            approvals,
        }
        .try_to_vec()?)
    }

    pub fn set_fee_parameters_data(
        &self,
        protocol_fee_bps: u16,
        lp_fee_share_bps: u16,
        nonce: u64,
        signers: &[&Keypair],
    ) -> Result<Vec<u8>, ClientError> {
        let approvals = self.sign_emergency_action(
            &EmergencyAction::SetFeeParameters {
                protocol_fee_bps,
                lp_fee_share_bps,
            },
            nonce,
            signers,
        )?;
        Ok(FactoryInstruction::SetFeeParameters {
            protocol_fee_bps,
            lp_fee_share_bps,
            nonce,
            approvals,
        }
        .try_to_vec()?)
    }
}
