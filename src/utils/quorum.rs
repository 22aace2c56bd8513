//! Emergency quorum verification
//!
//! Emergency actions carry ed25519 signatures from the five emergency
//! signers over `hashv([domain, program_id, borsh(action), nonce_le])`.
//! At least `EMERGENCY_QUORUM` distinct, valid signatures are required and
//! the nonce must exceed the last one accepted.

use borsh::BorshSerialize;
use solana_program::{hash::hashv, msg, pubkey::Pubkey};
use solana_sdk::signature::Signature;

use crate::{
    constants::{EMERGENCY_MESSAGE_DOMAIN, EMERGENCY_QUORUM},
    error::AmmError,
    state::FactoryState,
    types::{EmergencyAction, EmergencyApproval},
};

/// The 32-byte message each emergency signer signs.
pub fn emergency_message(
    program_id: &Pubkey,
    action: &EmergencyAction,
    nonce: u64,
) -> Result<[u8; 32], AmmError> {
    let encoded_action = action.try_to_vec()?;
    Ok(hashv(&[
        EMERGENCY_MESSAGE_DOMAIN,
        program_id.as_ref(),
        &encoded_action,
        &nonce.to_le_bytes(),
    ])
    .to_bytes())
}

/// Verifies a quorum for `action` at `nonce`. Returns the approving signers
/// in submission order.
///
/// Checks run in this order: nonce freshness, then per approval duplicate,
/// membership and signature validity, then the quorum count. Does not
/// consume the nonce; the caller records it after applying the action.
pub fn verify_quorum(
    factory: &FactoryState,
    program_id: &Pubkey,
    action: &EmergencyAction,
    nonce: u64,
    approvals: &[EmergencyApproval],
) -> Result<Vec<Pubkey>, AmmError> {
    if nonce <= factory.emergency_nonce {
        msg!(
            "❌ {}: stale nonce {} (last {})",
            action.name(),
            nonce,
            factory.emergency_nonce
        );
        return Err(AmmError::StaleNonce {
            nonce,
            last_nonce: factory.emergency_nonce,
        });
    }

    let message = emergency_message(program_id, action, nonce)?;
    let mut signers: Vec<Pubkey> = Vec::with_capacity(approvals.len());

    for approval in approvals {
        if signers.contains(&approval.signer) {
            return Err(AmmError::DuplicateSigner {
                signer: approval.signer,
            });
        }
        if !factory.emergency_signers.contains(&approval.signer) {
            return Err(AmmError::UnknownEmergencySigner {
                signer: approval.signer,
            });
        }
        let signature = Signature::from(approval.signature);
        if !signature.verify(approval.signer.as_ref(), &message) {
            msg!("❌ {}: bad signature from {}", action.name(), approval.signer);
            return Err(AmmError::InvalidEmergencySignature {
                signer: approval.signer,
            });
        }
        signers.push(approval.signer);
    }

    if signers.len() < EMERGENCY_QUORUM {
        return Err(AmmError::QuorumNotMet {
            valid: signers.len(),
            required: EMERGENCY_QUORUM,
        });
    }

    msg!(
        "🔐 {} approved by {} of {} emergency signers (nonce {})",
        action.name(),
        signers.len(),
        factory.emergency_signers.len(),
        nonce
    );
    Ok(signers)
}
