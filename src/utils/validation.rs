//! Input Validation Utilities
//!
//! Parameter checks shared by every factory operation. The factory
//! re-validates on every call; nothing here caches a previous answer.

use solana_program::{msg, pubkey::Pubkey};

use crate::{constants::POOL_SEED_PREFIX, error::AmmError};

/// Validates that two tokens can form a pool.
///
/// # Arguments
/// * `token_a` - First token, any order
/// * `token_b` - Second token, any order
///
/// # Returns
/// * `InvalidTokenPair` if either token is null or both are the same
pub fn validate_token_pair(token_a: &Pubkey, token_b: &Pubkey) -> Result<(), AmmError> {
    let reason = if *token_a == Pubkey::default() || *token_b == Pubkey::default() {
        "token cannot be the null identity"
    } else if token_a == token_b {
        "tokens must be distinct"
    } else {
        return Ok(());
    };

    msg!("❌ Invalid token pair {} / {}: {}", token_a, token_b, reason);
    Err(AmmError::InvalidTokenPair {
        token_a: *token_a,
        token_b: *token_b,
        reason: reason.to_string(),
    })
}

/// Returns the pair in canonical order (`token_a < token_b`).
pub fn sort_tokens(token_a: &Pubkey, token_b: &Pubkey) -> (Pubkey, Pubkey) {
    if token_a < token_b {
        (*token_a, *token_b)
    } else {
        (*token_b, *token_a)
    }
}

/// Derives the pool address for a pair, in either order.
///
/// # Returns
/// * `(address, bump)` of the program-derived address over
///   `[POOL_SEED_PREFIX, token_a, token_b]` with the tokens sorted
pub fn derive_pool_address(program_id: &Pubkey, token_a: &Pubkey, token_b: &Pubkey) -> (Pubkey, u8) {
    let (first, second) = sort_tokens(token_a, token_b);
    Pubkey::find_program_address(
        &[POOL_SEED_PREFIX, first.as_ref(), second.as_ref()],
        program_id,
    )
}

/// Rejects operations submitted after their deadline (`now > deadline`).
pub fn check_deadline(deadline: i64, now: i64) -> Result<(), AmmError> {
    if now > deadline {
        msg!("❌ Deadline expired: deadline {}, now {}", deadline, now);
        return Err(AmmError::DeadlineExpired { deadline, now });
    }
    Ok(())
}

pub fn check_nonzero(amount: u64, context: &str) -> Result<(), AmmError> {
    if amount == 0 {
        return Err(AmmError::ZeroAmount {
            context: context.to_string(),
        });
    }
    Ok(())
}

pub fn check_recipient(recipient: &Pubkey) -> Result<(), AmmError> {
    if *recipient == Pubkey::default() {
        return Err(AmmError::InvalidRecipient {
            recipient: *recipient,
        });
    }
    Ok(())
}
