//! Fee Validation and Splitting
//!
//! The protocol fee is taken from the swap input before pricing. It is then
//! split between liquidity providers (left in the pool) and the fee vault.

use solana_program::msg;

use crate::{
    constants::{BASIS_POINTS_DENOMINATOR, MAX_PROTOCOL_FEE_BPS},
    error::AmmError,
    state::FeeParameters,
    types::FeeBreakdown,
};

/// Validates a fee configuration.
///
/// # Arguments
/// * `protocol_fee_bps` - Fee on swap input, at most `MAX_PROTOCOL_FEE_BPS`
/// * `lp_fee_share_bps` - LP portion of the protocol fee, at most 10,000;
///   the vault receives the remainder
pub fn validate_fee_parameters(protocol_fee_bps: u16, lp_fee_share_bps: u16) -> Result<(), AmmError> {
    if protocol_fee_bps > MAX_PROTOCOL_FEE_BPS {
        msg!(
            "❌ Protocol fee {} bps exceeds maximum {} bps",
            protocol_fee_bps,
            MAX_PROTOCOL_FEE_BPS
        );
        return Err(AmmError::InvalidFeeParameters {
            reason: format!(
                "protocol fee {} bps exceeds maximum {} bps",
                protocol_fee_bps, MAX_PROTOCOL_FEE_BPS
            ),
        });
    }
    if lp_fee_share_bps as u64 > BASIS_POINTS_DENOMINATOR {
        return Err(AmmError::InvalidFeeParameters {
            reason: format!(
                "LP fee share {} bps exceeds {} bps",
                lp_fee_share_bps, BASIS_POINTS_DENOMINATOR
            ),
        });
    }
    Ok(())
}

/// Splits `amount_in` into the net amount priced by the curve and the two
/// fee portions. Divisions round down; split dust lands in `vault_fee`.
pub fn compute_fee_breakdown(amount_in: u64, fees: &FeeParameters) -> Result<FeeBreakdown, AmmError> {
    let protocol_fee = bps_of(amount_in, fees.protocol_fee_bps)?;
    let net_amount_in = amount_in - protocol_fee;
    let lp_fee = bps_of(protocol_fee, fees.lp_fee_share_bps)?;
    let vault_fee = protocol_fee - lp_fee;

    Ok(FeeBreakdown {
        protocol_fee,
        net_amount_in,
        lp_fee,
        vault_fee,
    })
}

fn bps_of(amount: u64, bps: u16) -> Result<u64, AmmError> {
    let scaled = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;
    // bps <= 10,000 keeps the result at or below `amount`
    Ok((scaled / BASIS_POINTS_DENOMINATOR as u128) as u64)
}
