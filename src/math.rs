//! Fixed-point and integer math for the constant product curve
//!
//! All curve math runs on integers. Products of two u64 amounts fit in u128;
//! anything wider (UQ112.112 prices, fee-adjusted K) runs on `U256`.

use uint::construct_uint;

use crate::{constants::PRICE_RESOLUTION_BITS, error::AmmError};

construct_uint! {
    /// 256-bit unsigned integer for price accumulators and the K check.
    pub struct U256(4);
}

/// Floor of the square root (Babylonian method).
pub fn integer_sqrt(value: u128) -> u128 {
    if value > 3 {
        let mut z = value;
        let mut x = value / 2 + 1;
        while x < z {
            z = x;
            x = (value / x + x) / 2;
        }
        z
    } else if value != 0 {
        1
    } else {
        0
    }
}

/// `a * b / c` with a u128 intermediate, failing if the result leaves u64.
pub fn mul_div(a: u64, b: u64, c: u64) -> Result<u64, AmmError> {
    if c == 0 {
        return Err(AmmError::ArithmeticOverflow);
    }
    let result = (a as u128)
        .checked_mul(b as u128)
        .ok_or(AmmError::ArithmeticOverflow)?
        / (c as u128);
    u64::try_from(result).map_err(|_| AmmError::ArithmeticOverflow)
}

/// Output of an exact-input swap against the given reserves.
///
/// `amount_in` must already be net of every fee:
/// `amount_out = reserve_out * amount_in / (reserve_in + amount_in)`.
pub fn get_amount_out(amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64, AmmError> {
    if amount_in == 0 {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity {
            requested: amount_in,
            reserve: reserve_in.min(reserve_out),
        });
    }

    let numerator = (reserve_out as u128)
        .checked_mul(amount_in as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;
    let denominator = (reserve_in as u128) + (amount_in as u128);

    // Strictly below reserve_out, so the narrowing is lossless
    Ok((numerator / denominator) as u64)
}

/// Amount of B with the same value as `amount_a` at the current reserve ratio.
pub fn quote(amount_a: u64, reserve_a: u64, reserve_b: u64) -> Result<u64, AmmError> {
    if amount_a == 0 {
        return Err(AmmError::ZeroAmount {
            context: "quote amount".to_string(),
        });
    }
    if reserve_a == 0 || reserve_b == 0 {
        return Err(AmmError::InsufficientLiquidity {
            requested: amount_a,
            reserve: 0,
        });
    }
    mul_div(amount_a, reserve_b, reserve_a)
}

/// UQ112.112 encoding of `numerator / denominator`.
///
/// Caller guarantees `denominator != 0`.
pub fn encode_price(numerator: u64, denominator: u64) -> U256 {
    let q112 = U256::from(1u128 << PRICE_RESOLUTION_BITS);
    U256::from(numerator) * q112 / U256::from(denominator)
}
