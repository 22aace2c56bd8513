//! Constants for the Constant Product Trading program
//!
//! Liquidity floors, fee limits, quorum sizing, pagination limits and the
//! seed prefixes used to derive pool addresses.

/// Shares permanently assigned to the unspendable holder on the first deposit
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Smallest `floor(sqrt(amount_a * amount_b))` accepted for a pool's first deposit
pub const MINIMUM_INITIAL_LIQUIDITY: u64 = 10_000;

/// Denominator for basis point calculations (1 basis point = 0.01%)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Maximum protocol fee on swap input (10%)
pub const MAX_PROTOCOL_FEE_BPS: u16 = 1_000;

/// Fixed-point shift for UQ112.112 prices
pub const PRICE_RESOLUTION_BITS: u32 = 112;

/// Growth fee divisor: the recipient receives 1/(GROWTH_FEE_DIVISOR + 1) of sqrt(k) growth
pub const GROWTH_FEE_DIVISOR: u128 = 5;

/// Number of emergency signers fixed at genesis
pub const EMERGENCY_SIGNER_COUNT: usize = 5;

/// Distinct valid signatures required for any emergency action
pub const EMERGENCY_QUORUM: usize = 3;

/// Upper bound on pool ids returned by a single page read
pub const MAX_POOLS_PER_PAGE: u16 = 100;

/// PDA seed prefix for pool addresses
pub const POOL_SEED_PREFIX: &[u8] = b"pool";

/// Domain separator mixed into every emergency message
pub const EMERGENCY_MESSAGE_DOMAIN: &[u8] = b"constant_product_trading:emergency:v1";
