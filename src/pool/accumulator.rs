//! Time-weighted price accumulators
//!
//! Each pool keeps two cumulative prices in UQ112.112 fixed point. A single
//! reading is manipulable within one operation; only the difference between
//! two readings divided by the elapsed time is a usable average price.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    math::{encode_price, U256},
    pool::PoolState,
};

/// 256-bit cumulative price, little-endian limbs. Arithmetic wraps modulo 2^256.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceCumulative(pub [u64; 4]);

impl PriceCumulative {
    pub fn from_u256(value: U256) -> Self {
        Self(value.0)
    }

    pub fn to_u256(self) -> U256 {
        U256(self.0)
    }

    pub fn wrapping_add(self, increment: U256) -> Self {
        let (sum, _) = self.to_u256().overflowing_add(increment);
        Self::from_u256(sum)
    }

    /// Average UQ112.112 price between `earlier` and `self`, `elapsed`
    /// seconds apart. Correct across at most one wrap of the accumulator.
    pub fn average_since(&self, earlier: &PriceCumulative, elapsed: u64) -> Option<U256> {
        if elapsed == 0 {
            return None;
        }
        let (delta, _) = self.to_u256().overflowing_sub(earlier.to_u256());
        Some(delta / U256::from(elapsed))
    }
}

impl PoolState {
    /// Advances the accumulators over the reserves that were in effect since
    /// the last update, then records `balance_a`/`balance_b` as the new reserves.
    pub(crate) fn update_reserves(&mut self, balance_a: u64, balance_b: u64, now: i64) {
        let elapsed = now.saturating_sub(self.last_update_timestamp);
        if elapsed > 0 && self.reserve_a != 0 && self.reserve_b != 0 {
            let elapsed = U256::from(elapsed as u64);
            let (increment_a, _) =
                encode_price(self.reserve_b, self.reserve_a).overflowing_mul(elapsed);
            let (increment_b, _) =
                encode_price(self.reserve_a, self.reserve_b).overflowing_mul(elapsed);
            self.price_cumulative_a = self.price_cumulative_a.wrapping_add(increment_a);
            self.price_cumulative_b = self.price_cumulative_b.wrapping_add(increment_b);
        }

        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        if now > self.last_update_timestamp {
            self.last_update_timestamp = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PRICE_RESOLUTION_BITS;
    use solana_program::pubkey::Pubkey;

    fn q112() -> U256 {
        U256::from(1u128 << PRICE_RESOLUTION_BITS)
    }

    #[test]
    fn test_average_across_wrap_boundary() {
        let price = q112() * U256::from(4u64);
        let earlier = PriceCumulative::from_u256(U256::MAX - price + U256::from(1u64));
        let later = earlier.wrapping_add(price * U256::from(10u64));

        assert!(later.to_u256() < earlier.to_u256());
        assert_eq!(later.average_since(&earlier, 10), Some(price));
        assert_eq!(later.average_since(&earlier, 0), None);
    }

    #[test]
    fn test_update_accumulates_previous_reserves() {
        let mut pool = PoolState::new(Pubkey::new_unique(), 255, Pubkey::new_unique());
        pool.update_reserves(10_000, 40_000, 100);
        // No prior reserves, nothing accumulated
        assert_eq!(pool.price_cumulative_a(), PriceCumulative::default());
        assert_eq!(pool.last_update_timestamp(), 100);

        pool.update_reserves(20_000, 20_000, 130);
        assert_eq!(
            pool.price_cumulative_a().to_u256(),
            q112() * U256::from(4u64) * U256::from(30u64)
        );
        assert_eq!(
            pool.price_cumulative_b().to_u256(),
            q112() / U256::from(4u64) * U256::from(30u64)
        );

        // Same timestamp: reserves change, accumulators do not
        let before = pool.price_cumulative_a();
        pool.update_reserves(1, 1, 130);
        assert_eq!(pool.price_cumulative_a(), before);
        assert_eq!(pool.reserves(), (1, 1));
    }

    #[test]
    fn test_accumulator_is_monotonic_without_wrap() {
        let mut pool = PoolState::new(Pubkey::new_unique(), 255, Pubkey::new_unique());
        pool.update_reserves(5_000, 7_000, 1);
        let mut previous = pool.price_cumulative_a().to_u256();
        for step in 2..20i64 {
            pool.update_reserves(5_000 + step as u64 * 10, 7_000, step * 15);
            let current = pool.price_cumulative_a().to_u256();
            assert!(current > previous);
            previous = current;
        }
    }
}
