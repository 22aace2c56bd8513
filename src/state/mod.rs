//! State Module
//!
//! Factory state plus the set of pool accounts, held together as the
//! program's account set.

pub mod factory_state;

use std::collections::BTreeMap;

use solana_program::pubkey::Pubkey;

use crate::{error::AmmError, pool::PoolState};

// Re-export all state types for easy access
pub use factory_state::*;

/// Every account the program owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramAccounts {
    pub factory: FactoryState,
    pub pools: BTreeMap<Pubkey, PoolState>,
}

impl ProgramAccounts {
    pub fn new(factory: FactoryState) -> Self {
        Self {
            factory,
            pools: BTreeMap::new(),
        }
    }

    pub fn pool(&self, pool: &Pubkey) -> Result<&PoolState, AmmError> {
        self.pools
            .get(pool)
            .ok_or(AmmError::PoolNotFound { pool: *pool })
    }

    pub fn pool_mut(&mut self, pool: &Pubkey) -> Result<&mut PoolState, AmmError> {
        self.pools
            .get_mut(pool)
            .ok_or(AmmError::PoolNotFound { pool: *pool })
    }

    /// Pool for an unordered pair.
    pub fn pool_id_for_pair(&self, token_a: &Pubkey, token_b: &Pubkey) -> Result<Pubkey, AmmError> {
        self.factory
            .pool_for_pair(token_a, token_b)
            .ok_or(AmmError::PairNotFound {
                token_a: *token_a,
                token_b: *token_b,
            })
    }
}
