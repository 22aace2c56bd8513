//! Pool Creation Processors
//!
//! One pool per unordered token pair. The pool id is the program-derived
//! address over `[POOL_SEED_PREFIX, token_a, token_b]` with the pair sorted,
//! so anyone can compute it off-chain.

use solana_program::{msg, pubkey::Pubkey};

use crate::{
    error::AmmError,
    pool::PoolState,
    runtime::FactoryContext,
    state::ProgramAccounts,
    types::AmmEvent,
    utils::validation::{derive_pool_address, sort_tokens, validate_token_pair},
};

/// Creates and registers the pool for a token pair.
///
/// # How It Works
/// 1. **Creator Check**: caller must be on the pool-creator allow-list
/// 2. **Pair Validation**: rejects null or identical tokens
/// 3. **Duplicate Check**: one pool per unordered pair
/// 4. **Address Derivation**: PDA over the sorted pair
/// 5. **Initialization**: binds the pool to its tokens with the factory as owner
/// 6. **Registration**: appends to the registry and the pool list
///
/// # Returns
/// * The new pool id
pub fn process_create_pool(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    caller: &Pubkey,
    token_a: &Pubkey,
    token_b: &Pubkey,
) -> Result<Pubkey, AmmError> {
    msg!("Processing CreatePool: {} / {}", token_a, token_b);

    if !accounts.factory.is_allowed_creator(caller) {
        msg!("❌ {} is not an allowed pool creator", caller);
        return Err(AmmError::NotAllowedCreator { caller: *caller });
    }

    create_registered_pool(accounts, ctx, caller, token_a, token_b)
}

/// Creation without the allow-list check; callers have already authorized.
pub(crate) fn create_registered_pool(
    accounts: &mut ProgramAccounts,
    ctx: &mut FactoryContext,
    creator: &Pubkey,
    token_a: &Pubkey,
    token_b: &Pubkey,
) -> Result<Pubkey, AmmError> {
    validate_token_pair(token_a, token_b)?;
    let (first, second) = sort_tokens(token_a, token_b);

    if let Some(existing) = accounts.factory.pool_for_pair(&first, &second) {
        msg!("❌ Pool already exists for this pair: {}", existing);
        return Err(AmmError::PoolAlreadyExists {
            token_a: first,
            token_b: second,
            pool: existing,
        });
    }

    let (address, bump) = derive_pool_address(&ctx.program_id, &first, &second);
    let mut pool = PoolState::new(address, bump, ctx.program_id);
    pool.initialize(&ctx.program_id, &first, &second)?;

    let pool_index = accounts.factory.pool_list.len() as u64;
    accounts.pools.insert(address, pool);
    accounts.factory.pool_registry.insert((first, second), address);
    accounts.factory.pool_list.push(address);

    msg!("✅ Pool #{} created at {} (bump {})", pool_index, address, bump);
    ctx.invoke.events.emit(AmmEvent::PoolCreated {
        pool: address,
        token_a: first,
        token_b: second,
        creator: *creator,
        pool_index,
    });
    Ok(address)
}
