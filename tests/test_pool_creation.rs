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

//! Pool creation, registry lookups, the pool-creator allow-list and pool
//! pagination.

mod common;

use borsh::BorshDeserialize;
use common::*;
use constant_product_trading::{
    types::{AmmEvent, FactoryInstruction, InstructionOutcome},
    AmmError,
};
use solana_program::pubkey::Pubkey;

#[test]
fn test_deployer_creates_pool_at_derived_address() {
    let mut env = start_test_environment();
    let deployer = env.deployer;

    let pool = env
        .runtime
        .create_pool(&deployer, &env.token_b, &env.token_a)
        .unwrap();

    let (expected, _bump) = env.client.derive_pool_address(&env.token_a, &env.token_b);
    assert_eq!(pool, expected);
    assert_eq!(env.client.derive_pool_address(&env.token_b, &env.token_a).0, expected);
    assert_eq!(env.runtime.pool_for_pair(&env.token_a, &env.token_b), Some(pool));
    assert_eq!(env.runtime.pool_for_pair(&env.token_b, &env.token_a), Some(pool));

    let info = env.runtime.pool_info(&pool).unwrap();
    assert_eq!(info.token_a, env.token_a);
    assert_eq!(info.token_b, env.token_b);
    assert_eq!((info.reserve_a, info.reserve_b), (0, 0));
    assert_eq!(info.total_shares, 0);
    assert!(!info.pool_paused);

    let stored = env.runtime.accounts().pool(&pool).unwrap();
    assert!(stored.is_initialized());
    assert_eq!(stored.factory(), &env.program_id());

    assert_eq!(
        env.runtime.events(),
        &[AmmEvent::PoolCreated {
            pool,
            token_a: env.token_a,
            token_b: env.token_b,
            creator: deployer,
            pool_index: 0,
        }]
    );
}

#[test]
fn test_duplicate_pair_rejected_in_either_order() {
    let mut env = start_test_environment();
    let deployer = env.deployer;
    let pool = env
        .runtime
        .create_pool(&deployer, &env.token_a, &env.token_b)
        .unwrap();

    let result = env.runtime.create_pool(&deployer, &env.token_b, &env.token_a);
    assert_eq!(
        result,
        Err(AmmError::PoolAlreadyExists {
            token_a: env.token_a,
            token_b: env.token_b,
            pool,
        })
    );
    assert_eq!(env.runtime.pools_page(0, 10).unwrap().total, 1);
}

#[test]
fn test_invalid_token_pairs_rejected() {
    let mut env = start_test_environment();
    let deployer = env.deployer;

    let same = env.runtime.create_pool(&deployer, &env.token_a, &env.token_a);
    assert!(matches!(same, Err(AmmError::InvalidTokenPair { .. })));

    let null = env
        .runtime
        .create_pool(&deployer, &env.token_a, &Pubkey::default());
    assert!(matches!(null, Err(AmmError::InvalidTokenPair { .. })));

    assert!(env.runtime.events().is_empty());
}

#[test]
fn test_pool_creator_allow_list() {
    let mut env = start_test_environment();
    let alice = env.alice;

    assert!(!env.runtime.is_allowed_creator(&alice));
    assert_eq!(
        env.runtime.create_pool(&alice, &env.token_a, &env.token_b),
        Err(AmmError::NotAllowedCreator { caller: alice })
    );

    env.set_pool_creator(&alice, true).unwrap();
    assert!(env.runtime.is_allowed_creator(&alice));
    assert_eq!(env.runtime.emergency_nonce(), 1);
    env.runtime
        .create_pool(&alice, &env.token_a, &env.token_b)
        .unwrap();

    env.set_pool_creator(&alice, false).unwrap();
    let token_c = env.create_funded_token();
    assert_eq!(
        env.runtime.create_pool(&alice, &env.token_a, &token_c),
        Err(AmmError::NotAllowedCreator { caller: alice })
    );
}

#[test]
fn test_null_pool_creator_rejected() {
    let mut env = start_test_environment();
    let result = env.set_pool_creator(&Pubkey::default(), true);
    assert_eq!(
        result,
        Err(AmmError::InvalidRecipient {
            recipient: Pubkey::default()
        })
    );
    // Rolled back, nonce not consumed
    assert_eq!(env.runtime.emergency_nonce(), 0);
}

#[test]
fn test_pools_page_pagination() {
    let mut env = start_test_environment();
    let deployer = env.deployer;

    let mut created = Vec::new();
    for _ in 0..3 {
        let token = Pubkey::new_unique();
        created.push(env.runtime.create_pool(&deployer, &env.token_a, &token).unwrap());
    }

    let first = env.runtime.pools_page(0, 2).unwrap();
    assert_eq!(first.pools, created[..2].to_vec());
    assert_eq!(first.total, 3);
    assert_eq!(first.next_offset, Some(2));

    let second = env.runtime.pools_page(2, 2).unwrap();
    assert_eq!(second.pools, created[2..].to_vec());
    assert_eq!(second.next_offset, None);

    let beyond = env.runtime.pools_page(10, 2).unwrap();
    assert!(beyond.pools.is_empty());
    assert_eq!(beyond.next_offset, None);

    assert!(matches!(
        env.runtime.pools_page(0, 0),
        Err(AmmError::ZeroAmount { .. })
    ));
}

#[test]
fn test_create_pool_through_encoded_instruction() {
    let mut env = start_test_environment();
    let deployer = env.deployer;
    let data = env
        .client
        .create_pool_data(&env.token_a, &env.token_b)
        .unwrap();

    let encoded = env.runtime.process_instruction(&deployer, &data).unwrap();
    let outcome = InstructionOutcome::try_from_slice(&encoded).unwrap();

    let (expected, _) = env.client.derive_pool_address(&env.token_a, &env.token_b);
    assert_eq!(outcome, InstructionOutcome::PoolCreated { pool: expected });

    let instruction = env
        .client
        .build_instruction(&deployer, &FactoryInstruction::GetFeeParameters)
        .unwrap();
    assert_eq!(instruction.program_id, env.program_id());
    let encoded = env
        .runtime
        .process_instruction(&deployer, &instruction.data)
        .unwrap();
    assert_eq!(
        InstructionOutcome::try_from_slice(&encoded).unwrap(),
        InstructionOutcome::FeeParameters(env.runtime.fee_parameters().clone())
    );
}

#[test]
fn test_malformed_instruction_data_rejected() {
    let mut env = start_test_environment();
    let deployer = env.deployer;
    assert_eq!(
        env.runtime.process_instruction(&deployer, &[0xff, 0x01]),
        Err(AmmError::InvalidInstruction)
    );
}
