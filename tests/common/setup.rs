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

//! # Test Environment Setup Utilities
//!
//! Builds a runtime over a funded ledger, five emergency signers and a
//! genesis configuration, plus quorum helpers that sign with those signers.

use constant_product_trading::{
    client_sdk::PoolClient,
    types::{EmergencyAction, EmergencyApproval, PauseTarget},
    AmmError, GenesisConfig, Runtime, StaticComplianceOracle, TokenLedger,
};
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

use crate::common::tokens::TestLedger;

pub const INITIAL_BALANCE: u64 = 1_000_000_000;
pub const PROTOCOL_FEE_BPS: u16 = 30;
pub const LP_FEE_SHARE_BPS: u16 = 5_000;
pub const FAR_DEADLINE: i64 = i64::MAX;

/// Signer indices used for a standard 3-of-5 approval.
pub const QUORUM: [usize; 3] = [0, 1, 2];

/// Genesis knobs the tests vary.
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub protocol_fee_bps: u16,
    pub lp_fee_share_bps: u16,
    pub growth_fee: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            protocol_fee_bps: PROTOCOL_FEE_BPS,
            lp_fee_share_bps: LP_FEE_SHARE_BPS,
            growth_fee: false,
        }
    }
}

/// Test environment context
///
/// `token_a < token_b`, so the harness tokens are already in pool order.
pub struct TestEnvironment<L = TokenLedger> {
    pub runtime: Runtime<L, StaticComplianceOracle>,
    pub client: PoolClient,
    pub deployer: Pubkey,
    pub signers: Vec<Keypair>,
    pub fee_vault: Pubkey,
    pub growth_fee_recipient: Option<Pubkey>,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub alice: Pubkey,
    pub bob: Pubkey,
}

/// Start a basic test environment over an exact `TokenLedger`.
pub fn start_test_environment() -> TestEnvironment<TokenLedger> {
    start_test_environment_with(EnvironmentConfig::default())
}

/// Start a test environment with custom genesis knobs over any test ledger.
///
/// Deployer, alice and bob hold `INITIAL_BALANCE` of both tokens and have
/// approved the program as spender.
pub fn start_test_environment_with<L: TestLedger>(config: EnvironmentConfig) -> TestEnvironment<L> {
    let _ = env_logger::builder().is_test(true).try_init();

    let program_id = Pubkey::new_unique();
    let deployer = Pubkey::new_unique();
    let fee_vault = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    let growth_fee_recipient = config.growth_fee.then(Pubkey::new_unique);

    let first = Pubkey::new_unique();
    let second = Pubkey::new_unique();
    let (token_a, token_b) = if first < second { (first, second) } else { (second, first) };

    let signers: Vec<Keypair> = (0..5).map(|_| Keypair::new()).collect();
    let emergency_signers = [
        signers[0].pubkey(),
        signers[1].pubkey(),
        signers[2].pubkey(),
        signers[3].pubkey(),
        signers[4].pubkey(),
    ];

    let mut ledger = L::default();
    for token in [token_a, token_b] {
        ledger.register_token(token);
        for holder in [deployer, alice, bob] {
            ledger.fund(&token, &holder, INITIAL_BALANCE);
            ledger.approve_spender(&token, &holder, &program_id, u64::MAX);
        }
    }

    let genesis = GenesisConfig {
        deployer,
        emergency_signers,
        protocol_fee_bps: config.protocol_fee_bps,
        lp_fee_share_bps: config.lp_fee_share_bps,
        fee_vault,
        growth_fee_recipient,
    };
    let runtime = Runtime::new(program_id, &genesis, ledger, StaticComplianceOracle::new())
        .expect("genesis should be valid");

    TestEnvironment {
        runtime,
        client: PoolClient::new(program_id),
        deployer,
        signers,
        fee_vault,
        growth_fee_recipient,
        token_a,
        token_b,
        alice,
        bob,
    }
}

impl<L: TestLedger> TestEnvironment<L> {
    pub fn program_id(&self) -> Pubkey {
        *self.runtime.program_id()
    }

    pub fn next_nonce(&self) -> u64 {
        self.runtime.emergency_nonce() + 1
    }

    pub fn balance(&self, token: &Pubkey, holder: &Pubkey) -> u64 {
        self.runtime.ledger().balance_of(token, holder)
    }

    pub fn reserves(&self, pool: &Pubkey) -> (u64, u64) {
        let info = self.runtime.pool_info(pool).unwrap();
        (info.reserve_a, info.reserve_b)
    }

    /// Approvals from the signers at `indices` for `action` at `nonce`.
    pub fn approvals(
        &self,
        action: &EmergencyAction,
        nonce: u64,
        indices: &[usize],
    ) -> Vec<EmergencyApproval> {
        let keypairs: Vec<&Keypair> = indices.iter().map(|&i| &self.signers[i]).collect();
        self.client
            .sign_emergency_action(action, nonce, &keypairs)
            .unwrap()
    }

    /// Pauses `target` with a fresh 3-of-5 quorum, relayed by a stranger.
    pub fn pause(&mut self, target: PauseTarget) -> Result<(), AmmError> {
        let nonce = self.next_nonce();
        let approvals = self.approvals(&EmergencyAction::Pause(target), nonce, &QUORUM);
        self.runtime
            .emergency_pause(&Pubkey::new_unique(), target, nonce, &approvals)
    }

    pub fn unpause(&mut self, target: PauseTarget) -> Result<(), AmmError> {
        let nonce = self.next_nonce();
        let approvals = self.approvals(&EmergencyAction::Unpause(target), nonce, &QUORUM);
        self.runtime
            .emergency_unpause(&Pubkey::new_unique(), target, nonce, &approvals)
    }

    pub fn set_pool_creator(&mut self, creator: &Pubkey, allowed: bool) -> Result<(), AmmError> {
        let nonce = self.next_nonce();
        let action = EmergencyAction::SetPoolCreator {
            creator: *creator,
            allowed,
        };
        let approvals = self.approvals(&action, nonce, &QUORUM);
        self.runtime
            .set_pool_creator(&Pubkey::new_unique(), creator, allowed, nonce, &approvals)
    }

    /// Registers, funds and approves an extra token for alice, bob and the deployer.
    pub fn create_funded_token(&mut self) -> Pubkey {
        let token = Pubkey::new_unique();
        let program_id = self.program_id();
        let holders = [self.deployer, self.alice, self.bob];
        let ledger = self.runtime.ledger_mut();
        ledger.register_token(token);
        for holder in holders {
            ledger.fund(&token, &holder, INITIAL_BALANCE);
            ledger.approve_spender(&token, &holder, &program_id, u64::MAX);
        }
        token
    }
}
