//! Host runtime
//!
//! `Runtime` owns the program accounts, the token ledger, the compliance
//! oracle, the clock and the committed event log. Each externally invoked
//! operation runs as one atomic transition: accounts and ledger are
//! snapshotted first and restored if the operation returns an error, in
//! which case its events are dropped too.
//!
//! ## On-chain mapping
//!
//! | Host                        | Cluster                                        |
//! |-----------------------------|------------------------------------------------|
//! | `Runtime::process_instruction` | one transaction calling `processors::process_instruction` |
//! | `caller`                    | the transaction's signer                       |
//! | `ProgramAccounts`           | factory and pool state accounts                |
//! | `FungibleLedger`            | token program CPIs                             |
//! | snapshot / restore          | the bank discarding a failed transaction       |
//! | `EventLog`                  | `sol_log_data` entries in the transaction log  |

use borsh::BorshSerialize;
use log::{debug, warn};
use solana_program::{clock::Clock, pubkey::Pubkey};

use crate::{
    error::AmmError,
    interfaces::{ComplianceOracle, FlashSwapCallee, FungibleLedger},
    pool::SwapArgs,
    processors,
    state::{FactoryState, FeeParameters, GenesisConfig, ProgramAccounts},
    types::{
        AddLiquidityParams, AmmEvent, EmergencyApproval, EventLog, FlashSwapOutcome,
        FlashSwapParams, LiquidityOutcome, PauseTarget,
        PoolInfo, PoolInstruction, PoolPage, RemoveLiquidityParams, SkimOutcome, SwapOutcome,
        SwapParams, SwapQuote,
    },
};

/// What a pool entry point may touch: the ledger, the clock and the event
/// log of the running operation.
pub struct InvokeContext<'a> {
    pub ledger: &'a mut dyn FungibleLedger,
    pub clock: &'a Clock,
    pub events: &'a mut EventLog,
}

impl InvokeContext<'_> {
    pub fn now(&self) -> i64 {
        self.clock.unix_timestamp
    }
}

/// What a factory processor may touch: the pool context plus the compliance
/// oracle and the program's own identity.
pub struct FactoryContext<'a> {
    pub program_id: Pubkey,
    pub oracle: &'a dyn ComplianceOracle,
    pub invoke: InvokeContext<'a>,
}

impl FactoryContext<'_> {
    pub fn now(&self) -> i64 {
        self.invoke.now()
    }
}

pub struct Runtime<L, O> {
    program_id: Pubkey,
    accounts: ProgramAccounts,
    ledger: L,
    oracle: O,
    clock: Clock,
    events: EventLog,
}

impl<L, O> Runtime<L, O>
where
    L: FungibleLedger + Clone,
    O: ComplianceOracle,
{
    pub fn new(
        program_id: Pubkey,
        genesis: &GenesisConfig,
        ledger: L,
        oracle: O,
    ) -> Result<Self, AmmError> {
        let factory = FactoryState::from_genesis(genesis)?;
        debug!("runtime created for program {}", program_id);
        Ok(Self {
            program_id,
            accounts: ProgramAccounts::new(factory),
            ledger,
            oracle,
            clock: Clock::default(),
            events: EventLog::new(),
        })
    }

    /// Runs `operation` atomically.
    fn execute<T>(
        &mut self,
        name: &str,
        caller: &Pubkey,
        operation: impl FnOnce(&mut ProgramAccounts, &mut FactoryContext) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        let accounts_snapshot = self.accounts.clone();
        let ledger_snapshot = self.ledger.clone();
        let mut pending = EventLog::new();

        let result = {
            let mut ctx = FactoryContext {
                program_id: self.program_id,
                oracle: &self.oracle,
                invoke: InvokeContext {
                    ledger: &mut self.ledger,
                    clock: &self.clock,
                    events: &mut pending,
                },
            };
            operation(&mut self.accounts, &mut ctx)
        };

        match result {
            Ok(value) => {
                debug!(
                    "{} by {} committed with {} event(s)",
                    name,
                    caller,
                    pending.len()
                );
                self.events.append(&mut pending);
                Ok(value)
            }
            Err(err) => {
                if err.is_authorization_failure() {
                    warn!("{} by {} rejected: {}", name, caller, err);
                } else {
                    debug!("{} by {} reverted: {}", name, caller, err);
                }
                self.accounts = accounts_snapshot;
                self.ledger = ledger_snapshot;
                Err(err)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Factory operations
    // ---------------------------------------------------------------------

    pub fn create_pool(
        &mut self,
        caller: &Pubkey,
        token_a: &Pubkey,
        token_b: &Pubkey,
    ) -> Result<Pubkey, AmmError> {
        self.execute("create_pool", caller, |accounts, ctx| {
            processors::process_create_pool(accounts, ctx, caller, token_a, token_b)
        })
    }

    pub fn swap(&mut self, caller: &Pubkey, params: &SwapParams) -> Result<SwapOutcome, AmmError> {
        self.execute("swap", caller, |accounts, ctx| {
            processors::process_swap(accounts, ctx, caller, params)
        })
    }

    pub fn flash_swap(
        &mut self,
        caller: &Pubkey,
        params: &FlashSwapParams,
        callee: &mut dyn FlashSwapCallee,
    ) -> Result<FlashSwapOutcome, AmmError> {
        self.execute("flash_swap", caller, |accounts, ctx| {
            processors::process_flash_swap(accounts, ctx, caller, params, callee)
        })
    }

    pub fn add_liquidity(
        &mut self,
        caller: &Pubkey,
        params: &AddLiquidityParams,
    ) -> Result<LiquidityOutcome, AmmError> {
        self.execute("add_liquidity", caller, |accounts, ctx| {
            processors::process_add_liquidity(accounts, ctx, caller, params)
        })
    }

    pub fn remove_liquidity(
        &mut self,
        caller: &Pubkey,
        params: &RemoveLiquidityParams,
    ) -> Result<LiquidityOutcome, AmmError> {
        self.execute("remove_liquidity", caller, |accounts, ctx| {
            processors::process_remove_liquidity(accounts, ctx, caller, params)
        })
    }

    pub fn skim(
        &mut self,
        caller: &Pubkey,
        pool: &Pubkey,
        recipient: &Pubkey,
    ) -> Result<SkimOutcome, AmmError> {
        self.execute("skim", caller, |accounts, ctx| {
            processors::process_skim(accounts, ctx, caller, pool, recipient)
        })
    }

    pub fn transfer_shares(
        &mut self,
        caller: &Pubkey,
        pool: &Pubkey,
        recipient: &Pubkey,
        amount: u64,
    ) -> Result<(), AmmError> {
        self.execute("transfer_shares", caller, |accounts, ctx| {
            processors::process_transfer_shares(accounts, ctx, caller, pool, recipient, amount)
        })
    }

    /// Permissionless reserve reconciliation. Not pause-gated.
    pub fn sync(&mut self, caller: &Pubkey, pool: &Pubkey) -> Result<(), AmmError> {
        self.execute("sync", caller, |accounts, ctx| {
            accounts.pool_mut(pool)?.sync(&mut ctx.invoke)
        })
    }

    // ---------------------------------------------------------------------
    // Quorum path
    // ---------------------------------------------------------------------

    pub fn emergency_pause(
        &mut self,
        caller: &Pubkey,
        target: PauseTarget,
        nonce: u64,
        approvals: &[EmergencyApproval],
    ) -> Result<(), AmmError> {
        self.execute("emergency_pause", caller, |accounts, ctx| {
            processors::process_emergency_pause(accounts, ctx, caller, target, nonce, approvals)
        })
    }

    pub fn emergency_unpause(
        &mut self,
        caller: &Pubkey,
        target: PauseTarget,
        nonce: u64,
        approvals: &[EmergencyApproval],
    ) -> Result<(), AmmError> {
        self.execute("emergency_unpause", caller, |accounts, ctx| {
            processors::process_emergency_unpause(accounts, ctx, caller, target, nonce, approvals)
        })
    }

    pub fn set_pool_creator(
        &mut self,
        caller: &Pubkey,
        creator: &Pubkey,
        allowed: bool,
        nonce: u64,
        approvals: &[EmergencyApproval],
    ) -> Result<(), AmmError> {
        self.execute("set_pool_creator", caller, |accounts, ctx| {
            processors::process_set_pool_creator(accounts, ctx, creator, allowed, nonce, approvals)
        })
    }

    pub fn set_fee_parameters(
        &mut self,
        caller: &Pubkey,
        protocol_fee_bps: u16,
        lp_fee_share_bps: u16,
        nonce: u64,
        approvals: &[EmergencyApproval],
    ) -> Result<(), AmmError> {
        self.execute("set_fee_parameters", caller, |accounts, ctx| {
            processors::process_set_fee_parameters(
                accounts,
                ctx,
                protocol_fee_bps,
                lp_fee_share_bps,
                nonce,
                approvals,
            )
        })
    }

    // ---------------------------------------------------------------------
    // Encoded command surface
    // ---------------------------------------------------------------------

    /// Runs one encoded instruction as a transaction and returns the
    /// borsh-encoded `InstructionOutcome`.
    pub fn process_instruction(&mut self, caller: &Pubkey, data: &[u8]) -> Result<Vec<u8>, AmmError> {
        let program_id = self.program_id;
        let outcome = self.execute("process_instruction", caller, |accounts, ctx| {
            processors::process_instruction(&program_id, caller, accounts, ctx, data)
        })?;
        Ok(outcome.try_to_vec()?)
    }

    /// Calls a pool entry point directly, outside the factory.
    ///
    /// External callers can never act as the program itself, so every
    /// factory-only entry point fails with `NotFactory`; only `Sync` succeeds.
    pub fn invoke_pool(
        &mut self,
        caller: &Pubkey,
        pool: &Pubkey,
        instruction: &PoolInstruction,
    ) -> Result<(), AmmError> {
        if *caller == self.program_id {
            return Err(AmmError::NotFactory { caller: *caller });
        }
        self.execute("invoke_pool", caller, |accounts, ctx| {
            let growth_fee_to = accounts.factory.growth_fee_recipient;
            let pool = accounts.pool_mut(pool)?;
            match instruction {
                PoolInstruction::Mint { recipient } => pool
                    .mint(caller, recipient, growth_fee_to.as_ref(), &mut ctx.invoke)
                    .map(|_| ()),
                PoolInstruction::Burn { recipient } => pool
                    .burn(caller, recipient, growth_fee_to.as_ref(), &mut ctx.invoke)
                    .map(|_| ()),
                PoolInstruction::Swap {
                    amount_a_out,
                    amount_b_out,
                    recipient,
                } => pool
                    .swap(
                        caller,
                        SwapArgs {
                            amount_a_out: *amount_a_out,
                            amount_b_out: *amount_b_out,
                            recipient: *recipient,
                            fee_bps: 0,
                        },
                        None,
                        &mut ctx.invoke,
                    )
                    .map(|_| ()),
                PoolInstruction::Skim { recipient } => {
                    pool.skim(caller, recipient, &mut ctx.invoke).map(|_| ())
                }
                PoolInstruction::Sync => pool.sync(&mut ctx.invoke),
            }
        })
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn pool_info(&self, pool: &Pubkey) -> Result<PoolInfo, AmmError> {
        processors::pool_info(&self.accounts, pool)
    }

    pub fn pools_page(&self, offset: u64, limit: u16) -> Result<PoolPage, AmmError> {
        processors::pools_page(&self.accounts.factory, offset, limit)
    }

    pub fn quote_swap(
        &self,
        token_in: &Pubkey,
        token_out: &Pubkey,
        amount_in: u64,
    ) -> Result<SwapQuote, AmmError> {
        processors::quote_swap(&self.accounts, token_in, token_out, amount_in)
    }

    pub fn fee_parameters(&self) -> &FeeParameters {
        &self.accounts.factory.fees
    }

    pub fn pool_for_pair(&self, token_a: &Pubkey, token_b: &Pubkey) -> Option<Pubkey> {
        self.accounts.factory.pool_for_pair(token_a, token_b)
    }

    pub fn share_balance(&self, pool: &Pubkey, holder: &Pubkey) -> Result<u64, AmmError> {
        Ok(self.accounts.pool(pool)?.share_balance_of(holder))
    }

    pub fn is_globally_paused(&self) -> bool {
        self.accounts.factory.global_paused
    }

    pub fn is_pool_paused(&self, pool: &Pubkey) -> bool {
        self.accounts.factory.paused_pools.contains(pool)
    }

    pub fn is_allowed_creator(&self, creator: &Pubkey) -> bool {
        self.accounts.factory.is_allowed_creator(creator)
    }

    pub fn emergency_nonce(&self) -> u64 {
        self.accounts.factory.emergency_nonce
    }

    pub fn factory(&self) -> &FactoryState {
        &self.accounts.factory
    }

    pub fn accounts(&self) -> &ProgramAccounts {
        &self.accounts
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    // ---------------------------------------------------------------------
    // Host environment
    // ---------------------------------------------------------------------

    /// Events of every committed operation since the last `take_events`,
    /// oldest first.
    ///
    /// The committed log is not bounded. Long-running hosts must drain it
    /// with `take_events`, the way an indexer consumes transaction logs.
    pub fn events(&self) -> &[AmmEvent] {
        self.events.events()
    }

    /// Drains the committed log.
    pub fn take_events(&mut self) -> Vec<AmmEvent> {
        self.events.take()
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Direct ledger access for token operations outside the program
    /// (minting, approvals, donations).
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn set_unix_timestamp(&mut self, unix_timestamp: i64) {
        self.clock.unix_timestamp = unix_timestamp;
    }

    pub fn advance_clock(&mut self, seconds: i64) {
        self.clock.unix_timestamp = self.clock.unix_timestamp.saturating_add(seconds);
        self.clock.slot = self.clock.slot.saturating_add(1);
    }
}
