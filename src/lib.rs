//! # Constant Product Trading
//!
//! A compliance-gated constant product AMM: a pool factory/router in front of
//! per-pair liquidity pools, with a 3-of-5 emergency pause.
//!
//! - `pool` owns reserves and shares, enforces the constant product and
//!   keeps the time-weighted price accumulators. Only the factory may call
//!   its mutating entry points.
//! - `processors` implement the factory: pool creation, routed swaps,
//!   liquidity, fee splitting, compliance and pause gating, and the quorum
//!   path for emergency actions and configuration.
//! - `runtime` applies each operation atomically against a `FungibleLedger`
//!   and a `ComplianceOracle`.

pub mod client_sdk;
pub mod constants;
pub mod error;
pub mod interfaces;
pub mod math;
pub mod pool;
pub mod processors;
pub mod runtime;
pub mod state;
pub mod types;
pub mod utils;

pub use constants::*;
pub use error::{AmmError, LedgerError};
pub use interfaces::{
    ComplianceOracle, FlashLedger, FlashSwapCallee, FlashSwapRequest, FungibleLedger, ReturnDataOracle,
    StaticComplianceOracle, TokenLedger,
};
pub use pool::{PoolState, PriceCumulative};
pub use runtime::Runtime;
pub use state::{FactoryState, FeeParameters, GenesisConfig};
pub use types::*;
