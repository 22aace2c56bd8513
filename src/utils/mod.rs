//! Utility Functions
//!
//! Shared checks used by the factory processors and the pools: input
//! validation, fee arithmetic, pause and compliance gates, emergency quorum
//! verification and measured token transfers.

pub mod compliance;
pub mod fee_validation;
pub mod quorum;
pub mod system_pause_compliance;
pub mod token_transfers;
pub mod validation;

// Re-export commonly used items for convenience
pub use compliance::*;
pub use fee_validation::*;
pub use quorum::*;
pub use system_pause_compliance::*;
pub use token_transfers::*;
pub use validation::*;
