//! Types Module
//!
//! Instruction payloads, emitted events, compliance verdicts and the
//! outcome/view structures returned to callers.

pub mod compliance;
pub mod events;
pub mod instructions;
pub mod outcomes;

// Re-export all types for easy access
pub use compliance::*;
pub use events::*;
pub use instructions::*;
pub use outcomes::*;
