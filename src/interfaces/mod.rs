//! External collaborator interfaces
//!
//! The program core talks to the token ledger, the compliance oracle and
//! flash-swap borrowers only through the traits defined here.

pub mod flash;
pub mod ledger;
pub mod oracle;

pub use flash::*;
pub use ledger::*;
pub use oracle::*;
