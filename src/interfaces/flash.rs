//! Flash-swap borrower interface
//!
//! Borrowers are untrusted. During the callback they see the ledger only
//! through a `FlashLedger`, which can read any balance but debits nobody
//! except the borrower that requested the flash swap.

use solana_program::{msg, pubkey::Pubkey};

use crate::{error::AmmError, interfaces::FungibleLedger};

/// What a flash-swap borrower is told when its callback runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashSwapRequest {
    pub pool: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub amount_a_out: u64,
    pub amount_b_out: u64,
    pub recipient: Pubkey,
    /// The caller of the flash swap; the only account the callback may debit
    pub borrower: Pubkey,
    /// Fee the pool charges on repaid input, in basis points
    pub fee_bps: u16,
}

/// Borrower invoked by the pool after the optimistic payout.
///
/// The callee must return enough to the pool address for the constant
/// product check to pass. An `Err` aborts the whole swap.
pub trait FlashSwapCallee {
    fn on_flash_swap(
        &mut self,
        ledger: &mut FlashLedger<'_>,
        request: &FlashSwapRequest,
        data: &[u8],
    ) -> Result<(), String>;
}

/// Ledger handle lent to a flash-swap callback.
pub struct FlashLedger<'l> {
    ledger: &'l mut dyn FungibleLedger,
    borrower: Pubkey,
    rejected: Option<AmmError>,
}

impl<'l> FlashLedger<'l> {
    pub fn new(ledger: &'l mut dyn FungibleLedger, borrower: Pubkey) -> Self {
        Self {
            ledger,
            borrower,
            rejected: None,
        }
    }

    pub fn borrower(&self) -> &Pubkey {
        &self.borrower
    }

    pub fn balance_of(&self, token: &Pubkey, holder: &Pubkey) -> u64 {
        self.ledger.balance_of(token, holder)
    }

    /// Moves the borrower's own tokens. Any other `from` is refused and the
    /// refusal sticks: the pool fails the swap even if the callee swallows
    /// the error.
    pub fn transfer(
        &mut self,
        token: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u64,
    ) -> Result<(), AmmError> {
        if *from != self.borrower {
            msg!("❌ Flash callback tried to debit {} for borrower {}", from, self.borrower);
            let err = AmmError::UnauthorizedDebit {
                holder: *from,
                borrower: self.borrower,
            };
            self.rejected.get_or_insert_with(|| err.clone());
            return Err(err);
        }
        Ok(self.ledger.transfer(token, from, to, amount)?)
    }

    /// The first refused debit, if any.
    pub fn into_rejection(self) -> Option<AmmError> {
        self.rejected
    }
}
