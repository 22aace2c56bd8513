//! Measured Token Transfers
//!
//! Every token movement made by the factory or a pool is bracketed by
//! balance snapshots of both sides. The move is accepted only when the
//! sender lost exactly the requested amount and the receiver gained exactly
//! the requested amount. Fee-on-transfer, rebasing or otherwise
//! non-standard tokens therefore fail with `UnsupportedToken` instead of
//! silently corrupting reserve accounting.

use solana_program::{msg, pubkey::Pubkey};

use crate::{error::AmmError, interfaces::FungibleLedger};

/// A holder's balance of one token captured before an external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub token: Pubkey,
    pub holder: Pubkey,
    pub balance: u64,
}

impl BalanceSnapshot {
    pub fn capture(ledger: &dyn FungibleLedger, token: &Pubkey, holder: &Pubkey) -> Self {
        Self {
            token: *token,
            holder: *holder,
            balance: ledger.balance_of(token, holder),
        }
    }

    /// Signed change since capture, positive when the balance grew.
    pub fn delta(&self, ledger: &dyn FungibleLedger) -> i128 {
        ledger.balance_of(&self.token, &self.holder) as i128 - self.balance as i128
    }

    /// Requires the balance to have changed by exactly `expected_change`.
    pub fn validate_change(
        &self,
        ledger: &dyn FungibleLedger,
        expected_change: i128,
        operation_name: &str,
    ) -> Result<(), AmmError> {
        let actual_change = self.delta(ledger);
        if actual_change != expected_change {
            msg!(
                "❌ BALANCE CHECK FAILED ({}): {} on token {} changed by {}, expected {}",
                operation_name,
                self.holder,
                self.token,
                actual_change,
                expected_change
            );
            return Err(AmmError::UnsupportedToken {
                token: self.token,
                expected: expected_change.unsigned_abs().min(u64::MAX as u128) as u64,
                actual: actual_change.unsigned_abs().min(u64::MAX as u128) as u64,
            });
        }
        Ok(())
    }
}

/// `ledger.transfer` with both sides measured.
pub fn transfer_exact(
    ledger: &mut dyn FungibleLedger,
    token: &Pubkey,
    from: &Pubkey,
    to: &Pubkey,
    amount: u64,
) -> Result<(), AmmError> {
    if amount == 0 {
        return Ok(());
    }
    let (sender, receiver) = capture_pair(ledger, token, from, to);
    ledger.transfer(token, from, to, amount)?;
    validate_pair(ledger, &sender, &receiver, amount, "transfer")
}

/// `ledger.transfer_from` with both sides measured.
pub fn transfer_from_exact(
    ledger: &mut dyn FungibleLedger,
    token: &Pubkey,
    spender: &Pubkey,
    from: &Pubkey,
    to: &Pubkey,
    amount: u64,
) -> Result<(), AmmError> {
    if amount == 0 {
        return Ok(());
    }
    let (sender, receiver) = capture_pair(ledger, token, from, to);
    ledger.transfer_from(token, spender, from, to, amount)?;
    validate_pair(ledger, &sender, &receiver, amount, "transfer_from")
}

fn capture_pair(
    ledger: &dyn FungibleLedger,
    token: &Pubkey,
    from: &Pubkey,
    to: &Pubkey,
) -> (BalanceSnapshot, BalanceSnapshot) {
    (
        BalanceSnapshot::capture(ledger, token, from),
        BalanceSnapshot::capture(ledger, token, to),
    )
}

fn validate_pair(
    ledger: &dyn FungibleLedger,
    sender: &BalanceSnapshot,
    receiver: &BalanceSnapshot,
    amount: u64,
    operation_name: &str,
) -> Result<(), AmmError> {
    if sender.holder == receiver.holder {
        return sender.validate_change(ledger, 0, operation_name);
    }
    receiver.validate_change(ledger, amount as i128, operation_name)?;
    sender.validate_change(ledger, -(amount as i128), operation_name)
}
