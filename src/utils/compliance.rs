//! Compliance gate
//!
//! Only a `Compliant` verdict lets value move. `NonCompliant` and
//! `CheckFailed` both surface as `ComplianceDenied`.

use solana_program::{msg, pubkey::Pubkey};

use crate::{error::AmmError, interfaces::ComplianceOracle};

pub fn require_compliant(
    oracle: &dyn ComplianceOracle,
    participant: &Pubkey,
    token: &Pubkey,
) -> Result<(), AmmError> {
    let report = oracle.check_compliance(participant, token);
    if report.is_compliant() {
        return Ok(());
    }
    msg!(
        "🚫 Compliance denied: {} on {} ({:?}: {})",
        participant,
        token,
        report.verdict,
        report.reason
    );
    Err(AmmError::ComplianceDenied {
        participant: *participant,
        token: *token,
        verdict: report.verdict,
        reason: report.reason,
    })
}

/// Checks `caller` for every token, and `recipient` for the tokens it
/// receives when it is a different identity.
pub fn require_parties_compliant(
    oracle: &dyn ComplianceOracle,
    caller: &Pubkey,
    caller_tokens: &[&Pubkey],
    recipient: &Pubkey,
    recipient_tokens: &[&Pubkey],
) -> Result<(), AmmError> {
    for token in caller_tokens {
        require_compliant(oracle, caller, token)?;
    }
    if recipient != caller {
        for token in recipient_tokens {
            require_compliant(oracle, recipient, token)?;
        }
    }
    Ok(())
}
