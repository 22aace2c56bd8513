//! Compliance oracle interfaces

use std::collections::BTreeSet;

use solana_program::pubkey::Pubkey;

use crate::types::ComplianceReport;

/// Answers whether `participant` may move value in `token`.
///
/// Consulted by the factory only. Anything other than a compliant verdict,
/// including an oracle that cannot answer, blocks the operation.
pub trait ComplianceOracle {
    fn check_compliance(&self, participant: &Pubkey, token: &Pubkey) -> ComplianceReport;
}

/// Oracle driven by in-memory allow/deny lists.
///
/// Everyone is compliant unless listed. `failing` participants produce
/// `CheckFailed`; `offline` makes every check fail.
#[derive(Debug, Clone, Default)]
pub struct StaticComplianceOracle {
    denied: BTreeSet<Pubkey>,
    denied_pairs: BTreeSet<(Pubkey, Pubkey)>,
    failing: BTreeSet<Pubkey>,
    offline: bool,
}

impl StaticComplianceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny(&mut self, participant: Pubkey) {
        self.denied.insert(participant);
    }

    pub fn deny_token(&mut self, participant: Pubkey, token: Pubkey) {
        self.denied_pairs.insert((participant, token));
    }

    pub fn fail_checks_for(&mut self, participant: Pubkey) {
        self.failing.insert(participant);
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Removes every listing for `participant`.
    pub fn clear(&mut self, participant: &Pubkey) {
        self.denied.remove(participant);
        self.failing.remove(participant);
        self.denied_pairs.retain(|(p, _)| p != participant);
    }
}

impl ComplianceOracle for StaticComplianceOracle {
    fn check_compliance(&self, participant: &Pubkey, token: &Pubkey) -> ComplianceReport {
        if self.offline {
            return ComplianceReport::check_failed("oracle offline");
        }
        if self.failing.contains(participant) {
            return ComplianceReport::check_failed("record lookup failed");
        }
        if self.denied.contains(participant) {
            return ComplianceReport::non_compliant("participant denied");
        }
        if self.denied_pairs.contains(&(*participant, *token)) {
            return ComplianceReport::non_compliant("participant denied for token");
        }
        ComplianceReport::compliant()
    }
}

/// Adapter for oracles that answer with raw `[verdict_code, reason...]`
/// return data. `None` (no return data) fails closed.
pub struct ReturnDataOracle<F>
where
    F: Fn(&Pubkey, &Pubkey) -> Option<Vec<u8>>,
{
    query: F,
}

impl<F> ReturnDataOracle<F>
where
    F: Fn(&Pubkey, &Pubkey) -> Option<Vec<u8>>,
{
    pub fn new(query: F) -> Self {
        Self { query }
    }
}

impl<F> ComplianceOracle for ReturnDataOracle<F>
where
    F: Fn(&Pubkey, &Pubkey) -> Option<Vec<u8>>,
{
    fn check_compliance(&self, participant: &Pubkey, token: &Pubkey) -> ComplianceReport {
        match (self.query)(participant, token) {
            Some(data) => ComplianceReport::from_return_data(&data),
            None => ComplianceReport::check_failed("oracle returned no data"),
        }
    }
}
