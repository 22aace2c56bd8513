use solana_program::{
    program_error::ProgramError,
    pubkey::Pubkey,
};
use thiserror::Error;

use crate::types::{ComplianceVerdict, PauseTarget};

/// Failures reported by a fungible ledger implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unknown token: {token}")]
    UnknownToken { token: Pubkey },

    #[error("Insufficient balance: Required {required}, Available {available}, Holder {holder}")]
    InsufficientBalance {
        holder: Pubkey,
        required: u64,
        available: u64,
    },

    #[error("Insufficient allowance: Required {required}, Approved {approved}, Owner {owner}, Spender {spender}")]
    InsufficientAllowance {
        owner: Pubkey,
        spender: Pubkey,
        required: u64,
        approved: u64,
    },

    #[error("Balance overflow crediting {holder}")]
    BalanceOverflow { holder: Pubkey },
}

/// Error types for the constant product pool program.
///
/// Variants fall into four classes: invariant violations, authorization
/// failures, policy failures (expected-path rejections a caller can fix by
/// adjusting parameters) and token-integration failures. Every variant is a
/// whole-operation revert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmmError {
    // ---------------------------------------------------------------------
    // Invariant violations
    // ---------------------------------------------------------------------
    /// Constant product decreased across a swap
    #[error("K value decreased: before {k_before}, after {k_after}")]
    KValueDecreased { k_before: String, k_after: String },

    #[error("Insufficient liquidity burned: {shares} shares redeem ({amount_a}, {amount_b})")]
    InsufficientLiquidityBurned {
        shares: u64,
        amount_a: u64,
        amount_b: u64,
    },

    #[error("Insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// First deposit below the share floor
    #[error("Initial deposit too small: {liquidity} shares, minimum {minimum}")]
    InitialDepositTooSmall { liquidity: u64, minimum: u64 },

    #[error("Insufficient output amount")]
    InsufficientOutputAmount,

    #[error("Insufficient input amount")]
    InsufficientInputAmount,

    #[error("Insufficient liquidity: requested {requested}, reserve {reserve}")]
    InsufficientLiquidity { requested: u64, reserve: u64 },

    #[error("Insufficient shares: Required {required}, Available {available}, Holder {holder}")]
    InsufficientShares {
        holder: Pubkey,
        required: u64,
        available: u64,
    },

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    // ---------------------------------------------------------------------
    // Authorization failures
    // ---------------------------------------------------------------------
    #[error("Caller {caller} is not the pool factory")]
    NotFactory { caller: Pubkey },

    #[error("Caller {caller} is not an allowed pool creator")]
    NotAllowedCreator { caller: Pubkey },

    #[error("Quorum not met: {valid} valid signatures, {required} required")]
    QuorumNotMet { valid: usize, required: usize },

    #[error("Duplicate emergency signer: {signer}")]
    DuplicateSigner { signer: Pubkey },

    #[error("Not an emergency signer: {signer}")]
    UnknownEmergencySigner { signer: Pubkey },

    #[error("Invalid emergency signature from {signer}")]
    InvalidEmergencySignature { signer: Pubkey },

    #[error("Stale emergency nonce: {nonce}, last used {last_nonce}")]
    StaleNonce { nonce: u64, last_nonce: u64 },

    #[error("Locked: pool entry point re-entered")]
    Locked,

    /// A flash-swap callback tried to move tokens it does not own
    #[error("Flash callback may not debit {holder}; borrower is {borrower}")]
    UnauthorizedDebit { holder: Pubkey, borrower: Pubkey },

    // ---------------------------------------------------------------------
    // Policy failures
    // ---------------------------------------------------------------------
    #[error("Compliance denied for participant {participant} on token {token}: {verdict:?} ({reason})")]
    ComplianceDenied {
        participant: Pubkey,
        token: Pubkey,
        verdict: ComplianceVerdict,
        reason: String,
    },

    #[error("Paused: {target}")]
    Paused { target: PauseTarget },

    #[error("Already paused: {target}")]
    AlreadyPaused { target: PauseTarget },

    #[error("Not paused: {target}")]
    NotPaused { target: PauseTarget },

    #[error("Deadline expired: deadline {deadline}, now {now}")]
    DeadlineExpired { deadline: i64, now: i64 },

    #[error("Slippage exceeded on {token}: minimum {minimum}, actual {actual}")]
    SlippageExceeded {
        token: Pubkey,
        minimum: u64,
        actual: u64,
    },

    // ---------------------------------------------------------------------
    // Configuration and input validation
    // ---------------------------------------------------------------------
    #[error("Invalid token pair: {token_a} and {token_b}. Reason: {reason}")]
    InvalidTokenPair {
        token_a: Pubkey,
        token_b: Pubkey,
        reason: String,
    },

    #[error("Pool already exists for {token_a}/{token_b}: {pool}")]
    PoolAlreadyExists {
        token_a: Pubkey,
        token_b: Pubkey,
        pool: Pubkey,
    },

    #[error("Pool not found: {pool}")]
    PoolNotFound { pool: Pubkey },

    #[error("No pool for pair {token_a}/{token_b}")]
    PairNotFound { token_a: Pubkey, token_b: Pubkey },

    #[error("Pool already initialized")]
    AlreadyInitialized,

    #[error("Pool not initialized")]
    NotInitialized,

    #[error("Invalid recipient: {recipient}")]
    InvalidRecipient { recipient: Pubkey },

    #[error("Amount cannot be zero: {context}")]
    ZeroAmount { context: String },

    #[error("Invalid fee parameters: {reason}")]
    InvalidFeeParameters { reason: String },

    #[error("Invalid emergency signer set: {reason}")]
    InvalidSignerSet { reason: String },

    #[error("Invalid genesis configuration: {reason}")]
    InvalidGenesisConfig { reason: String },

    #[error("Invalid instruction data")]
    InvalidInstruction,

    #[error("Incorrect program id: expected {expected}, got {actual}")]
    IncorrectProgramId { expected: Pubkey, actual: Pubkey },

    // ---------------------------------------------------------------------
    // Token-integration failures
    // ---------------------------------------------------------------------
    /// Measured balance delta disagreed with the requested amount
    #[error("Unsupported token {token}: expected delta {expected}, measured {actual}")]
    UnsupportedToken {
        token: Pubkey,
        expected: u64,
        actual: u64,
    },

    #[error("Token transfer failed: {0}")]
    TransferFailed(#[from] LedgerError),

    #[error("Flash swap callback failed: {reason}")]
    CallbackFailed { reason: String },
}

impl AmmError {
    /// Returns a unique, stable error code for each variant.
    ///
    /// 1xxx invariants, 2xxx authorization, 3xxx policy, 4xxx validation,
    /// 5xxx token integration.
    pub fn error_code(&self) -> u32 {
        match self {
            AmmError::KValueDecreased { .. } => 1001,
            AmmError::InsufficientLiquidityBurned { .. } => 1002,
            AmmError::InsufficientLiquidityMinted => 1003,
            AmmError::InitialDepositTooSmall { .. } => 1004,
            AmmError::InsufficientOutputAmount => 1005,
            AmmError::InsufficientInputAmount => 1006,
            AmmError::InsufficientLiquidity { .. } => 1007,
            AmmError::InsufficientShares { .. } => 1008,
            AmmError::ArithmeticOverflow => 1009,
            AmmError::NotFactory { .. } => 2001,
            AmmError::NotAllowedCreator { .. } => 2002,
            AmmError::QuorumNotMet { .. } => 2003,
            AmmError::DuplicateSigner { .. } => 2004,
            AmmError::UnknownEmergencySigner { .. } => 2005,
            AmmError::InvalidEmergencySignature { .. } => 2006,
            AmmError::StaleNonce { .. } => 2007,
            AmmError::Locked => 2008,
            AmmError::UnauthorizedDebit { .. } => 2009,
            AmmError::ComplianceDenied { .. } => 3001,
            AmmError::Paused { .. } => 3002,
            AmmError::AlreadyPaused { .. } => 3003,
            AmmError::NotPaused { .. } => 3004,
            AmmError::DeadlineExpired { .. } => 3005,
            AmmError::SlippageExceeded { .. } => 3006,
            AmmError::InvalidTokenPair { .. } => 4001,
            AmmError::PoolAlreadyExists { .. } => 4002,
            AmmError::PoolNotFound { .. } => 4003,
            AmmError::PairNotFound { .. } => 4004,
            AmmError::AlreadyInitialized => 4005,
            AmmError::NotInitialized => 4006,
            AmmError::InvalidRecipient { .. } => 4007,
            AmmError::ZeroAmount { .. } => 4008,
            AmmError::InvalidFeeParameters { .. } => 4009,
            AmmError::InvalidSignerSet { .. } => 4010,
            AmmError::InvalidGenesisConfig { .. } => 4011,
            AmmError::InvalidInstruction => 4012,
            AmmError::IncorrectProgramId { .. } => 4013,
            AmmError::UnsupportedToken { .. } => 5001,
            AmmError::TransferFailed(_) => 5002,
            AmmError::CallbackFailed { .. } => 5003,
        }
    }

    /// Expected-path rejections: the caller should adjust parameters and resubmit.
    pub fn is_policy_failure(&self) -> bool {
        matches!(
            self,
            AmmError::ComplianceDenied { .. }
                | AmmError::Paused { .. }
                | AmmError::DeadlineExpired { .. }
                | AmmError::SlippageExceeded { .. }
        )
    }

    /// Authorization failures are surfaced to operators for review.
    pub fn is_authorization_failure(&self) -> bool {
        (2001..3000).contains(&self.error_code())
    }
}

impl From<AmmError> for ProgramError {
    fn from(e: AmmError) -> Self {
        ProgramError::Custom(e.error_code())
    }
}

impl From<std::io::Error> for AmmError {
    fn from(_: std::io::Error) -> Self {
        AmmError::InvalidInstruction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_custom_program_errors() {
        let err = AmmError::Paused { target: PauseTarget::Global };
        assert_eq!(ProgramError::from(err), ProgramError::Custom(3002));

        let err = AmmError::NotFactory { caller: Pubkey::new_unique() };
        assert_eq!(ProgramError::from(err), ProgramError::Custom(2001));
    }

    #[test]
    fn test_error_classification() {
        assert!(AmmError::DeadlineExpired { deadline: 1, now: 2 }.is_policy_failure());
        assert!(!AmmError::KValueDecreased {
            k_before: "1".to_string(),
            k_after: "0".to_string(),
        }
        .is_policy_failure());
        assert!(AmmError::QuorumNotMet { valid: 2, required: 3 }.is_authorization_failure());
        assert!(!AmmError::InsufficientOutputAmount.is_authorization_failure());
    }

    #[test]
    fn test_ledger_errors_wrap_as_transfer_failures() {
        let ledger_err = LedgerError::UnknownToken { token: Pubkey::new_unique() };
        let err: AmmError = ledger_err.clone().into();
        assert_eq!(err, AmmError::TransferFailed(ledger_err));
        assert_eq!(err.error_code(), 5002);
    }
}
