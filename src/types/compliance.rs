//! Compliance verdict types shared by the oracle interface and the factory.

use borsh::{BorshDeserialize, BorshSerialize};
use num_traits::FromPrimitive;

/// Eligibility verdict for a (participant, token) pair.
///
/// Only `Compliant` permits value transfer. `CheckFailed` is handled exactly
/// like `NonCompliant`.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    num_derive::FromPrimitive,
)]
pub enum ComplianceVerdict {
    /// Code 0
    Compliant,
    /// Code 1
    NonCompliant,
    /// Code 2
    CheckFailed,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ComplianceReport {
    pub verdict: ComplianceVerdict,
    pub reason: String,
}

impl ComplianceReport {
    pub fn compliant() -> Self {
        Self {
            verdict: ComplianceVerdict::Compliant,
            reason: String::new(),
        }
    }

    pub fn non_compliant(reason: impl Into<String>) -> Self {
        Self {
            verdict: ComplianceVerdict::NonCompliant,
            reason: reason.into(),
        }
    }

    pub fn check_failed(reason: impl Into<String>) -> Self {
        Self {
            verdict: ComplianceVerdict::CheckFailed,
            reason: reason.into(),
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.verdict == ComplianceVerdict::Compliant
    }

    /// Decodes oracle return data laid out as `[verdict_code, reason_utf8...]`.
    ///
    /// Empty data, unknown verdict codes and non-UTF-8 reasons all decode to
    /// `CheckFailed`.
    pub fn from_return_data(data: &[u8]) -> Self {
        let Some((&code, reason_bytes)) = data.split_first() else {
            return Self::check_failed("empty oracle response");
        };

        let Some(verdict) = ComplianceVerdict::from_u8(code) else {
            return Self::check_failed(format!("unknown verdict code {}", code));
        };

        match std::str::from_utf8(reason_bytes) {
            Ok(reason) => Self {
                verdict,
                reason: reason.to_string(),
            },
            Err(_) => Self::check_failed("malformed oracle reason"),
        }
    }

    /// Inverse of [`ComplianceReport::from_return_data`].
    pub fn to_return_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(1 + self.reason.len());
        data.push(self.verdict as u8);
        data.extend_from_slice(self.reason.as_bytes());
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_data_decoding() {
        let report = ComplianceReport::from_return_data(&[0]);
        assert!(report.is_compliant());

        let mut data = vec![1u8];
        data.extend_from_slice(b"sanctioned");
        let report = ComplianceReport::from_return_data(&data);
        assert_eq!(report.verdict, ComplianceVerdict::NonCompliant);
        assert_eq!(report.reason, "sanctioned");
    }

    #[test]
    fn test_malformed_return_data_fails_closed() {
        assert_eq!(
            ComplianceReport::from_return_data(&[]).verdict,
            ComplianceVerdict::CheckFailed
        );
        assert_eq!(
            ComplianceReport::from_return_data(&[7]).verdict,
            ComplianceVerdict::CheckFailed
        );
        assert_eq!(
            ComplianceReport::from_return_data(&[0, 0xff, 0xfe]).verdict,
            ComplianceVerdict::CheckFailed
        );
    }

    #[test]
    fn test_to_return_data_is_decodable() {
        let report = ComplianceReport::check_failed("oracle offline");
        let decoded = ComplianceReport::from_return_data(&report.to_return_data());
        assert_eq!(decoded, report);
    }
}
