//! Core record types crossing the generator/validator boundary.
//!
//! All four record kinds are fixed-shape structs: persisted tables are
//! parsed into these at the ingestion boundary and rule logic never touches
//! raw string maps. Amounts are `rust_decimal::Decimal` throughout so a
//! cumulative sum of exactly the limit compares equal to the limit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A synthetic person. `unique_id`, the `(first_name, last_name)` pair,
/// `phone_number`, and `wallet_address` are globally unique within one
/// generated population; the descriptive fields are not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// 8 uppercase alphanumeric characters.
    pub unique_id: String,
    pub first_name: String,
    pub last_name: String,
    /// `555-NNNN`.
    pub phone_number: String,
    pub employer: String,
    pub occupation: String,
    pub address_line_1: String,
    /// Empty for identities without a unit designator.
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// `0x` followed by 40 lowercase hex characters.
    pub wallet_address: String,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One donation attributed to an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub identity_id: String,
    /// Non-negative, two-digit cent precision.
    pub amount: Decimal,
    pub date: NaiveDate,
    /// 1-based per identity, contiguous in chronological order.
    pub sequence_number: u32,
}

/// Normalized identity-verification outcome. Raw table values are folded
/// into this closed set once, at the boundary; rule logic only ever
/// compares against these variants and only `Pass` is compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KycStatus {
    Pass,
    Fail,
    Pending,
    Unknown,
}

impl KycStatus {
    /// Case-insensitive normalization of raw status strings.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "pass" | "passed" | "approved" | "verified" => KycStatus::Pass,
            "no" | "fail" | "failed" | "rejected" | "denied" => KycStatus::Fail,
            "pending" | "in review" | "in_review" => KycStatus::Pending,
            _ => KycStatus::Unknown,
        }
    }

    /// Raw value written to the kyc table (the consumer side accepts any
    /// casing of the wider synonym set).
    pub fn table_value(&self) -> &'static str {
        match self {
            KycStatus::Pass => "Yes",
            KycStatus::Fail => "No",
            KycStatus::Pending => "Pending",
            KycStatus::Unknown => "Unknown",
        }
    }
}

/// Verification outcome for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub identity_id: String,
    pub status: KycStatus,
    /// The string as it appeared in the source table.
    pub raw_status: String,
}

/// Compliance rule identifiers, in emission order per identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    OverIndividualLimit,
    OverCumulativeLimit,
    WouldExceedWithNewDonation,
    KycRejection,
}

impl FailureKind {
    /// The wire name used in the JSON report.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::OverIndividualLimit => "over_individual_limit",
            FailureKind::OverCumulativeLimit => "over_cumulative_limit",
            FailureKind::WouldExceedWithNewDonation => "would_exceed_with_new_donation",
            FailureKind::KycRejection => "kyc_rejection",
        }
    }
}

/// One rule match for one identity. Created by the validator, never
/// mutated; an identity may accumulate several of these across kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureCase {
    pub unique_id: String,
    pub name: String,
    pub failure_type: FailureKind,
    /// Offending single-contribution amount (OverIndividualLimit only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Identity cumulative (OverCumulativeLimit and WouldExceed...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution_count: Option<usize>,
    /// `limit - cumulative`, WouldExceedWithNewDonation only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_allowed: Option<Decimal>,
    /// Raw status string, KycRejection only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kyc_status: Option<String>,
    pub reason: String,
}

impl FailureCase {
    pub(crate) fn new(unique_id: &str, name: &str, kind: FailureKind, reason: String) -> Self {
        FailureCase {
            unique_id: unique_id.to_string(),
            name: name.to_string(),
            failure_type: kind,
            amount: None,
            current_amount: None,
            contribution_count: None,
            remaining_allowed: None,
            kyc_status: None,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_normalization_is_case_insensitive() {
        for raw in ["Pending", "pending", "PENDING", "Rejected", "denied", "No"] {
            assert_ne!(KycStatus::normalize(raw), KycStatus::Pass, "raw = {raw}");
        }
        for raw in ["Yes", "yes", "Pass", "APPROVED", "verified"] {
            assert_eq!(KycStatus::normalize(raw), KycStatus::Pass, "raw = {raw}");
        }
        assert_eq!(KycStatus::normalize("Pending"), KycStatus::Pending);
        assert_eq!(KycStatus::normalize("Rejected"), KycStatus::Fail);
        assert_eq!(KycStatus::normalize("maybe"), KycStatus::Unknown);
    }

    #[test]
    fn failure_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::WouldExceedWithNewDonation).unwrap();
        assert_eq!(json, "\"would_exceed_with_new_donation\"");
    }
}
