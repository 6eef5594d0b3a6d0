//! Compliance rule engine over contribution and verification records.
//!
//! A pure classification pass: no randomness, no short-circuiting. Each of
//! the four rules is evaluated independently against per-identity
//! aggregates, so one identity can accumulate several failure cases. The
//! validator has no dependency on the generator — records may come from
//! any source that parses into the model types.
//!
//! Output ordering is deterministic: identities ascending by id, and
//! within one identity the rule order below (individual limit, cumulative
//! limit, near-limit, KYC).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::CompliancePolicy;
use crate::model::{Contribution, FailureCase, FailureKind, KycStatus, VerificationRecord};

/// Maps identity ids to display names for failure output. Ids without an
/// entry fall back to the id itself.
pub type NameIndex = BTreeMap<String, String>;

/// Classifies identities into typed failure cases against a policy.
pub struct ComplianceValidator {
    policy: CompliancePolicy,
}

impl ComplianceValidator {
    pub fn new(policy: CompliancePolicy) -> Self {
        ComplianceValidator { policy }
    }

    /// Evaluate every identity appearing in either input table.
    ///
    /// Identities with verification records but no contributions are
    /// still evaluated: a prospect can fail KYC before ever donating.
    pub fn validate(
        &self,
        contributions: &[Contribution],
        verifications: &[VerificationRecord],
        names: &NameIndex,
    ) -> Vec<FailureCase> {
        let limit = self.policy.limit;
        let window_floor = limit - self.policy.near_limit_window;

        // Per-identity aggregates, keyed ascending; contribution order
        // within one identity is preserved from the input.
        let mut by_identity: BTreeMap<&str, Vec<&Contribution>> = BTreeMap::new();
        for contribution in contributions {
            by_identity
                .entry(contribution.identity_id.as_str())
                .or_default()
                .push(contribution);
        }
        let mut verified: BTreeMap<&str, &VerificationRecord> = BTreeMap::new();
        for record in verifications {
            verified.entry(record.identity_id.as_str()).or_insert(record);
        }

        let mut ids: Vec<&str> = by_identity.keys().copied().collect();
        for id in verified.keys() {
            if !by_identity.contains_key(id) {
                ids.push(id);
            }
        }
        ids.sort_unstable();

        let mut failures = Vec::new();
        for id in ids {
            let name = names.get(id).cloned().unwrap_or_else(|| id.to_string());
            let entries = by_identity.get(id).map(Vec::as_slice).unwrap_or(&[]);
            let total: Decimal = entries.iter().map(|c| c.amount).sum();

            // Rule 1: any single contribution over the limit.
            for contribution in entries {
                if contribution.amount > limit {
                    let mut case = FailureCase::new(
                        id,
                        &name,
                        FailureKind::OverIndividualLimit,
                        format!(
                            "Individual contribution ${:.2} exceeds ${:.2} limit",
                            contribution.amount, limit
                        ),
                    );
                    case.amount = Some(contribution.amount);
                    failures.push(case);
                }
            }

            // Rule 2: cumulative over the limit. Equality is compliant.
            if total > limit {
                let mut case = FailureCase::new(
                    id,
                    &name,
                    FailureKind::OverCumulativeLimit,
                    format!(
                        "Cumulative contributions ${:.2} exceed ${:.2} limit ({} donations)",
                        total,
                        limit,
                        entries.len()
                    ),
                );
                case.current_amount = Some(total);
                case.contribution_count = Some(entries.len());
                failures.push(case);
            } else if !entries.is_empty() && total > window_floor {
                // Rule 3: inside the near-limit window, at or under the
                // limit. Suppressed when rule 2 fired (the branches are
                // disjoint on `total`).
                let remaining = limit - total;
                let mut case = FailureCase::new(
                    id,
                    &name,
                    FailureKind::WouldExceedWithNewDonation,
                    format!(
                        "Current total ${:.2}, would exceed limit with donation over ${:.2}",
                        total, remaining
                    ),
                );
                case.current_amount = Some(total);
                case.remaining_allowed = Some(remaining);
                failures.push(case);
            }

            // Rule 4: verification status other than Pass, independent of
            // contribution amounts.
            if let Some(record) = verified.get(id) {
                if record.status != KycStatus::Pass {
                    let mut case = FailureCase::new(
                        id,
                        &name,
                        FailureKind::KycRejection,
                        format!(
                            "KYC status: {} - donation should be blocked",
                            record.raw_status
                        ),
                    );
                    case.kyc_status = Some(record.raw_status.clone());
                    failures.push(case);
                }
            }
        }

        debug!(failures = failures.len(), "compliance validation complete");
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn contribution(id: &str, amount: Decimal, seq: u32) -> Contribution {
        Contribution {
            identity_id: id.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            sequence_number: seq,
        }
    }

    fn verification(id: &str, raw: &str) -> VerificationRecord {
        VerificationRecord {
            identity_id: id.to_string(),
            status: KycStatus::normalize(raw),
            raw_status: raw.to_string(),
        }
    }

    fn validator() -> ComplianceValidator {
        ComplianceValidator::new(CompliancePolicy::default())
    }

    fn kinds(failures: &[FailureCase]) -> Vec<FailureKind> {
        failures.iter().map(|f| f.failure_type).collect()
    }

    #[test]
    fn exactly_at_limit_is_cumulative_compliant() {
        let contributions = vec![contribution("AAAAAAA1", dec!(3300.00), 1)];
        let failures = validator().validate(&contributions, &[], &NameIndex::new());
        assert!(failures
            .iter()
            .all(|f| f.failure_type != FailureKind::OverCumulativeLimit));
        assert!(failures
            .iter()
            .all(|f| f.failure_type != FailureKind::OverIndividualLimit));
    }

    #[test]
    fn cumulative_over_limit_carries_sum_and_count() {
        let contributions = vec![
            contribution("AAAAAAA1", dec!(1700.00), 1),
            contribution("AAAAAAA1", dec!(1700.00), 2),
        ];
        let failures = validator().validate(&contributions, &[], &NameIndex::new());
        assert_eq!(kinds(&failures), vec![FailureKind::OverCumulativeLimit]);
        assert_eq!(failures[0].current_amount, Some(dec!(3400.00)));
        assert_eq!(failures[0].contribution_count, Some(2));
    }

    #[test]
    fn near_limit_window_reports_remaining_allowance() {
        let contributions = vec![contribution("AAAAAAA1", dec!(3250.00), 1)];
        let failures = validator().validate(&contributions, &[], &NameIndex::new());
        assert_eq!(
            kinds(&failures),
            vec![FailureKind::WouldExceedWithNewDonation]
        );
        assert_eq!(failures[0].current_amount, Some(dec!(3250.00)));
        assert_eq!(failures[0].remaining_allowed, Some(dec!(50.00)));
    }

    #[test]
    fn below_window_floor_is_silent() {
        let contributions = vec![contribution("AAAAAAA1", dec!(3200.00), 1)];
        let failures = validator().validate(&contributions, &[], &NameIndex::new());
        assert!(failures.is_empty(), "3200.00 == limit - window, compliant");
    }

    #[test]
    fn near_limit_suppressed_once_over_limit() {
        let contributions = vec![
            contribution("AAAAAAA1", dec!(1700.00), 1),
            contribution("AAAAAAA1", dec!(1700.00), 2),
        ];
        let failures = validator().validate(&contributions, &[], &NameIndex::new());
        assert!(failures
            .iter()
            .all(|f| f.failure_type != FailureKind::WouldExceedWithNewDonation));
    }

    #[test]
    fn kyc_statuses_normalize_before_rules() {
        for raw in ["Pending", "pending", "Rejected"] {
            let verifications = vec![verification("AAAAAAA1", raw)];
            let failures = validator().validate(&[], &verifications, &NameIndex::new());
            assert_eq!(kinds(&failures), vec![FailureKind::KycRejection], "{raw}");
            assert_eq!(failures[0].kyc_status.as_deref(), Some(raw));
        }
        for raw in ["Yes", "Pass"] {
            let verifications = vec![verification("AAAAAAA1", raw)];
            let failures = validator().validate(&[], &verifications, &NameIndex::new());
            assert!(failures.is_empty(), "{raw}");
        }
    }

    #[test]
    fn one_identity_can_fail_multiple_rules() {
        // Single $3,400 contribution from an unverified donor: individual
        // limit, cumulative limit, and KYC all fire independently.
        let contributions = vec![contribution("AAAAAAA1", dec!(3400.00), 1)];
        let verifications = vec![verification("AAAAAAA1", "Pending")];
        let failures = validator().validate(&contributions, &verifications, &NameIndex::new());
        assert_eq!(
            kinds(&failures),
            vec![
                FailureKind::OverIndividualLimit,
                FailureKind::OverCumulativeLimit,
                FailureKind::KycRejection,
            ]
        );
        assert_eq!(failures[0].amount, Some(dec!(3400.00)));
    }

    #[test]
    fn output_grouped_by_id_ascending() {
        let contributions = vec![
            contribution("ZZZZZZZ9", dec!(3400.00), 1),
            contribution("AAAAAAA1", dec!(3250.00), 1),
        ];
        let verifications = vec![verification("MMMMMMM5", "No")];
        let failures = validator().validate(&contributions, &verifications, &NameIndex::new());
        let ids: Vec<&str> = failures.iter().map(|f| f.unique_id.as_str()).collect();
        assert_eq!(ids, vec!["AAAAAAA1", "MMMMMMM5", "ZZZZZZZ9", "ZZZZZZZ9"]);
    }

    #[test]
    fn names_resolve_from_index_with_id_fallback() {
        let mut names = NameIndex::new();
        names.insert("AAAAAAA1".to_string(), "Ada Cole".to_string());
        let contributions = vec![
            contribution("AAAAAAA1", dec!(3400.00), 1),
            contribution("BBBBBBB2", dec!(3400.00), 1),
        ];
        let failures = validator().validate(&contributions, &[], &names);
        assert_eq!(failures[0].name, "Ada Cole");
        assert_eq!(failures[2].name, "BBBBBBB2");
    }

    #[test]
    fn float_free_sums_do_not_drift() {
        // 33 contributions of $100.00 sum to exactly the limit; decimal
        // arithmetic must not classify this as exceeding it.
        let contributions: Vec<Contribution> = (1..=33)
            .map(|i| contribution("AAAAAAA1", dec!(100.00), i))
            .collect();
        let failures = validator().validate(&contributions, &[], &NameIndex::new());
        assert!(failures
            .iter()
            .all(|f| f.failure_type != FailureKind::OverCumulativeLimit));
    }
}
