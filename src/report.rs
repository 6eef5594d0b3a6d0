//! Dataset quality-control report.
//!
//! Re-checks a generated (or externally supplied) dataset against the
//! generation targets and the structural invariants: format patterns,
//! uniqueness, category distribution, cumulative-limit compliance,
//! prospect/donor overlap, and the KYC split. Every violated expectation
//! becomes a [`Finding`]; a clean dataset has none.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use rust_decimal::Decimal;

use crate::config::GenerationSpec;
use crate::model::{Identity, KycStatus};
use crate::store::{validate_identity, DonorRecord, KycRow};

/// One violated expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub check: &'static str,
    pub detail: String,
}

/// Donor counts per contribution category, recovered from the data by the
/// same classification the original targets used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub at_limit: usize,
    pub below_threshold: usize,
    pub just_under_limit: usize,
    pub multi_exact: usize,
    pub fill: usize,
}

#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub prospect_count: usize,
    pub unique_donor_count: usize,
    pub contribution_count: usize,
    /// Donors that are also prospects.
    pub overlap_count: usize,
    pub kyc_pass: usize,
    pub kyc_fail: usize,
    pub categories: CategoryBreakdown,
    pub findings: Vec<Finding>,
}

impl DatasetReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Build the report for one dataset against the spec's targets.
    pub fn build(
        spec: &GenerationSpec,
        prospects: &[Identity],
        donors: &[DonorRecord],
        kyc: &[KycRow],
    ) -> Self {
        let mut findings = Vec::new();
        let limit = spec.policy.limit;

        check_identity_population(&mut findings, "prospects", prospects.iter());
        check_identity_population(
            &mut findings,
            "donors",
            dedup_donor_identities(donors).into_iter(),
        );

        // Per-donor aggregates.
        let mut totals: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
        for record in donors {
            let entry = totals
                .entry(record.identity.unique_id.as_str())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += record.contribution.amount;
            entry.1 += 1;
        }

        let mut categories = CategoryBreakdown::default();
        for (id, &(total, count)) in &totals {
            if total > limit {
                findings.push(Finding {
                    check: "cumulative-limit",
                    detail: format!("donor {id} total {total:.2} exceeds limit {limit:.2}"),
                });
            }
            match (count, total) {
                (1, t) if t == limit => categories.at_limit += 1,
                (1, t) if t < spec.categories.below_threshold.high => {
                    categories.below_threshold += 1
                }
                (1, t) if t >= spec.categories.just_under_limit.low && t < limit => {
                    categories.just_under_limit += 1
                }
                (n, t) if n > 1 && t == spec.categories.multi_exact.total => {
                    categories.multi_exact += 1
                }
                _ => categories.fill += 1,
            }
        }

        // Counts against spec targets.
        let expect = |findings: &mut Vec<Finding>, check, expected: usize, actual: usize| {
            if expected != actual {
                findings.push(Finding {
                    check,
                    detail: format!("expected {expected}, found {actual}"),
                });
            }
        };
        expect(
            &mut findings,
            "prospect-count",
            spec.prospect_count,
            prospects.len(),
        );
        expect(&mut findings, "donor-count", spec.donor_count, totals.len());
        expect(
            &mut findings,
            "contribution-count",
            spec.categories.fill.target_total_contributions,
            donors.len(),
        );
        expect(
            &mut findings,
            "at-limit-donors",
            spec.categories.at_limit_donors,
            categories.at_limit,
        );
        expect(
            &mut findings,
            "below-threshold-donors",
            spec.categories.below_threshold.donors,
            categories.below_threshold,
        );
        expect(
            &mut findings,
            "just-under-limit-donors",
            spec.categories.just_under_limit.donors,
            categories.just_under_limit,
        );
        expect(
            &mut findings,
            "multi-exact-donors",
            spec.categories.multi_exact.donors,
            categories.multi_exact,
        );

        // Prospect/donor overlap.
        let prospect_ids: HashSet<&str> =
            prospects.iter().map(|p| p.unique_id.as_str()).collect();
        let overlap_count = totals
            .keys()
            .filter(|id| prospect_ids.contains(*id))
            .count();
        expect(
            &mut findings,
            "prospect-donor-overlap",
            spec.prospect_overlap,
            overlap_count,
        );

        // KYC split and the all-donors-pass invariant.
        let mut kyc_pass = 0usize;
        let mut kyc_fail = 0usize;
        for row in kyc {
            match KycStatus::normalize(&row.kyc_status) {
                KycStatus::Pass => kyc_pass += 1,
                _ => kyc_fail += 1,
            }
        }
        expect(&mut findings, "kyc-fail-count", spec.kyc_fail_count, kyc_fail);
        for row in kyc {
            if totals.contains_key(row.unique_id.as_str())
                && KycStatus::normalize(&row.kyc_status) != KycStatus::Pass
            {
                findings.push(Finding {
                    check: "donor-kyc",
                    detail: format!(
                        "contributing donor {} has status '{}'",
                        row.unique_id, row.kyc_status
                    ),
                });
            }
        }

        DatasetReport {
            prospect_count: prospects.len(),
            unique_donor_count: totals.len(),
            contribution_count: donors.len(),
            overlap_count,
            kyc_pass,
            kyc_fail,
            categories,
            findings,
        }
    }
}

/// One identity per donor id, first row wins.
fn dedup_donor_identities(donors: &[DonorRecord]) -> Vec<&Identity> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for record in donors {
        if seen.insert(record.identity.unique_id.as_str()) {
            out.push(&record.identity);
        }
    }
    out
}

/// Format and uniqueness checks over one identity population.
fn check_identity_population<'a>(
    findings: &mut Vec<Finding>,
    table: &'static str,
    identities: impl Iterator<Item = &'a Identity>,
) {
    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut names: HashMap<(&str, &str), usize> = HashMap::new();
    let mut phones: HashMap<&str, usize> = HashMap::new();
    let mut wallets: HashMap<&str, usize> = HashMap::new();

    for identity in identities {
        if let Err(reason) = validate_identity(identity) {
            findings.push(Finding {
                check: "format",
                detail: format!("{table}: {reason}"),
            });
        }
        *ids.entry(identity.unique_id.as_str()).or_default() += 1;
        *names
            .entry((identity.first_name.as_str(), identity.last_name.as_str()))
            .or_default() += 1;
        *phones.entry(identity.phone_number.as_str()).or_default() += 1;
        *wallets.entry(identity.wallet_address.as_str()).or_default() += 1;
    }

    let mut dup = |check: &'static str, count: usize| {
        if count > 0 {
            findings.push(Finding {
                check,
                detail: format!("{table}: {count} duplicated values"),
            });
        }
    };
    dup("duplicate-ids", ids.values().filter(|&&c| c > 1).count());
    dup("duplicate-names", names.values().filter(|&&c| c > 1).count());
    dup("duplicate-phones", phones.values().filter(|&&c| c > 1).count());
    dup(
        "duplicate-wallets",
        wallets.values().filter(|&&c| c > 1).count(),
    );
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DATASET QUALITY CONTROL ===")?;
        writeln!(f, "prospects:            {}", self.prospect_count)?;
        writeln!(f, "unique donors:        {}", self.unique_donor_count)?;
        writeln!(f, "contributions:        {}", self.contribution_count)?;
        writeln!(f, "prospect overlap:     {}", self.overlap_count)?;
        writeln!(
            f,
            "kyc:                  {} pass / {} fail",
            self.kyc_pass, self.kyc_fail
        )?;
        writeln!(f, "--- contribution categories ---")?;
        writeln!(f, "at limit:             {}", self.categories.at_limit)?;
        writeln!(f, "below threshold:      {}", self.categories.below_threshold)?;
        writeln!(f, "just under limit:     {}", self.categories.just_under_limit)?;
        writeln!(f, "multi to exact total: {}", self.categories.multi_exact)?;
        writeln!(f, "fill:                 {}", self.categories.fill)?;
        if self.findings.is_empty() {
            writeln!(f, "result: all quality checks passed")?;
        } else {
            writeln!(f, "result: {} issue(s) found", self.findings.len())?;
            for finding in &self.findings {
                writeln!(f, "  [{}] {}", finding.check, finding.detail)?;
            }
        }
        Ok(())
    }
}
