//! Generation spec and compliance policy.
//!
//! Everything the pipeline treats as a target — population counts, category
//! sizes, amount bands, the contribution limit, the RNG seed — lives here
//! as plain serde types with compiled defaults matching the reference
//! dataset (150 prospects / 150 donors / 38 overlap / 215 contributions /
//! $3,300 limit). A YAML file can override any subset of fields.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DataKitError;

fn dec(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Thresholds the compliance validator enforces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompliancePolicy {
    /// Maximum a single identity may give, per contribution and cumulative.
    pub limit: Decimal,
    /// Near-limit window: cumulative totals within this distance below the
    /// limit are flagged as would-exceed prospects.
    pub near_limit_window: Decimal,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        CompliancePolicy {
            limit: dec(330_000),
            near_limit_window: dec(10_000),
        }
    }
}

/// A one-contribution category drawing amounts uniformly from
/// `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandSpec {
    pub donors: usize,
    pub low: Decimal,
    pub high: Decimal,
}

impl Default for BandSpec {
    fn default() -> Self {
        BandSpec {
            donors: 0,
            low: Decimal::ZERO,
            high: Decimal::ZERO,
        }
    }
}

/// Donors giving 2–4 contributions that sum to `total` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiExactSpec {
    pub donors: usize,
    /// Exact per-donor total, to the cent.
    pub total: Decimal,
    pub min_contributions: u32,
    pub max_contributions: u32,
    /// Uniform band for all but the final contribution, clamped to the
    /// remaining budget.
    pub chunk_low: Decimal,
    pub chunk_high: Decimal,
    /// Ceiling on the final balancing contribution.
    pub per_contribution_cap: Decimal,
}

impl Default for MultiExactSpec {
    fn default() -> Self {
        MultiExactSpec {
            donors: 4,
            total: dec(329_900),
            min_contributions: 2,
            max_contributions: 4,
            chunk_low: dec(50_000),
            chunk_high: dec(180_000),
            per_contribution_cap: dec(330_000),
        }
    }
}

/// Remaining donors absorb contributions until the global count target is
/// met, each staying strictly below the limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillSpec {
    /// Global total-contribution-count target across all categories.
    pub target_total_contributions: usize,
    /// Band for each fill donor's first contribution.
    pub first_low: Decimal,
    pub first_high: Decimal,
    /// Band for top-up contributions, upper bound further clamped to the
    /// donor's remaining headroom under the limit.
    pub topup_low: Decimal,
    pub topup_high: Decimal,
    /// A donor is eligible for a top-up only while its running total is
    /// below this cap (kept under the limit so headroom stays plausible).
    pub eligibility_cap: Decimal,
}

impl Default for FillSpec {
    fn default() -> Self {
        FillSpec {
            target_total_contributions: 215,
            first_low: dec(10_000),
            first_high: dec(200_000),
            topup_low: dec(5_000),
            topup_high: dec(100_000),
            eligibility_cap: dec(300_000),
        }
    }
}

/// Disjoint contribution categories with exact donor counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySpec {
    /// Donors giving a single contribution of exactly the limit.
    pub at_limit_donors: usize,
    /// Single small contributions, `[low, high)`.
    pub below_threshold: BandSpec,
    /// Single contributions just under the limit, `[low, high)`.
    pub just_under_limit: BandSpec,
    pub multi_exact: MultiExactSpec,
    pub fill: FillSpec,
}

impl Default for CategorySpec {
    fn default() -> Self {
        CategorySpec {
            at_limit_donors: 5,
            below_threshold: BandSpec {
                donors: 25,
                low: dec(1_000),
                high: dec(5_000),
            },
            just_under_limit: BandSpec {
                donors: 4,
                low: dec(329_901),
                high: dec(330_000),
            },
            multi_exact: MultiExactSpec::default(),
            fill: FillSpec::default(),
        }
    }
}

impl CategorySpec {
    /// Donors consumed by the fixed-size categories (fill takes the rest).
    pub fn fixed_donor_count(&self) -> usize {
        self.at_limit_donors
            + self.below_threshold.donors
            + self.just_under_limit.donors
            + self.multi_exact.donors
    }
}

/// Full parameter set for one reproducible generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSpec {
    /// Seed for the run's single RNG; same seed + same spec means
    /// byte-identical output tables.
    pub seed: u64,
    pub prospect_count: usize,
    pub donor_count: usize,
    /// How many donors are drawn from the prospect pool rather than
    /// generated fresh.
    pub prospect_overlap: usize,
    /// Non-contributing prospects marked as KYC failures.
    pub kyc_fail_count: usize,
    /// Contribution dates are uniform in
    /// `[base_date, base_date + date_span_days]`.
    pub base_date: NaiveDate,
    pub date_span_days: i64,
    pub policy: CompliancePolicy,
    pub categories: CategorySpec,
}

impl Default for GenerationSpec {
    fn default() -> Self {
        GenerationSpec {
            seed: 20240101,
            prospect_count: 150,
            donor_count: 150,
            prospect_overlap: 38,
            kyc_fail_count: 11,
            base_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            date_span_days: 365,
            policy: CompliancePolicy::default(),
            categories: CategorySpec::default(),
        }
    }
}

impl GenerationSpec {
    /// Load a spec from a YAML file; absent fields keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, DataKitError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}
