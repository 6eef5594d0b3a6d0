//! Contribution allocation with exact category counts and exact sums.
//!
//! Donors are partitioned into the disjoint categories of a
//! [`CategorySpec`] by shuffling the supplied identities and slicing off
//! each category's exact donor count; whatever remains becomes the fill
//! population. All amounts are drawn and summed as integer cents, so the
//! exact-total categories land on their target to the cent with no float
//! drift.
//!
//! The allocator never mutates the identities it is given; it emits fresh
//! [`Contribution`] records, globally sorted by date, with per-donor
//! sequence numbers assigned in chronological order.

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{CategorySpec, CompliancePolicy, MultiExactSpec};
use crate::error::AllocationError;
use crate::model::{Contribution, Identity};

/// Attempts at the exact-sum partition per donor before giving up.
pub const MAX_PARTITION_ATTEMPTS: u32 = 100;

/// Result of one allocation run. `achieved_count` can fall short of
/// `requested_count` when the fill phase runs out of eligible donors; the
/// caller decides whether that is acceptable.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub contributions: Vec<Contribution>,
    /// Global contribution-count target from the fill spec.
    pub requested_count: usize,
    pub achieved_count: usize,
}

impl Allocation {
    pub fn is_short(&self) -> bool {
        self.achieved_count < self.requested_count
    }
}

/// Partitions identities into contribution categories.
pub struct ContributionAllocator {
    categories: CategorySpec,
    policy: CompliancePolicy,
    base_date: NaiveDate,
    date_span_days: i64,
}

/// Internal draft entry: donor index, amount in cents, date.
struct Draft {
    donor: usize,
    cents: i64,
    date: NaiveDate,
}

impl ContributionAllocator {
    pub fn new(
        categories: CategorySpec,
        policy: CompliancePolicy,
        base_date: NaiveDate,
        date_span_days: i64,
    ) -> Self {
        ContributionAllocator {
            categories,
            policy,
            base_date,
            date_span_days,
        }
    }

    /// Allocate contributions across all categories.
    pub fn allocate<R: Rng>(
        &self,
        rng: &mut R,
        donors: &[Identity],
    ) -> Result<Allocation, AllocationError> {
        let spec = &self.categories;
        let required = spec.fixed_donor_count();
        if donors.len() < required {
            return Err(AllocationError::NotEnoughDonors {
                required,
                available: donors.len(),
            });
        }

        let limit_cents = to_cents(self.policy.limit);
        let target = spec.fill.target_total_contributions;

        // Category membership: shuffle once, slice exact counts in spec
        // order, remainder is the fill population.
        let mut order: Vec<usize> = (0..donors.len()).collect();
        order.shuffle(rng);
        let (at_limit, rest) = order.split_at(spec.at_limit_donors);
        let (below, rest) = rest.split_at(spec.below_threshold.donors);
        let (just_under, rest) = rest.split_at(spec.just_under_limit.donors);
        let (multi, fill) = rest.split_at(spec.multi_exact.donors);

        let mut drafts: Vec<Draft> = Vec::with_capacity(target);
        let mut running = vec![0i64; donors.len()];
        let mut push = |drafts: &mut Vec<Draft>,
                        running: &mut Vec<i64>,
                        rng: &mut R,
                        donor: usize,
                        cents: i64| {
            running[donor] += cents;
            drafts.push(Draft {
                donor,
                cents,
                date: self.random_date(rng),
            });
        };

        for &donor in at_limit {
            push(&mut drafts, &mut running, rng, donor, limit_cents);
        }

        for &donor in below {
            let cents = draw_band(
                rng,
                to_cents(spec.below_threshold.low),
                to_cents(spec.below_threshold.high),
                "below-threshold",
            )?;
            push(&mut drafts, &mut running, rng, donor, cents);
        }

        for &donor in just_under {
            let cents = draw_band(
                rng,
                to_cents(spec.just_under_limit.low),
                to_cents(spec.just_under_limit.high),
                "just-under-limit",
            )?;
            push(&mut drafts, &mut running, rng, donor, cents);
        }

        for &donor in multi {
            for cents in partition_exact(rng, &spec.multi_exact)? {
                push(&mut drafts, &mut running, rng, donor, cents);
            }
        }

        // Fill phase, first pass: one contribution per remaining donor
        // until the global count target is reached.
        let first_low = to_cents(spec.fill.first_low);
        let first_high = to_cents(spec.fill.first_high);
        let mut fill_donors: Vec<usize> = Vec::with_capacity(fill.len());
        for &donor in fill {
            if drafts.len() >= target {
                break;
            }
            let cents = draw_band(rng, first_low, first_high + 1, "fill")?;
            push(&mut drafts, &mut running, rng, donor, cents);
            fill_donors.push(donor);
        }

        // Top-up pass: only fill donors take extra contributions, so the
        // fixed categories keep their exact shapes. Eligibility requires
        // the running total to stay under the per-donor cap, which itself
        // sits below the limit.
        let cap = to_cents(spec.fill.eligibility_cap);
        let topup_low = to_cents(spec.fill.topup_low);
        let topup_high = to_cents(spec.fill.topup_high);
        while drafts.len() < target {
            let eligible: Vec<usize> = fill_donors
                .iter()
                .copied()
                .filter(|&d| running[d] < cap && limit_cents - running[d] > topup_low)
                .collect();
            if eligible.is_empty() {
                warn!(
                    achieved = drafts.len(),
                    requested = target,
                    "fill phase ran out of eligible donors; allocation is short"
                );
                break;
            }
            let donor = eligible[rng.gen_range(0..eligible.len())];
            let high = topup_high.min(limit_cents - running[donor]);
            let cents = rng.gen_range(topup_low..high.max(topup_low + 1));
            push(&mut drafts, &mut running, rng, donor, cents);
        }

        debug!(
            contributions = drafts.len(),
            donors = donors.len(),
            fill_donors = fill_donors.len(),
            "allocation drafted"
        );

        Ok(Allocation {
            achieved_count: drafts.len(),
            requested_count: target,
            contributions: finalize(drafts, donors),
        })
    }

    fn random_date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        self.base_date + Duration::days(rng.gen_range(0..=self.date_span_days))
    }
}

/// Sort drafts by date (stable, so equal dates keep draw order) and assign
/// per-donor sequence numbers in chronological order.
fn finalize(mut drafts: Vec<Draft>, donors: &[Identity]) -> Vec<Contribution> {
    drafts.sort_by_key(|d| d.date);
    let mut seq = vec![0u32; donors.len()];
    drafts
        .into_iter()
        .map(|d| {
            seq[d.donor] += 1;
            Contribution {
                identity_id: donors[d.donor].unique_id.clone(),
                amount: Decimal::new(d.cents, 2),
                date: d.date,
                sequence_number: seq[d.donor],
            }
        })
        .collect()
}

/// Split the exact total into `k` positive cent amounts: `k - 1` uniform
/// draws clamped to the remaining budget, the final amount balancing the
/// target exactly. The whole draw retries when the balance falls outside
/// `(0, cap]`.
fn partition_exact<R: Rng>(
    rng: &mut R,
    spec: &MultiExactSpec,
) -> Result<Vec<i64>, AllocationError> {
    let total = to_cents(spec.total);
    let cap = to_cents(spec.per_contribution_cap);
    let chunk_low = to_cents(spec.chunk_low);
    let chunk_high = to_cents(spec.chunk_high);

    for _ in 0..MAX_PARTITION_ATTEMPTS {
        let k = rng
            .gen_range(spec.min_contributions..=spec.max_contributions)
            .max(1) as usize;
        let mut parts = Vec::with_capacity(k);
        let mut remaining = total;
        for _ in 0..k - 1 {
            let high = chunk_high.min(remaining);
            if high < chunk_low {
                break;
            }
            let cents = rng.gen_range(chunk_low..=high);
            parts.push(cents);
            remaining -= cents;
        }
        if parts.len() == k - 1 && remaining > 0 && remaining <= cap {
            parts.push(remaining);
            return Ok(parts);
        }
    }

    Err(AllocationError::Infeasible {
        category: "multi-to-exact-total",
        attempts: MAX_PARTITION_ATTEMPTS,
        target: spec.total,
    })
}

/// Uniform draw from the half-open cent range `[low, high)`.
fn draw_band<R: Rng>(
    rng: &mut R,
    low: i64,
    high: i64,
    category: &'static str,
) -> Result<i64, AllocationError> {
    if low >= high || low <= 0 {
        return Err(AllocationError::Infeasible {
            category,
            attempts: 0,
            target: Decimal::new(high, 2),
        });
    }
    Ok(rng.gen_range(low..high))
}

fn to_cents(amount: Decimal) -> i64 {
    (amount.round_dp(2) * Decimal::new(100, 0))
        .to_i64()
        .unwrap_or(i64::MAX)
}
