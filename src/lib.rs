//! campaign-data: reproducible synthetic campaign-donation datasets and a
//! contribution compliance validator.
//!
//! The crate has two independent halves:
//!
//! - **Generation** ([`generate_dataset`]): a seeded pipeline that builds a
//!   population of unique synthetic identities ([`pool::IdentityPool`]),
//!   partitions donors into contribution categories with exact counts and
//!   exact sums ([`allocator::ContributionAllocator`]), and assigns
//!   verification statuses with exact pass/fail counts
//!   ([`kyc::KycAssigner`]). Same seed, same spec: byte-identical tables.
//!
//! - **Validation** ([`validator::ComplianceValidator`]): a deterministic
//!   rule engine that classifies contribution and verification records —
//!   from this generator or anywhere else — into typed failure cases
//!   against a configurable limit policy.
//!
//! CSV/JSON persistence lives in [`store`], the dataset quality-control
//! report in [`report`].

pub mod allocator;
pub mod config;
pub mod error;
pub mod kyc;
pub mod model;
pub mod pool;
pub mod report;
pub mod store;
pub mod validator;
pub mod vocab;

use std::collections::HashSet;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

pub use allocator::{Allocation, ContributionAllocator};
pub use config::{CategorySpec, CompliancePolicy, GenerationSpec};
pub use error::DataKitError;
pub use kyc::KycAssigner;
pub use model::{Contribution, FailureCase, FailureKind, Identity, KycStatus, VerificationRecord};
pub use pool::IdentityPool;
pub use report::DatasetReport;
pub use validator::{ComplianceValidator, NameIndex};

use store::csv_store;
use store::{DonorRecord, KycRow};

/// Output of one generation run, ready for persistence or direct
/// validation.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub prospects: Vec<Identity>,
    /// All contributing identities (overlap prospects plus fresh donors).
    pub donors: Vec<Identity>,
    pub allocation: Allocation,
    /// Verification statuses over the prospect population.
    pub verifications: Vec<VerificationRecord>,
}

impl Dataset {
    pub fn contributing_ids(&self) -> HashSet<String> {
        self.allocation
            .contributions
            .iter()
            .map(|c| c.identity_id.clone())
            .collect()
    }

    /// Join contributions with their identities, one record per row of the
    /// donors table.
    pub fn donor_records(&self) -> Vec<DonorRecord> {
        let by_id: std::collections::HashMap<&str, &Identity> = self
            .donors
            .iter()
            .map(|identity| (identity.unique_id.as_str(), identity))
            .collect();
        self.allocation
            .contributions
            .iter()
            .filter_map(|contribution| {
                by_id
                    .get(contribution.identity_id.as_str())
                    .map(|identity| DonorRecord {
                        identity: (*identity).clone(),
                        contribution: contribution.clone(),
                    })
            })
            .collect()
    }

    pub fn kyc_rows(&self) -> Vec<KycRow> {
        let by_id: std::collections::HashMap<&str, &Identity> = self
            .prospects
            .iter()
            .map(|identity| (identity.unique_id.as_str(), identity))
            .collect();
        self.verifications
            .iter()
            .filter_map(|record| {
                by_id
                    .get(record.identity_id.as_str())
                    .map(|identity| KycRow::from_parts(identity, record))
            })
            .collect()
    }

    /// Write `prospects.csv`, `donors.csv`, and `kyc.csv` into `dir`.
    pub fn write_tables(&self, dir: &Path) -> Result<(), DataKitError> {
        std::fs::create_dir_all(dir)?;
        csv_store::write_prospects(&dir.join("prospects.csv"), &self.prospects)?;
        csv_store::write_donors(
            &dir.join("donors.csv"),
            &self.donors,
            &self.allocation.contributions,
        )?;
        csv_store::write_kyc(&dir.join("kyc.csv"), &self.prospects, &self.verifications)?;
        Ok(())
    }
}

/// Run the full generation pipeline for one spec.
///
/// Deterministic for a fixed spec: a single RNG is seeded from
/// `spec.seed` and threaded through every stage in a fixed order.
pub fn generate_dataset(spec: &GenerationSpec) -> Result<Dataset, DataKitError> {
    if spec.prospect_overlap > spec.prospect_count {
        return Err(DataKitError::InvalidSpec {
            reason: format!(
                "prospect_overlap {} exceeds prospect_count {}",
                spec.prospect_overlap, spec.prospect_count
            ),
        });
    }
    if spec.prospect_overlap > spec.donor_count {
        return Err(DataKitError::InvalidSpec {
            reason: format!(
                "prospect_overlap {} exceeds donor_count {}",
                spec.prospect_overlap, spec.donor_count
            ),
        });
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut pool = IdentityPool::new();

    let prospects = pool.generate(&mut rng, spec.prospect_count)?;
    info!(count = prospects.len(), "prospects generated");

    // Returning donors come out of the prospect pool; the rest are fresh
    // identities generated against the same uniqueness ledger.
    let overlap: Vec<Identity> = rand::seq::index::sample(
        &mut rng,
        prospects.len(),
        spec.prospect_overlap,
    )
    .into_iter()
    .map(|i| prospects[i].clone())
    .collect();
    let fresh = pool.generate(&mut rng, spec.donor_count - spec.prospect_overlap)?;
    let mut donors = overlap;
    donors.extend(fresh);
    donors.shuffle(&mut rng);
    info!(count = donors.len(), overlap = spec.prospect_overlap, "donor population assembled");

    let allocator = ContributionAllocator::new(
        spec.categories,
        spec.policy,
        spec.base_date,
        spec.date_span_days,
    );
    let allocation = allocator.allocate(&mut rng, &donors)?;
    info!(
        contributions = allocation.achieved_count,
        requested = allocation.requested_count,
        "contributions allocated"
    );

    let contributing = allocation
        .contributions
        .iter()
        .map(|c| c.identity_id.clone())
        .collect::<HashSet<_>>();
    let verifications =
        KycAssigner::assign(&mut rng, &prospects, &contributing, spec.kyc_fail_count)?;

    Ok(Dataset {
        prospects,
        donors,
        allocation,
        verifications,
    })
}
