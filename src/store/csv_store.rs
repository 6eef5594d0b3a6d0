//! CSV persistence for the three generated tables plus the failure-case
//! JSON report.
//!
//! Reading is lenient per row and strict per file: an unreadable file is
//! an error, but a row that fails parsing or validation is skipped,
//! logged, and reported back to the caller as a [`MalformedRecord`] so
//! processing continues for the rest of the table.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::{DataKitError, MalformedRecord};
use crate::model::{Contribution, FailureCase, Identity, VerificationRecord};
use crate::store::{DonorRecord, DonorRow, KycRow};

/// Result of loading one table: the rows that parsed plus the ones that
/// did not.
#[derive(Debug)]
pub struct TableLoad<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<MalformedRecord>,
}

pub fn write_prospects(path: &Path, prospects: &[Identity]) -> Result<(), DataKitError> {
    let mut writer = csv::Writer::from_path(path)?;
    for prospect in prospects {
        writer.serialize(prospect)?;
    }
    writer.flush()?;
    info!(count = prospects.len(), path = %path.display(), "prospects table written");
    Ok(())
}

/// Write one row per contribution, identity columns repeated. Every
/// contribution's identity must be present in `identities`.
pub fn write_donors(
    path: &Path,
    identities: &[Identity],
    contributions: &[Contribution],
) -> Result<(), DataKitError> {
    let by_id: std::collections::HashMap<&str, &Identity> = identities
        .iter()
        .map(|identity| (identity.unique_id.as_str(), identity))
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    for contribution in contributions {
        match by_id.get(contribution.identity_id.as_str()) {
            Some(identity) => writer.serialize(DonorRow::from_parts(identity, contribution))?,
            None => {
                // Generator output always satisfies this; external callers
                // passing mismatched tables get a warning, not bad rows.
                warn!(
                    identity_id = %contribution.identity_id,
                    "contribution references unknown identity; row skipped"
                );
            }
        }
    }
    writer.flush()?;
    info!(count = contributions.len(), path = %path.display(), "donors table written");
    Ok(())
}

pub fn write_kyc(
    path: &Path,
    identities: &[Identity],
    records: &[VerificationRecord],
) -> Result<(), DataKitError> {
    let by_id: std::collections::HashMap<&str, &Identity> = identities
        .iter()
        .map(|identity| (identity.unique_id.as_str(), identity))
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        match by_id.get(record.identity_id.as_str()) {
            Some(identity) => writer.serialize(KycRow::from_parts(identity, record))?,
            None => {
                warn!(
                    identity_id = %record.identity_id,
                    "verification record references unknown identity; row skipped"
                );
            }
        }
    }
    writer.flush()?;
    info!(count = records.len(), path = %path.display(), "kyc table written");
    Ok(())
}

pub fn read_prospects(path: &Path) -> Result<TableLoad<Identity>, DataKitError> {
    read_table(path, "prospects", |identity: Identity| {
        crate::store::validate_identity(&identity).map(|_| identity)
    })
}

pub fn read_donors(path: &Path) -> Result<TableLoad<DonorRecord>, DataKitError> {
    read_table(path, "donors", DonorRow::into_record)
}

pub fn read_kyc(path: &Path) -> Result<TableLoad<KycRow>, DataKitError> {
    read_table(path, "kyc", |row: KycRow| row.validate().map(|_| row))
}

/// Shared loader: deserialize each row, validate it, collect rejects.
fn read_table<Raw, T, F>(
    path: &Path,
    table: &'static str,
    convert: F,
) -> Result<TableLoad<T>, DataKitError>
where
    Raw: DeserializeOwned,
    F: Fn(Raw) -> Result<T, String>,
{
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    let mut rejected = Vec::new();

    for (idx, result) in reader.deserialize::<Raw>().enumerate() {
        let row_number = idx + 1;
        let outcome = match result {
            Ok(raw) => convert(raw),
            Err(e) => Err(e.to_string()),
        };
        match outcome {
            Ok(row) => rows.push(row),
            Err(reason) => {
                warn!(table, row = row_number, %reason, "malformed row skipped");
                rejected.push(MalformedRecord {
                    table,
                    row: row_number,
                    reason,
                });
            }
        }
    }

    info!(
        table,
        loaded = rows.len(),
        rejected = rejected.len(),
        path = %path.display(),
        "table loaded"
    );
    Ok(TableLoad { rows, rejected })
}

/// Write the failure-case report as a JSON array.
pub fn write_failures(path: &Path, failures: &[FailureCase]) -> Result<(), DataKitError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), failures)?;
    info!(count = failures.len(), path = %path.display(), "failure report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::ContributionAllocator;
    use crate::config::GenerationSpec;
    use crate::pool::IdentityPool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_tables_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let spec = GenerationSpec::default();
        let mut rng = StdRng::seed_from_u64(21);
        let donors = IdentityPool::new()
            .generate(&mut rng, spec.donor_count)
            .unwrap();
        let allocation = ContributionAllocator::new(
            spec.categories,
            spec.policy,
            spec.base_date,
            spec.date_span_days,
        )
        .allocate(&mut rng, &donors)
        .unwrap();

        let prospects_path = dir.path().join("prospects.csv");
        let donors_path = dir.path().join("donors.csv");
        write_prospects(&prospects_path, &donors).unwrap();
        write_donors(&donors_path, &donors, &allocation.contributions).unwrap();

        let prospects = read_prospects(&prospects_path).unwrap();
        assert!(prospects.rejected.is_empty());
        assert_eq!(prospects.rows, donors);

        let loaded = read_donors(&donors_path).unwrap();
        assert!(loaded.rejected.is_empty());
        assert_eq!(loaded.rows.len(), allocation.contributions.len());
        for (record, original) in loaded.rows.iter().zip(&allocation.contributions) {
            assert_eq!(&record.contribution, original);
        }
    }

    #[test]
    fn malformed_rows_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kyc.csv");
        std::fs::write(
            &path,
            "unique_id,first_name,last_name,kyc_status\n\
             AB12CD34,Ada,Cole,Yes\n\
             bad-id,Ben,Diaz,No\n\
             CD34EF56,Cara,Ruiz,\n\
             EF56GH78,Dan,Kim,Pending\n",
        )
        .unwrap();

        let load = read_kyc(&path).unwrap();
        assert_eq!(load.rows.len(), 2);
        assert_eq!(load.rejected.len(), 2);
        assert_eq!(load.rejected[0].table, "kyc");
        assert_eq!(load.rejected[0].row, 2);
        assert!(load.rejected[0].reason.contains("unique_id"));
        assert!(load.rejected[1].reason.contains("kyc_status"));
    }
}
