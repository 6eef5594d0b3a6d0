//! Persisted table schemas and row validation.
//!
//! Row structs mirror the on-disk column order exactly; conversion between
//! rows and model types happens here, including the format checks that
//! turn a bad row into a [`MalformedRecord`] instead of a panic or a
//! silently-wrong record.

pub mod csv_store;

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Contribution, Identity, KycStatus, VerificationRecord};
use crate::validator::NameIndex;

fn id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9]{8}$").unwrap())
}

fn wallet_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap())
}

/// One `donors.csv` row: identity columns plus the contribution columns,
/// one row per contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonorRow {
    pub unique_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub employer: String,
    pub occupation: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub wallet_address: String,
    /// Fixed two-decimal string.
    pub contribution_amount: String,
    /// `YYYY-MM-DD`.
    pub contribution_date: String,
    /// String integer, 1-based.
    pub contribution_number: String,
}

impl DonorRow {
    pub fn from_parts(identity: &Identity, contribution: &Contribution) -> Self {
        DonorRow {
            unique_id: identity.unique_id.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            phone_number: identity.phone_number.clone(),
            employer: identity.employer.clone(),
            occupation: identity.occupation.clone(),
            address_line_1: identity.address_line_1.clone(),
            address_line_2: identity.address_line_2.clone(),
            city: identity.city.clone(),
            state: identity.state.clone(),
            zip: identity.zip.clone(),
            wallet_address: identity.wallet_address.clone(),
            contribution_amount: format!("{:.2}", contribution.amount),
            contribution_date: contribution.date.format("%Y-%m-%d").to_string(),
            contribution_number: contribution.sequence_number.to_string(),
        }
    }

    /// Validate and split into model types.
    pub fn into_record(self) -> Result<DonorRecord, String> {
        let identity = Identity {
            unique_id: self.unique_id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            employer: self.employer,
            occupation: self.occupation,
            address_line_1: self.address_line_1,
            address_line_2: self.address_line_2,
            city: self.city,
            state: self.state,
            zip: self.zip,
            wallet_address: self.wallet_address,
        };
        validate_identity(&identity)?;

        let amount: Decimal = self
            .contribution_amount
            .parse()
            .map_err(|_| format!("unparseable contribution_amount '{}'", self.contribution_amount))?;
        if amount.is_sign_negative() {
            return Err(format!("negative contribution_amount '{amount}'"));
        }
        if amount.scale() > 2 {
            return Err(format!(
                "contribution_amount '{amount}' has sub-cent precision"
            ));
        }
        let date = NaiveDate::parse_from_str(&self.contribution_date, "%Y-%m-%d")
            .map_err(|_| format!("unparseable contribution_date '{}'", self.contribution_date))?;
        let sequence_number: u32 = self
            .contribution_number
            .parse()
            .map_err(|_| format!("unparseable contribution_number '{}'", self.contribution_number))?;
        if sequence_number < 1 {
            return Err("contribution_number must be >= 1".to_string());
        }

        let contribution = Contribution {
            identity_id: identity.unique_id.clone(),
            amount,
            date,
            sequence_number,
        };
        Ok(DonorRecord {
            identity,
            contribution,
        })
    }
}

/// A validated donors-table row.
#[derive(Debug, Clone)]
pub struct DonorRecord {
    pub identity: Identity,
    pub contribution: Contribution,
}

/// One `kyc.csv` row. The status is carried raw and normalized on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycRow {
    pub unique_id: String,
    pub first_name: String,
    pub last_name: String,
    pub kyc_status: String,
}

impl KycRow {
    pub fn from_parts(identity: &Identity, record: &VerificationRecord) -> Self {
        KycRow {
            unique_id: identity.unique_id.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            kyc_status: record.raw_status.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !id_pattern().is_match(&self.unique_id) {
            return Err(format!("invalid unique_id '{}'", self.unique_id));
        }
        if self.kyc_status.trim().is_empty() {
            return Err("missing kyc_status".to_string());
        }
        Ok(())
    }

    pub fn to_verification(&self) -> VerificationRecord {
        VerificationRecord {
            identity_id: self.unique_id.clone(),
            status: KycStatus::normalize(&self.kyc_status),
            raw_status: self.kyc_status.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Format and required-field checks shared by the prospect and donor
/// loaders.
pub fn validate_identity(identity: &Identity) -> Result<(), String> {
    if !id_pattern().is_match(&identity.unique_id) {
        return Err(format!("invalid unique_id '{}'", identity.unique_id));
    }
    if !wallet_pattern().is_match(&identity.wallet_address) {
        return Err(format!(
            "invalid wallet_address '{}'",
            identity.wallet_address
        ));
    }
    // address_line_2 is legitimately empty; everything else is required.
    let required = [
        ("first_name", &identity.first_name),
        ("last_name", &identity.last_name),
        ("phone_number", &identity.phone_number),
        ("employer", &identity.employer),
        ("occupation", &identity.occupation),
        ("address_line_1", &identity.address_line_1),
        ("city", &identity.city),
        ("state", &identity.state),
        ("zip", &identity.zip),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(format!("missing required field {field}"));
        }
    }
    Ok(())
}

/// Build the id-to-name lookup the validator uses for failure output.
pub fn build_name_index<'a>(
    donors: impl IntoIterator<Item = &'a DonorRecord>,
    kyc: impl IntoIterator<Item = &'a KycRow>,
    prospects: impl IntoIterator<Item = &'a Identity>,
) -> NameIndex {
    let mut names = NameIndex::new();
    for prospect in prospects {
        names.insert(prospect.unique_id.clone(), prospect.full_name());
    }
    for row in kyc {
        names.insert(row.unique_id.clone(), row.full_name());
    }
    for record in donors {
        names.insert(record.identity.unique_id.clone(), record.identity.full_name());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn identity() -> Identity {
        Identity {
            unique_id: "AB12CD34".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Cole".to_string(),
            phone_number: "555-1234".to_string(),
            employer: "University".to_string(),
            occupation: "Teacher".to_string(),
            address_line_1: "101 Oak Street".to_string(),
            address_line_2: String::new(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip: "78701".to_string(),
            wallet_address: format!("0x{}", "ab".repeat(20)),
        }
    }

    #[test]
    fn donor_row_round_trips() {
        let contribution = Contribution {
            identity_id: "AB12CD34".to_string(),
            amount: dec!(1700.00),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            sequence_number: 2,
        };
        let row = DonorRow::from_parts(&identity(), &contribution);
        assert_eq!(row.contribution_amount, "1700.00");
        assert_eq!(row.contribution_date, "2024-06-15");
        let record = row.into_record().unwrap();
        assert_eq!(record.identity, identity());
        assert_eq!(record.contribution, contribution);
    }

    #[test]
    fn bad_rows_are_rejected_with_reasons() {
        let contribution = Contribution {
            identity_id: "AB12CD34".to_string(),
            amount: dec!(10.00),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            sequence_number: 1,
        };
        let good = DonorRow::from_parts(&identity(), &contribution);

        let mut bad_id = good.clone();
        bad_id.unique_id = "short".to_string();
        assert!(bad_id.into_record().unwrap_err().contains("unique_id"));

        let mut bad_wallet = good.clone();
        bad_wallet.wallet_address = "0xnothex".to_string();
        assert!(bad_wallet
            .into_record()
            .unwrap_err()
            .contains("wallet_address"));

        let mut bad_amount = good.clone();
        bad_amount.contribution_amount = "-5.00".to_string();
        assert!(bad_amount.into_record().unwrap_err().contains("negative"));

        let mut bad_date = good.clone();
        bad_date.contribution_date = "06/15/2024".to_string();
        assert!(bad_date
            .into_record()
            .unwrap_err()
            .contains("contribution_date"));

        let mut missing = good;
        missing.city = String::new();
        assert!(missing.into_record().unwrap_err().contains("city"));
    }
}
