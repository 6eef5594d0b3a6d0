//! Validator over generator output and over hand-built edge-case tables.

use campaign_data::store::{build_name_index, csv_store};
use campaign_data::{
    generate_dataset, ComplianceValidator, FailureKind, GenerationSpec,
};

#[test]
fn generated_dataset_produces_only_expected_failure_kinds() {
    let spec = GenerationSpec::default();
    let dataset = generate_dataset(&spec).unwrap();

    let contributions = dataset.allocation.contributions.clone();
    let verifications = dataset.verifications.clone();
    let kyc_rows = dataset.kyc_rows();
    let names = build_name_index(&[], &kyc_rows, &dataset.donors);

    let validator = ComplianceValidator::new(spec.policy);
    let failures = validator.validate(&contributions, &verifications, &names);

    // A clean dataset never breaches the limit, so the only possible kinds
    // are near-limit warnings and KYC rejections.
    for failure in &failures {
        assert!(
            matches!(
                failure.failure_type,
                FailureKind::WouldExceedWithNewDonation | FailureKind::KycRejection
            ),
            "unexpected kind {:?} for {}",
            failure.failure_type,
            failure.unique_id
        );
    }

    let kyc_rejections = failures
        .iter()
        .filter(|f| f.failure_type == FailureKind::KycRejection)
        .count();
    assert_eq!(kyc_rejections, spec.kyc_fail_count);

    // At-limit, just-under, and multi-to-exact donors all sit inside the
    // near-limit window by construction.
    let near_limit = failures
        .iter()
        .filter(|f| f.failure_type == FailureKind::WouldExceedWithNewDonation)
        .count();
    let floor = spec.categories.at_limit_donors
        + spec.categories.just_under_limit.donors
        + spec.categories.multi_exact.donors;
    assert!(near_limit >= floor, "{near_limit} < {floor}");
}

#[test]
fn failure_report_json_carries_rule_specific_fields() {
    let spec = GenerationSpec::default();
    let dataset = generate_dataset(&spec).unwrap();
    let kyc_rows = dataset.kyc_rows();
    let names = build_name_index(&[], &kyc_rows, &dataset.donors);
    let failures = ComplianceValidator::new(spec.policy).validate(
        &dataset.allocation.contributions,
        &dataset.verifications,
        &names,
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("validation-failures.json");
    csv_store::write_failures(&path, &failures).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let cases = parsed.as_array().unwrap();
    assert_eq!(cases.len(), failures.len());

    for case in cases {
        let case = case.as_object().unwrap();
        assert!(case.contains_key("unique_id"));
        assert!(case.contains_key("name"));
        assert!(case.contains_key("reason"));
        match case["failure_type"].as_str().unwrap() {
            "would_exceed_with_new_donation" => {
                assert!(case.contains_key("current_amount"));
                assert!(case.contains_key("remaining_allowed"));
                assert!(!case.contains_key("kyc_status"));
            }
            "kyc_rejection" => {
                assert!(case.contains_key("kyc_status"));
                assert!(!case.contains_key("remaining_allowed"));
            }
            other => panic!("unexpected failure_type {other}"),
        }
    }
}

#[test]
fn validator_accepts_externally_sourced_tables() {
    // Hand-written tables, nothing from the generator: one donor over the
    // individual limit, one over cumulative, one unverified prospect.
    let dir = tempfile::tempdir().unwrap();
    let donors_path = dir.path().join("donors.csv");
    let kyc_path = dir.path().join("kyc.csv");

    let identity_cols = "555-0000,University,Teacher,1 Oak Street,,Austin,TX,78701";
    let wallet_a = format!("0x{}", "aa".repeat(20));
    let wallet_b = format!("0x{}", "bb".repeat(20));
    std::fs::write(
        &donors_path,
        format!(
            "unique_id,first_name,last_name,phone_number,employer,occupation,address_line_1,\
             address_line_2,city,state,zip,wallet_address,contribution_amount,contribution_date,\
             contribution_number\n\
             AAAA1111,Ada,Cole,{identity_cols},{wallet_a},3400.00,2024-02-01,1\n\
             BBBB2222,Ben,Diaz,{identity_cols},{wallet_b},1700.00,2024-03-01,1\n\
             BBBB2222,Ben,Diaz,{identity_cols},{wallet_b},1700.00,2024-04-01,2\n"
        ),
    )
    .unwrap();
    std::fs::write(
        &kyc_path,
        "unique_id,first_name,last_name,kyc_status\n\
         AAAA1111,Ada,Cole,Yes\n\
         BBBB2222,Ben,Diaz,Yes\n\
         CCCC3333,Cara,Ruiz,Pending\n",
    )
    .unwrap();

    let donors = csv_store::read_donors(&donors_path).unwrap();
    let kyc = csv_store::read_kyc(&kyc_path).unwrap();
    assert!(donors.rejected.is_empty());

    let contributions: Vec<_> = donors
        .rows
        .iter()
        .map(|record| record.contribution.clone())
        .collect();
    let verifications: Vec<_> = kyc.rows.iter().map(|row| row.to_verification()).collect();
    let names = build_name_index(&donors.rows, &kyc.rows, []);

    let spec = GenerationSpec::default();
    let failures =
        ComplianceValidator::new(spec.policy).validate(&contributions, &verifications, &names);

    let kinds: Vec<(String, FailureKind)> = failures
        .iter()
        .map(|f| (f.unique_id.clone(), f.failure_type))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("AAAA1111".to_string(), FailureKind::OverIndividualLimit),
            ("AAAA1111".to_string(), FailureKind::OverCumulativeLimit),
            ("BBBB2222".to_string(), FailureKind::OverCumulativeLimit),
            ("CCCC3333".to_string(), FailureKind::KycRejection),
        ]
    );
    assert_eq!(failures[0].name, "Ada Cole");
    assert_eq!(failures[3].kyc_status.as_deref(), Some("Pending"));
}

#[test]
fn malformed_rows_do_not_stop_validation() {
    let dir = tempfile::tempdir().unwrap();
    let donors_path = dir.path().join("donors.csv");
    let wallet = format!("0x{}", "cc".repeat(20));
    std::fs::write(
        &donors_path,
        format!(
            "unique_id,first_name,last_name,phone_number,employer,occupation,address_line_1,\
             address_line_2,city,state,zip,wallet_address,contribution_amount,contribution_date,\
             contribution_number\n\
             not-an-id,Ada,Cole,555-0000,University,Teacher,1 Oak Street,,Austin,TX,78701,{wallet},10.00,2024-02-01,1\n\
             DDDD4444,Dan,Kim,555-0001,University,Teacher,2 Oak Street,,Austin,TX,78701,{wallet},3400.00,2024-02-02,1\n"
        ),
    )
    .unwrap();

    let donors = csv_store::read_donors(&donors_path).unwrap();
    assert_eq!(donors.rejected.len(), 1);
    assert_eq!(donors.rows.len(), 1);

    let contributions: Vec<_> = donors
        .rows
        .iter()
        .map(|record| record.contribution.clone())
        .collect();
    let names = build_name_index(&donors.rows, [], []);
    let spec = GenerationSpec::default();
    let failures = ComplianceValidator::new(spec.policy).validate(&contributions, &[], &names);
    assert_eq!(failures.len(), 2, "good row still classified");
    assert_eq!(failures[0].unique_id, "DDDD4444");
}
