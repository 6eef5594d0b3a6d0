//! campaign-data CLI.
//!
//! Thin glue over the library: `generate` runs the seeded pipeline and
//! writes the three CSV tables, `validate` classifies persisted records
//! into failure cases, `check` runs the dataset quality-control report.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use campaign_data::store::csv_store;
use campaign_data::store::{build_name_index, DonorRecord};
use campaign_data::{
    generate_dataset, ComplianceValidator, CompliancePolicy, DatasetReport, GenerationSpec,
};

#[derive(Parser)]
#[command(name = "campaign-data")]
#[command(about = "Synthetic campaign donation data and contribution compliance checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the prospects, donors, and kyc tables
    Generate {
        /// YAML generation spec; compiled defaults apply when omitted
        #[arg(long)]
        spec: Option<PathBuf>,
        /// Output directory for the CSV tables
        #[arg(long, default_value = "data")]
        out: PathBuf,
        /// Override the spec's RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify persisted records into compliance failure cases
    Validate {
        /// Directory containing donors.csv and kyc.csv
        #[arg(long, default_value = "data")]
        data: PathBuf,
        /// Output path for the JSON failure report
        #[arg(long, default_value = "validation-failures.json")]
        out: PathBuf,
        /// Override the contribution limit
        #[arg(long)]
        limit: Option<Decimal>,
        /// Override the near-limit window
        #[arg(long)]
        window: Option<Decimal>,
    },

    /// Run the dataset quality-control report
    Check {
        /// Directory containing the three CSV tables
        #[arg(long, default_value = "data")]
        data: PathBuf,
        /// YAML generation spec the dataset is checked against
        #[arg(long)]
        spec: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match Cli::parse().command {
        Command::Generate { spec, out, seed } => generate(spec.as_deref(), &out, seed),
        Command::Validate {
            data,
            out,
            limit,
            window,
        } => validate(&data, &out, limit, window),
        Command::Check { data, spec } => check(&data, spec.as_deref()),
    }
}

fn load_spec(path: Option<&Path>) -> Result<GenerationSpec> {
    match path {
        Some(path) => GenerationSpec::from_yaml_file(path)
            .with_context(|| format!("failed to load spec from {}", path.display())),
        None => Ok(GenerationSpec::default()),
    }
}

fn generate(spec_path: Option<&Path>, out: &Path, seed: Option<u64>) -> Result<()> {
    let mut spec = load_spec(spec_path)?;
    if let Some(seed) = seed {
        spec.seed = seed;
    }

    let dataset = generate_dataset(&spec).context("generation failed")?;
    dataset
        .write_tables(out)
        .with_context(|| format!("failed to write tables to {}", out.display()))?;

    println!("Generated {} prospects", dataset.prospects.len());
    println!(
        "Generated {} unique donors with {} contributions",
        dataset.contributing_ids().len(),
        dataset.allocation.contributions.len()
    );
    if dataset.allocation.is_short() {
        println!(
            "WARNING: contribution count fell short of target ({} of {})",
            dataset.allocation.achieved_count, dataset.allocation.requested_count
        );
    }
    println!(
        "Assigned {} verification records ({} failing)",
        dataset.verifications.len(),
        spec.kyc_fail_count
    );
    println!("Tables written to {}", out.display());
    Ok(())
}

fn validate(
    data: &Path,
    out: &Path,
    limit: Option<Decimal>,
    window: Option<Decimal>,
) -> Result<()> {
    let donors = csv_store::read_donors(&data.join("donors.csv"))
        .with_context(|| format!("failed to read donors table in {}", data.display()))?;
    let kyc = csv_store::read_kyc(&data.join("kyc.csv"))
        .with_context(|| format!("failed to read kyc table in {}", data.display()))?;
    for rejected in donors.rejected.iter().chain(&kyc.rejected) {
        eprintln!("skipped malformed record: {rejected}");
    }

    let mut policy = CompliancePolicy::default();
    if let Some(limit) = limit {
        policy.limit = limit;
    }
    if let Some(window) = window {
        policy.near_limit_window = window;
    }

    let contributions: Vec<_> = donors
        .rows
        .iter()
        .map(|record| record.contribution.clone())
        .collect();
    let verifications: Vec<_> = kyc.rows.iter().map(|row| row.to_verification()).collect();
    let names = build_name_index(&donors.rows, &kyc.rows, []);

    let failures = ComplianceValidator::new(policy).validate(&contributions, &verifications, &names);
    csv_store::write_failures(out, &failures)
        .with_context(|| format!("failed to write failure report to {}", out.display()))?;

    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for failure in &failures {
        *by_kind.entry(failure.failure_type.as_str()).or_default() += 1;
    }
    println!("{} failure case(s) found", failures.len());
    for (kind, count) in by_kind {
        println!("  {kind}: {count}");
    }

    let evaluated: std::collections::BTreeSet<&str> = contributions
        .iter()
        .map(|c| c.identity_id.as_str())
        .chain(verifications.iter().map(|v| v.identity_id.as_str()))
        .collect();
    let failing: std::collections::BTreeSet<&str> =
        failures.iter().map(|f| f.unique_id.as_str()).collect();
    if !evaluated.is_empty() {
        let rate =
            100.0 * (evaluated.len() - failing.len()) as f64 / evaluated.len() as f64;
        println!(
            "{} of {} identities compliant ({rate:.1}%)",
            evaluated.len() - failing.len(),
            evaluated.len()
        );
    }
    println!("Failure report written to {}", out.display());
    Ok(())
}

fn check(data: &Path, spec_path: Option<&Path>) -> Result<()> {
    let spec = load_spec(spec_path)?;
    let prospects = csv_store::read_prospects(&data.join("prospects.csv"))
        .with_context(|| format!("failed to read prospects table in {}", data.display()))?;
    let donors = csv_store::read_donors(&data.join("donors.csv"))?;
    let kyc = csv_store::read_kyc(&data.join("kyc.csv"))?;
    for rejected in prospects
        .rejected
        .iter()
        .chain(&donors.rejected)
        .chain(&kyc.rejected)
    {
        eprintln!("skipped malformed record: {rejected}");
    }

    let donor_records: Vec<DonorRecord> = donors.rows;
    let report = DatasetReport::build(&spec, &prospects.rows, &donor_records, &kyc.rows);
    print!("{report}");

    if !report.is_clean() {
        bail!("quality control found {} issue(s)", report.findings.len());
    }
    Ok(())
}
