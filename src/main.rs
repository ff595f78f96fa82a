//! TRC Rating CLI
//!
//! Prices a single quote request (JSON) or a batch of projects (CSV)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use trc_rating::project::{load_projects, ProjectRecord};
use trc_rating::{
    PremiumBreakdown, QuoteOutcome, QuoteRequest, QuoteResult, QuoteRunner, RatingConfig,
    RatingError, TariffEdition,
};

#[derive(Parser)]
#[command(name = "trc-rating")]
#[command(version, about = "Tariff rating for All Risks Construction Site quotes")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Tariff edition used when no --config file is given
    #[arg(long, global = true, value_enum, default_value = "bracket")]
    edition: EditionArg,

    /// Directory holding base_rates.csv, equipment_rates.csv and ancillary_brackets.csv
    #[arg(long, global = true)]
    tariffs: Option<PathBuf>,

    /// Rating configuration as JSON; overrides --edition
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Price one quote request
    Quote {
        /// Quote request file (JSON)
        #[arg(long)]
        request: PathBuf,
    },

    /// Price every project of a CSV batch with schedule defaults
    Batch {
        /// Project batch file (CSV)
        #[arg(long)]
        projects: PathBuf,

        /// Summary output file
        #[arg(long, default_value = "quote_batch_output.csv")]
        output: PathBuf,
    },
}

/// One batch entry in JSON output: the quote, or why it could not be priced
#[derive(Serialize)]
#[serde(untagged)]
enum BatchEntry<'a> {
    Quoted(&'a QuoteResult),
    Failed { quote_id: &'a str, error: String },
}

fn batch_entries<'a>(
    records: &'a [ProjectRecord],
    results: &'a [Result<QuoteResult, RatingError>],
) -> Vec<BatchEntry<'a>> {
    records
        .iter()
        .zip(results)
        .map(|(record, result)| match result {
            Ok(quote) => BatchEntry::Quoted(quote),
            Err(e) => BatchEntry::Failed {
                quote_id: &record.quote_id,
                error: e.to_string(),
            },
        })
        .collect()
}

#[derive(Clone, Copy, ValueEnum)]
enum EditionArg {
    Bracket,
    Percentage,
}

impl From<EditionArg> for TariffEdition {
    fn from(arg: EditionArg) -> Self {
        match arg {
            EditionArg::Bracket => TariffEdition::Bracket,
            EditionArg::Percentage => TariffEdition::Percentage,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let runner = build_runner(&cli)?;

    match &cli.command {
        Command::Quote { request } => run_quote(&runner, request, cli.json),
        Command::Batch { projects, output } => run_batch(&runner, projects, output, cli.json),
    }
}

fn build_runner(cli: &Cli) -> Result<QuoteRunner> {
    let config = match &cli.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening rating config {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing rating config {}", path.display()))?
        }
        None => {
            let edition = TariffEdition::from(cli.edition);
            log::info!("Rating with the {} edition", edition.as_str());
            RatingConfig::for_edition(edition)
        }
    };

    match &cli.tariffs {
        Some(dir) => QuoteRunner::from_csv_path(dir, config)
            .with_context(|| format!("loading tariffs from {}", dir.display())),
        None => Ok(QuoteRunner::with_config(config)),
    }
}

fn run_quote(runner: &QuoteRunner, path: &Path, json: bool) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("opening quote request {}", path.display()))?;
    let request: QuoteRequest = serde_json::from_reader(file)
        .with_context(|| format!("parsing quote request {}", path.display()))?;

    let result = runner.run(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &QuoteResult) {
    if let Some(id) = &result.quote_id {
        println!("Quote {}", id);
    }

    match &result.outcome {
        QuoteOutcome::Priced(breakdown) => print_breakdown(breakdown),
        QuoteOutcome::Referral(referral) => {
            println!("Referral: the schedule does not apply");
            for violation in &referral.violations {
                println!("  - {}", violation);
            }
        }
    }

    println!("\nMandatory clauses:");
    for clause in &result.clauses.mandatory {
        println!("  {:<9} {}", clause.code, clause.title);
    }
    if !result.clauses.extensions.is_empty() {
        println!("Extension clauses:");
        for clause in &result.clauses.extensions {
            println!("  {:<9} {}", clause.code, clause.title);
        }
    }

    if !result.missing_documents.is_empty() {
        println!("\nMissing documents:");
        for doc in &result.missing_documents {
            println!("  - {}", doc.label());
        }
    }
}

fn print_breakdown(breakdown: &PremiumBreakdown) {
    if let Some(rates) = &breakdown.works_rates {
        println!(
            "Works rates (per mille): base {:.3}  adjusted {:.3}  net {:.3}",
            rates.base_rate, rates.adjusted_rate, rates.net_rate
        );
    }

    println!("{:<45} {:>18} {:>10}", "Cover", "Premium", "Rate");
    println!("{}", "-".repeat(75));
    for line in &breakdown.lines {
        println!(
            "{:<45} {:>18.0} {:>10}",
            line.label,
            line.amount,
            line.rate_display()
        );
    }
    println!("{}", "-".repeat(75));
    println!("{:<45} {:>18.0}", "Net premium", breakdown.net_premium);
    println!("{:<45} {:>18.0}", "Ancillary fee", breakdown.ancillary_fee);
    println!("{:<45} {:>18.0}", "Tax", breakdown.tax);
    println!("{:<45} {:>18.0}", "Gross premium", breakdown.gross_premium);
}

fn run_batch(runner: &QuoteRunner, projects: &Path, output: &Path, json: bool) -> Result<()> {
    let start = Instant::now();
    let records = load_projects(projects)
        .with_context(|| format!("loading projects from {}", projects.display()))?;
    log::info!("Loaded {} projects in {:?}", records.len(), start.elapsed());

    let results = runner.run_projects(&records);
    log::info!("Priced {} projects in {:?}", results.len(), start.elapsed());

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record([
        "QuoteId",
        "Outcome",
        "NetPremium",
        "AncillaryFee",
        "Tax",
        "GrossPremium",
        "Detail",
    ])?;

    let mut priced = 0;
    let mut referred = 0;
    let mut failed = 0;

    for (record, result) in records.iter().zip(&results) {
        let row = match result {
            Ok(quote) => match &quote.outcome {
                QuoteOutcome::Priced(b) => {
                    priced += 1;
                    vec![
                        record.quote_id.clone(),
                        "priced".to_string(),
                        format!("{:.2}", b.net_premium),
                        format!("{:.2}", b.ancillary_fee),
                        format!("{:.2}", b.tax),
                        format!("{:.2}", b.gross_premium),
                        String::new(),
                    ]
                }
                QuoteOutcome::Referral(r) => {
                    referred += 1;
                    let detail = r
                        .violations
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join("; ");
                    vec![
                        record.quote_id.clone(),
                        "referral".to_string(),
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        detail,
                    ]
                }
            },
            Err(e) => {
                failed += 1;
                log::error!("{}: {}", record.quote_id, e);
                vec![
                    record.quote_id.clone(),
                    "error".to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    e.to_string(),
                ]
            }
        };
        writer.write_record(&row)?;
    }
    writer.flush()?;

    if json {
        let entries = batch_entries(&records, &results);
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!(
            "{} projects: {} priced, {} referred, {} failed",
            records.len(),
            priced,
            referred,
            failed
        );
        println!("Summary written to: {}", output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trc_rating::project::{DeductibleTier, ProjectProfile, StructureClass};

    #[test]
    fn test_batch_json_keeps_failed_quotes() {
        let mut invalid = ProjectProfile::road(1e8, 12, DeductibleTier::Normal);
        invalid.structure = Some(StructureClass::A);
        let records = vec![
            ProjectRecord {
                quote_id: "OK-1".to_string(),
                profile: ProjectProfile::sanitation(1e8, 12, DeductibleTier::Normal),
            },
            ProjectRecord {
                quote_id: "BAD-1".to_string(),
                profile: invalid,
            },
        ];
        let results = QuoteRunner::new().run_projects(&records);

        let json = serde_json::to_value(batch_entries(&records, &results)).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["quote_id"], "OK-1");
        assert_eq!(entries[0]["outcome"]["outcome"], "priced");
        assert_eq!(entries[1]["quote_id"], "BAD-1");
        assert_eq!(entries[1]["error"], "Road works take no structure class");
    }
}
