use clap::{Parser, Subcommand};
use claim_check::corrupt;
use claim_check::generator::{generate_records, GeneratorConfig};
use claim_check::iban::{format_iban, validate_iban, IbanValidation};
use claim_check::imei::validate_imei;
use claim_check::logging;
use claim_check::models::write_claims_csv;
use claim_check::preflight::{self, IssueLevel, PreflightReport};
use rand::Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "claim-check")]
#[command(about = "Insurance claim field validation and test data tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a single IBAN
    Iban(IbanArgs),
    /// Validate a single IMEI
    Imei(ImeiArgs),
    Generate(GenerateArgs),
    Corrupt(CorruptArgs),
    Preflight(PreflightArgs),
}

#[derive(Parser)]
struct IbanArgs {
    value: String,
}

#[derive(Parser)]
struct ImeiArgs {
    value: String,
}

#[derive(Parser)]
struct GenerateArgs {
    #[arg(long, default_value_t = 500)]
    records: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 1940)]
    oldest_birth_year: i32,
    #[arg(long, default_value_t = 2006)]
    youngest_birth_year: i32,
    #[arg(long, default_value = "data/synthetic/claims.csv")]
    output: PathBuf,
}

#[derive(Parser)]
struct CorruptArgs {
    #[arg(long, default_value = "data/synthetic/claims.csv")]
    input: PathBuf,
    #[arg(long, default_value = "data/synthetic/claims_invalid.csv")]
    output: PathBuf,
    #[arg(long, default_value_t = 0.05)]
    error_rate: f64,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser)]
struct PreflightArgs {
    #[arg(long, default_value = "data/synthetic/claims.csv")]
    input: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    logging::init_logging("claim-check")?;
    let cli = Cli::parse();
    match cli.command {
        Command::Iban(args) => run_iban(args),
        Command::Imei(args) => run_imei(args),
        Command::Generate(args) => run_generate(args),
        Command::Corrupt(args) => run_corrupt(args),
        Command::Preflight(args) => run_preflight(args),
    }
}

fn run_iban(args: IbanArgs) -> Result<(), String> {
    match validate_iban(&args.value) {
        IbanValidation::Valid => {
            emit_info_line(&format!("IBAN valid: {}", format_iban(&args.value)));
            Ok(())
        }
        IbanValidation::Invalid(err) => Err(format!("IBAN invalid ({}): {}", err.code(), err)),
    }
}

fn run_imei(args: ImeiArgs) -> Result<(), String> {
    if validate_imei(&args.value) {
        emit_info_line(&format!("IMEI valid: {}", args.value));
        Ok(())
    } else {
        Err(format!("IMEI invalid: {}", args.value))
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    let config = GeneratorConfig {
        records: args.records,
        oldest_birth_year: args.oldest_birth_year,
        youngest_birth_year: args.youngest_birth_year,
    };

    log::info!("Generating {} claim records (seed {})", config.records, seed);
    let gen_start = Instant::now();
    let records = generate_records(&config, seed)?;
    let gen_elapsed = gen_start.elapsed();
    write_claims_csv(&args.output, &records)?;

    log::info!(
        "generated {} records, seed {}, output {}",
        records.len(),
        seed,
        args.output.display()
    );
    emit_info_line(&format!(
        "Generation time: {} ms",
        gen_elapsed.as_millis()
    ));
    Ok(())
}

fn run_corrupt(args: CorruptArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    let summary = corrupt::corrupt_csv(&args.input, &args.output, args.error_rate, seed)?;

    emit_info_line(&format!(
        "Corrupt: input={} output={} seed={}",
        args.input.display(),
        args.output.display(),
        seed
    ));
    emit_info_line(&format!(
        "Corrupt errors: targeted={} iban_checksum={} iban_country={} imei_check_digit={} email={} phone={} birth_date={} damage_type={}",
        summary.records_targeted,
        summary.iban_checksum,
        summary.iban_country,
        summary.imei_check_digit,
        summary.email_malformed,
        summary.phone_short,
        summary.birth_date_impossible,
        summary.damage_type_unknown
    ));
    Ok(())
}

fn run_preflight(args: PreflightArgs) -> Result<(), String> {
    let start = Instant::now();
    let report = preflight::preflight_csv(&args.input)?;

    emit_info_line(&format!(
        "Preflight: records={} invalid_records={}",
        report.total_records, report.invalid_records
    ));
    emit_info_line(&format!(
        "Preflight issues: errors={} warnings={}",
        report.error_count(),
        report.warning_count()
    ));

    emit_issue_summary("error", &report, IssueLevel::Error);
    emit_issue_summary("warning", &report, IssueLevel::Warning);
    emit_info_line(&format!(
        "Preflight time: {} ms",
        start.elapsed().as_millis()
    ));

    if report.error_count() > 0 {
        return Err(format!(
            "preflight failed with {} error(s)",
            report.error_count()
        ));
    }

    Ok(())
}

fn emit_issue_summary(label: &str, report: &PreflightReport, level: IssueLevel) {
    let items = report.summarize(level);
    if items.is_empty() {
        return;
    }

    let max_items = 5usize;
    for (message, count) in items.iter().take(max_items) {
        emit_info_line(&format!("Preflight {}s: {} = {}", label, message, count));
    }
    if items.len() > max_items {
        emit_info_line(&format!(
            "Preflight {}s: {} additional issue types not shown",
            label,
            items.len() - max_items
        ));
    }
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        println!("{message}");
    }
}
