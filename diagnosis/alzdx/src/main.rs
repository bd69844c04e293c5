use std::fs;
use std::path::{Path, PathBuf};

use alzdx::model::fit_from_csv;
use alzdx::schema::{Field, FieldKind, Identity, PatientRecord, Section};
use alzdx::{generate_config, load_config, AppConfig, DiagnosisError, DiagnosisService, CONFIG_FILE};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "alzdx",
    version,
    about = "Alzheimer's disease risk screening from clinical and lifestyle data",
    long_about = "alzdx scores a patient record with a pre-trained classifier and writes\n\
        a PDF diagnosis report.\n\n\
        EXAMPLES:\n\
        \n  alzdx init-config                                   Write a default alzdx.toml\n\
        \n  alzdx fit-scaler --training train.csv --out scaler.json\n\
        \n  alzdx predict --patient p.json --name 'Jane Roe' --email jane@example.org\n\
        \n  alzdx schema --json                                 Print the field table"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a patient record and write the diagnosis report
    Predict(PredictArgs),
    /// Fit the feature scaler from training data
    FitScaler(FitScalerArgs),
    /// Print the patient field table
    Schema(SchemaArgs),
    /// Write a commented default configuration file
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Patient record as a JSON object keyed by field name
    #[arg(long, value_name = "FILE")]
    patient: PathBuf,

    /// Patient name printed on the report
    #[arg(long)]
    name: String,

    /// Patient email printed on the report
    #[arg(long)]
    email: String,

    /// Configuration file (defaults to ./alzdx.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report destination (overrides [report] output)
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct FitScalerArgs {
    /// Training data export (CSV with a header row)
    #[arg(long, value_name = "FILE")]
    training: PathBuf,

    /// Where to write the fitted scaler
    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    /// Columns to scale (defaults to Age, BMI and the cholesterol panel)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<Field>,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    #[arg(long, value_name = "FILE", default_value = CONFIG_FILE)]
    path: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let ctx = Context {
        verbose: cli.verbose > 0,
        quiet: cli.quiet,
    };
    let rc = match cli.command {
        Command::Predict(args) => run_predict(&ctx, &args),
        Command::FitScaler(args) => run_fit_scaler(&ctx, &args),
        Command::Schema(args) => run_schema(&args),
        Command::InitConfig(args) => run_init_config(&ctx, &args),
    };
    std::process::exit(rc);
}

/// `RUST_LOG` takes precedence over the `-v` count.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Info,
        (false, 2) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

struct Context {
    verbose: bool,
    quiet: bool,
}

impl Context {
    fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    fn verbose(&self, msg: &str) {
        if self.verbose && !self.quiet {
            println!("  {msg}");
        }
    }

    fn success(&self, msg: &str) {
        if !self.quiet {
            println!("✓ {msg}");
        }
    }
}

fn resolve_config(ctx: &Context, explicit: Option<&Path>) -> Result<AppConfig, i32> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(CONFIG_FILE);
            if !default.exists() {
                ctx.verbose(&format!("No {CONFIG_FILE} found, using defaults"));
                return Ok(AppConfig::default());
            }
            default
        }
    };
    match load_config(&path) {
        Ok(config) => {
            ctx.verbose(&format!("Loaded {}: {config}", path.display()));
            Ok(config)
        }
        Err(e) => {
            eprintln!("error: {e}");
            Err(2)
        }
    }
}

fn read_patient(path: &Path) -> Result<PatientRecord, i32> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: failed to read '{}': {e}", path.display());
            return Err(2);
        }
    };
    serde_json::from_str(&text).map_err(|e| {
        eprintln!("error: invalid patient record '{}': {e}", path.display());
        2
    })
}

fn run_predict(ctx: &Context, args: &PredictArgs) -> i32 {
    let config = match resolve_config(ctx, args.config.as_deref()) {
        Ok(c) => c,
        Err(rc) => return rc,
    };
    let service = match DiagnosisService::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    ctx.verbose(&format!("Classifier: {}", service.classifier().name()));

    let record = match read_patient(&args.patient) {
        Ok(r) => r,
        Err(rc) => return rc,
    };
    let identity = Identity::new(args.name.as_str(), args.email.as_str());

    let diagnosis = match service.diagnose(&record, identity) {
        Ok(d) => d,
        Err(e @ DiagnosisError::Validation(_)) => {
            eprintln!("error: {e}");
            return 2;
        }
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    ctx.info(&format!("Prediction: {}", diagnosis.result.label));
    ctx.info(&format!("Confidence Score: {}", diagnosis.result.confidence()));

    let out = args.out.clone().unwrap_or_else(|| config.report.output.clone());
    if let Err(e) = fs::write(&out, &diagnosis.pdf) {
        eprintln!("error: failed to write '{}': {e}", out.display());
        return 2;
    }
    ctx.success(&format!("Wrote report to {}", out.display()));
    0
}

fn run_fit_scaler(ctx: &Context, args: &FitScalerArgs) -> i32 {
    let text = match fs::read_to_string(&args.training) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: failed to read '{}': {e}", args.training.display());
            return 2;
        }
    };
    let fields: &[Field] = if args.fields.is_empty() {
        &Field::DEFAULT_SCALED
    } else {
        &args.fields
    };

    let scaler = match fit_from_csv(&text, fields) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    for column in scaler.columns() {
        ctx.verbose(&format!(
            "{}: mean={:.4} std={:.4}",
            column.field, column.mean, column.std
        ));
    }

    if let Err(e) = scaler.save(&args.out) {
        eprintln!("error: {e}");
        return 2;
    }
    ctx.success(&format!(
        "Fitted {} columns, wrote {}",
        scaler.columns().len(),
        args.out.display()
    ));
    0
}

#[derive(Debug, Serialize)]
struct FieldRow {
    index: usize,
    key: &'static str,
    label: &'static str,
    section: &'static str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    scaled_by_default: bool,
}

fn field_rows() -> Vec<FieldRow> {
    Field::ALL
        .iter()
        .map(|&field| {
            let section = Section::ALL
                .iter()
                .find(|s| s.fields().contains(&field))
                .map_or("", |s| s.title());
            let (kind, min, max) = match field.kind() {
                FieldKind::Continuous { min, max } => ("continuous", Some(min), Some(max)),
                FieldKind::Flag => ("flag", None, None),
            };
            FieldRow {
                index: field.index(),
                key: field.key(),
                label: field.label(),
                section,
                kind,
                min,
                max,
                scaled_by_default: Field::DEFAULT_SCALED.contains(&field),
            }
        })
        .collect()
}

fn run_schema(args: &SchemaArgs) -> i32 {
    let rows = field_rows();
    if args.json {
        match serde_json::to_string_pretty(&rows) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                return 1;
            }
        }
        return 0;
    }
    for row in rows {
        let range = match (row.min, row.max) {
            (Some(min), Some(max)) => format!("{min}..={max}"),
            _ => "0 | 1".to_string(),
        };
        let scaled = if row.scaled_by_default { "scaled" } else { "" };
        println!(
            "{:>2}  {:<26} {:<11} {:<12} {:<7} {}",
            row.index, row.key, row.kind, range, scaled, row.label
        );
    }
    0
}

fn run_init_config(ctx: &Context, args: &InitConfigArgs) -> i32 {
    if args.path.exists() {
        eprintln!("error: '{}' already exists", args.path.display());
        return 2;
    }
    if let Err(e) = fs::write(&args.path, generate_config()) {
        eprintln!("error: failed to write '{}': {e}", args.path.display());
        return 2;
    }
    ctx.success(&format!("Created {}", args.path.display()));
    0
}
