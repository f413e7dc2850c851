//! ration CLI - Command-line interface for rationmix
//!
//! Commands:
//! - formulate: Compute a feed mix from a request JSON
//! - targets: Print the active nutritional target table
//! - validate: Validate a formulation request
//! - schema: Print request/result shape information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rationmix::pipeline::FeedProcessor;
use rationmix::report::{render_text, ReportRenderer};
use rationmix::request::FormulationRequest;
use rationmix::targets::{TargetTable, ALL_TARGET_KEYS};
use rationmix::ENGINE_VERSION;

/// ration - Formulation engine for two-ingredient livestock feed rations
#[derive(Parser)]
#[command(name = "ration")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Compute two-ingredient feed-mixing recipes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a feed mix from a request JSON
    Formulate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Load the target table from a JSON file instead of the built-ins
        #[arg(long)]
        load_targets: Option<PathBuf>,
    },

    /// Print the active nutritional target table
    Targets {
        /// Load the target table from a JSON file instead of the built-ins
        #[arg(long)]
        load_targets: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a formulation request
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print request/result shape information
    Schema {
        /// Schema to print
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Plain-text advisory sheet
    Text,
    /// Compact JSON report
    Json,
    /// Pretty-printed JSON report
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Request shape (formulation inputs)
    Request,
    /// Result shape (recipe, analysis, warnings)
    Result,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RationCliError> {
    match cli.command {
        Commands::Formulate {
            input,
            output,
            output_format,
            load_targets,
        } => cmd_formulate(&input, &output, output_format, load_targets.as_deref()),

        Commands::Targets { load_targets, json } => cmd_targets(load_targets.as_deref(), json),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Schema { schema_type } => cmd_schema(schema_type),
    }
}

fn cmd_formulate(
    input: &PathBuf,
    output: &PathBuf,
    output_format: OutputFormat,
    load_targets: Option<&Path>,
) -> Result<(), RationCliError> {
    let request = read_request(input)?;
    request.validate()?;

    let processor = match load_targets {
        Some(path) => {
            let mut processor = FeedProcessor::new();
            processor.load_targets(&fs::read_to_string(path)?)?;
            processor
        }
        None => FeedProcessor::new(),
    };

    let result = processor.formulate(&request)?;

    let renderer = ReportRenderer::new();
    let report = renderer.build(request.category, request.stage, request.batch_size, result);

    let output_data = match output_format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::JsonPretty => renderer.to_json(&report)?,
    };

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_targets(load_targets: Option<&Path>, json: bool) -> Result<(), RationCliError> {
    let table = match load_targets {
        Some(path) => TargetTable::from_json(&fs::read_to_string(path)?)?,
        None => TargetTable::default(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Nutritional targets");
    for (category, stage) in ALL_TARGET_KEYS {
        match table.get(category, stage) {
            Ok(target) => {
                println!(
                    "  {}/{}: protein {}%, energy {} kJ/g, premix {} packs/ton ({})",
                    category.as_str(),
                    stage.as_str(),
                    target.target_protein_percent,
                    target.target_energy_density,
                    target.additive_packs_per_ton,
                    target.description,
                );
            }
            Err(_) => {
                println!("  {}/{}: MISSING", category.as_str(), stage.as_str());
            }
        }
    }

    if !table.is_complete() {
        return Err(RationCliError::IncompleteTargets);
    }

    Ok(())
}

fn cmd_validate(input: &PathBuf, json: bool) -> Result<(), RationCliError> {
    let request = read_request(input)?;
    let outcome = request.validate();

    if json {
        let report = ValidationReport {
            valid: outcome.is_ok(),
            error: outcome.as_ref().err().map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &outcome {
            Ok(()) => println!("Request is valid"),
            Err(e) => println!("Request is invalid: {}", e),
        }
    }

    outcome.map_err(RationCliError::Validation)
}

fn cmd_schema(schema_type: SchemaType) -> Result<(), RationCliError> {
    match schema_type {
        SchemaType::Request => {
            println!("Request shape (JSON object):");
            println!();
            println!("- category: \"external\" | \"local\"");
            println!("- stage: \"grower\" | \"finisher\"");
            println!("- batch_size: standard (10% moisture) feed to produce, kg, positive");
            println!("- kitchen: {{ id, name, protein_percent, moisture_percent, energy_density }}");
            println!("- energy: {{ id, name, protein_percent, moisture_percent, energy_density }}");
            println!();
            println!("protein_percent and energy_density are as-measured (not normalized);");
            println!("moisture_percent must be within [0, 100).");
        }
        SchemaType::Result => {
            println!("Result shape (JSON object):");
            println!();
            println!("- line_items: 3 entries, ordered kitchen / energy / additive");
            println!("  - name, actual_weight (kg; packs for the additive)");
            println!("  - standard_weight (kg at 10% moisture)");
            println!("  - percent: share of the standard batch (0 for the additive)");
            println!("  - note: raw moisture or dosage rule");
            println!("- analysis: {{ protein_percent, energy_density, moisture_percent, dry_matter_percent }}");
            println!("- warnings: advisory strings, order protein / energy / moisture");
        }
    }

    Ok(())
}

// Helper functions

fn read_request(input: &PathBuf) -> Result<FormulationRequest, RationCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Reading request JSON from stdin (end with Ctrl-D)...");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    if input_data.trim().is_empty() {
        return Err(RationCliError::NoInput);
    }

    serde_json::from_str(&input_data).map_err(RationCliError::Json)
}

// Error types

#[derive(Debug)]
enum RationCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Engine(rationmix::FormulationError),
    Validation(rationmix::request::ValidationError),
    NoInput,
    IncompleteTargets,
}

impl From<io::Error> for RationCliError {
    fn from(e: io::Error) -> Self {
        RationCliError::Io(e)
    }
}

impl From<serde_json::Error> for RationCliError {
    fn from(e: serde_json::Error) -> Self {
        RationCliError::Json(e)
    }
}

impl From<rationmix::FormulationError> for RationCliError {
    fn from(e: rationmix::FormulationError) -> Self {
        RationCliError::Engine(e)
    }
}

impl From<rationmix::request::ValidationError> for RationCliError {
    fn from(e: rationmix::request::ValidationError) -> Self {
        RationCliError::Validation(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<RationCliError> for CliError {
    fn from(e: RationCliError) -> Self {
        match e {
            RationCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            RationCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'ration schema request' for the expected shape".to_string()),
            },
            RationCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the target table covers the category/stage".to_string()),
            },
            RationCliError::Validation(e) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'ration validate' for details".to_string()),
            },
            RationCliError::NoInput => CliError {
                code: "NO_INPUT".to_string(),
                message: "No request found in input".to_string(),
                hint: Some("Ensure the input file is not empty".to_string()),
            },
            RationCliError::IncompleteTargets => CliError {
                code: "INCOMPLETE_TARGETS".to_string(),
                message: "Target table is missing entries".to_string(),
                hint: Some("Supply a table covering every category/stage pair".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    valid: bool,
    error: Option<String>,
}
