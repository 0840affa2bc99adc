use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gallerypia_valuation::valuation::input::DocumentFormat;
use gallerypia_valuation::valuation::{self, ValuationConfig, ValuationInput};
use gallerypia_valuation::{config, output};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate artworks from a YAML or JSON file, highest score first
    Evaluate {
        /// File holding a single artwork or an `artworks:` list
        file: PathBuf,

        /// Year used for exhibition recency (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Weight preset to use instead of the configured weights
        /// (balanced, artist, market)
        #[arg(long)]
        preset: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Print the score-to-price curve for the configured base price
    Curve {
        /// Score increment between rows
        #[arg(long, default_value_t = 10)]
        step: u32,
    },
    /// Convert between the base currency and the secondary unit
    Convert {
        amount: f64,

        /// Treat AMOUNT as secondary units and convert to base currency
        #[arg(long)]
        from_secondary: bool,
    },
    /// Write the default config file
    Init {
        /// Where to write (defaults to ~/.config/gallerypia/config.yaml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "gallerypia-valuation")]
#[command(about = "Artwork valuation scoring and pricing", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gallerypia/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init { path, force } = &cli.command {
        let code = match run_init(path.clone(), *force) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_CONFIG
            }
        };
        std::process::exit(code);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Commands::Evaluate {
        preset: Some(name), ..
    } = &cli.command
    {
        match valuation::WeightSet::preset(name) {
            Some(weights) => config.weights = weights,
            None => {
                eprintln!(
                    "Unknown weight preset '{}'. Use balanced, artist or market.",
                    name
                );
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Validate config at startup
    if let Err(errors) = valuation::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match cli.command {
        Commands::Evaluate {
            file, year, format, ..
        } => run_evaluate(&file, year, format, &config, cli.verbose),
        Commands::Curve { step } => {
            println!(
                "{}",
                output::format_curve_table(
                    step,
                    config.pricing.base_price_unit,
                    &config.pricing.currency
                )
            );
            EXIT_SUCCESS
        }
        Commands::Convert {
            amount,
            from_secondary,
        } => run_convert(amount, from_secondary, &config),
        Commands::Init { .. } => EXIT_SUCCESS,
    };

    std::process::exit(code);
}

fn run_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => config::get_config_path()?,
    };
    config::write_default_config(&path, force)?;
    println!("Config written to {}", path.display());
    Ok(())
}

/// Read either a batch document (`artworks: [...]`) or a single artwork
fn load_artworks(path: &Path) -> Result<Vec<ValuationInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let format = if is_json {
        DocumentFormat::Json
    } else {
        DocumentFormat::Yaml
    };

    valuation::input::parse_artworks(&content, format)
        .with_context(|| format!("Invalid artwork document {}", path.display()))
}

fn run_evaluate(
    file: &Path,
    year: Option<i32>,
    format: OutputFormat,
    config: &ValuationConfig,
    verbose: bool,
) -> i32 {
    let start_time = Instant::now();

    let artworks = match load_artworks(file) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };
    tracing::debug!(count = artworks.len(), file = %file.display(), "loaded artworks");

    let current_year = year.unwrap_or_else(|| chrono::Local::now().year());

    let mut results = match valuation::evaluate_all(&artworks, config, current_year) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Valuation error: {}", e);
            return EXIT_FAILURE;
        }
    };
    valuation::rank(&mut results);

    match format {
        OutputFormat::Table => {
            let use_colors = output::should_use_colors();
            if verbose && !results.is_empty() {
                for result in &results {
                    println!("{}", output::format_result_detail(result, use_colors));
                    println!();
                }
            } else {
                println!("{}", output::format_results_table(&results, use_colors));
            }
        }
        OutputFormat::Tsv => println!("{}", output::format_tsv(&results)),
        OutputFormat::Json => match output::format_json(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                return EXIT_FAILURE;
            }
        },
    }

    tracing::info!(
        count = results.len(),
        elapsed = ?start_time.elapsed(),
        "evaluation finished"
    );
    EXIT_SUCCESS
}

fn run_convert(amount: f64, from_secondary: bool, config: &ValuationConfig) -> i32 {
    let Some(ref secondary) = config.pricing.secondary else {
        eprintln!("No secondary unit configured under pricing.secondary");
        return EXIT_CONFIG;
    };

    let currency = &config.pricing.currency;
    let converted = if from_secondary {
        valuation::from_secondary_unit(amount, secondary.exchange_rate)
            .map(|v| format!("{} {} = {:.0} {}", amount, secondary.symbol, v, currency))
    } else {
        valuation::to_secondary_unit(amount, secondary.exchange_rate)
            .map(|v| format!("{} {} = {:.6} {}", amount, currency, v, secondary.symbol))
    };

    match converted {
        Ok(line) => {
            println!("{}", line);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Conversion error: {}", e);
            EXIT_CONFIG
        }
    }
}
