use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use csv_splitter::{Config, FileGenerator, GenerationRequest, LineSplitter};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_NAME: &str = "csv-splitter.yaml";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for generate and split (overrides config if provided)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Dry run mode - don't write files
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Directory the config is written to (`--output` does not apply)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Generate templated CSV files
    Generate {
        /// Number of files to generate
        #[arg(long)]
        count: u32,

        /// Rows per file; more than one switches to multi-row mode
        #[arg(long)]
        rows_per_file: Option<u32>,
    },
    /// Split a CSV file into one file per line
    Split {
        /// Input CSV file
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct Response<T: Serialize> {
    success: bool,
    message: String,
    data: T,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Config::load(path).context("Failed to load config")?
        }
        None => Config::default(),
    };

    match &cli.command {
        Commands::Init { path } => init_project(path, cli.dry_run)?,
        Commands::Generate {
            count,
            rows_per_file,
        } => generate(&cli, config, GenerationRequest::new(*count, *rows_per_file))?,
        Commands::Split { input } => split(&cli, config, input)?,
    }

    Ok(())
}

fn init_project(path: &Path, dry_run: bool) -> Result<()> {
    info!("Initializing csv-splitter config at {:?}", path);

    let target = path.join(DEFAULT_CONFIG_NAME);
    if target.exists() {
        anyhow::bail!("{:?} already exists", target);
    }
    let content = Config::default().to_yaml()?;
    if dry_run {
        info!("[DRY RUN] Would write: {:?}", target);
        return Ok(());
    }
    std::fs::create_dir_all(path)?;
    std::fs::write(&target, content)?;

    info!("✓ Config written to {:?}", target);
    info!("  Run: csv-splitter -c {} generate --count 10", DEFAULT_CONFIG_NAME);

    Ok(())
}

fn generate(cli: &Cli, mut config: Config, request: GenerationRequest) -> Result<()> {
    if let Some(ref out) = cli.output {
        config.output_dir = out.clone();
    }
    request.validate(config.max_file_count)?;

    if request.is_multi_row() {
        info!(
            "Generating {} CSV files with {} rows each (Multi-row mode)",
            request.file_count,
            request.rows_per_file.unwrap_or(1)
        );
    } else {
        info!(
            "Generating {} CSV files with 1 row each (Normal mode)",
            request.file_count
        );
    }
    if cli.dry_run {
        info!("=== DRY RUN MODE ===");
    }

    let generator = FileGenerator::from_config(&config, cli.dry_run);
    info!("Writing to {:?}", generator.output_dir());
    let result = generator
        .generate(&request)
        .context("Error generating files")?;

    let rows = match result.rows_per_file() {
        1 => "1 row".to_string(),
        n => format!("{} rows", n),
    };
    let message = format!(
        "Generated {} files with {} each successfully!",
        result.summary().total_files_generated,
        rows
    );
    print_response(message, &result)
}

fn split(cli: &Cli, config: Config, input: &Path) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open {:?}", input))?;
    let original_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut splitter = LineSplitter::new(&config.split);
    if let Some(ref out) = cli.output {
        splitter = splitter.with_output_dir(out);
    }
    let result = splitter
        .split(BufReader::new(file), &original_name)
        .context("Error splitting file")?;

    let message = format!(
        "Split {} into {} files successfully!",
        result.original_file_name, result.total_lines_processed
    );
    print_response(message, &result)
}

fn print_response<T: Serialize>(message: String, data: &T) -> Result<()> {
    let response = Response {
        success: true,
        message,
        data,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
