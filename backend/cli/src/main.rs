mod doctor_cmd;
mod run_cmd;
mod terminal_output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use ocrname_config::{
    config_dir, config_file_path, load_and_prepare, render_config, OcrConfig, OcrNameConfig, Settings,
};
use ocrname_core::RunSummary;
use ocrname_logging::init_logger;

use terminal_output::render_summary;

#[derive(Parser)]
#[command(name = "ocrname")]
#[command(about = "Rename garbled image files after the most prominent text inside them")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.ocrname/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory to scan instead of the configured one
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// OCR executable to run
    #[arg(long, global = true)]
    tool: Option<String>,

    /// Seconds to wait for the OCR tool per image
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Show what would be renamed without touching any file
    #[arg(long)]
    dry_run: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the directory, the OCR tool and the configuration
    Doctor,
    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Command-line values take precedence over file and environment.
    fn apply_overrides(&self, config: &mut OcrNameConfig) {
        if let Some(dir) = &self.dir {
            config.directory = Some(dir.to_string_lossy().into_owned());
        }
        let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
        if let Some(tool) = &self.tool {
            ocr.tool_path = Some(tool.clone());
        }
        if let Some(timeout) = self.timeout {
            ocr.timeout_secs = Some(timeout);
        }
    }
}

/// Non-zero when any file of the pass failed.
fn exit_code(summary: &RunSummary) -> ExitCode {
    if summary.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let prepared = load_and_prepare(&config_path).await?;
    let mut config = prepared.config;
    cli.apply_overrides(&mut config);
    let settings = Settings::from_config(&config);

    if let Some(dir) = &settings.log_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    let level = if cli.verbose { "debug" } else { settings.log_level.as_str() };
    init_logger(level, settings.log_dir.as_deref());

    for warning in &prepared.warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }

    match cli.command {
        None => {
            info!(config = %config_path.display(), "Starting rename pass");
            let summary = run_cmd::run(&settings, cli.dry_run).await?;
            println!("\n{}", render_summary(&summary, cli.dry_run));
            Ok(exit_code(&summary))
        }
        Some(Commands::Doctor) => {
            let ok = doctor_cmd::run(&settings, &prepared.warnings).await;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Some(Commands::Config) => {
            println!("# {}", config_path.display());
            print!("{}", render_config(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
