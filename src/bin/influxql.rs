//! influxql: compile InfluxQL statement files
//!
//! # Usage
//!
//! ```bash
//! # Compile every statement in a file
//! influxql build queries.toml
//!
//! # JSON in, JSON out
//! influxql build queries.json --format json
//!
//! # Normalize duration tokens
//! influxql duration 5400s 1h30m
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use influxql::config::{Config, OutputFormat};
use influxql::duration::{format_duration, parse_duration};
use influxql::script::StatementFile;

#[derive(Parser)]
#[command(name = "influxql")]
#[command(version)]
#[command(about = "Compile InfluxQL statements from statement files", long_about = None)]
#[command(after_help = "EXAMPLES:
    influxql build queries.toml
    influxql build queries.json --format json
    influxql duration 5400s 1h30m")]
struct Cli {
    /// Config file (default: <config dir>/influxql/config.toml)
    #[arg(long, global = true, env = "INFLUXQL_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a TOML or JSON statement file
    Build {
        /// The statement file
        file: PathBuf,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Parse duration tokens and print them in their shortest form
    Duration {
        /// Tokens such as 90m, 5400s or 1h30m
        #[arg(required = true)]
        tokens: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Build { file, format } => build(cli, file, *format),
        Commands::Duration { tokens } => durations(tokens),
    }
}

fn build(cli: &Cli, file: &Path, format: Option<OutputFormat>) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    debug!(?config, "config loaded");

    let statements = StatementFile::load(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let queries = statements.compile(&config)?;

    match format.unwrap_or(config.format) {
        OutputFormat::Text => {
            for query in &queries {
                println!("{}", query);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&queries)?);
        }
    }

    if cli.verbose {
        eprintln!(
            "{} {} statement(s) compiled",
            "✓".green(),
            queries.len().to_string().cyan()
        );
    }

    Ok(())
}

fn durations(tokens: &[String]) -> anyhow::Result<()> {
    for token in tokens {
        let d = parse_duration(token)?;
        println!(
            "{} {} {}",
            format!("{:12}", token).yellow(),
            "→".dimmed(),
            format_duration(d).green().bold()
        );
    }
    Ok(())
}
