//! fondhtn CLI - decode grounded HTN output into a planner domain

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use fondhtn_core::config::Config;
use fondhtn_core::output::{read_domain, to_writer, write_domain};
use tracing::info;

#[derive(Parser)]
#[command(name = "fondhtn")]
#[command(author, version, about = "Grounded HTN decoder and FOND action merger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode grounded output into domain JSON
    Decode {
        /// Grounded output file
        input: PathBuf,
        /// Write the domain here instead of stdout (must not exist)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep compiled nondeterministic action variants
        #[arg(long)]
        no_merge: bool,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Summarize a domain JSON file
    Inspect {
        /// Domain JSON file
        domain: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Reset configuration to defaults
    Reset,
    /// Show config file path
    Path,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the domain
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fondhtn=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            output,
            no_merge,
            compact,
        } => cmd_decode(&input, output.as_deref(), no_merge, compact, cli.quiet),

        Commands::Inspect { domain } => cmd_inspect(&domain, cli.format),

        Commands::Config { action } => cmd_config(action, cli.quiet),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn cmd_decode(
    input: &Path,
    output: Option<&Path>,
    no_merge: bool,
    compact: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if no_merge {
        config.merge.enabled = false;
    }
    let pretty = config.output.pretty && !compact;

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read grounded output: {}", input.display()))?;
    info!(input = %input.display(), bytes = text.len(), "Read grounded output");

    let domain = fondhtn_core::convert(&text, &config)?;

    match output {
        Some(path) => {
            write_domain(path, &domain, pretty)?;
            if !quiet {
                eprintln!(
                    "Wrote {} actions and {} methods to {}",
                    domain.actions.len(),
                    domain.methods.len(),
                    path.display()
                );
            }
        }
        None => to_writer(io::stdout().lock(), &domain, pretty)?,
    }
    Ok(())
}

fn cmd_inspect(path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let domain = read_domain(path)
        .with_context(|| format!("Failed to read domain: {}", path.display()))?;
    let summary = domain.summary();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => println!("{}", summary),
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
