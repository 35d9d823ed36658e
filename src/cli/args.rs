use crate::core::script::{ScriptConfig, DEFAULT_SCHEMA};
use crate::strategy::{
    AsyncConfig, RecoveryInputs, ScriptTarget, DEFAULT_CLIENTS_CSV, DEFAULT_JOBS_CSV,
};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Generate SQL that restores clients and reassigns jobs from CSV backups
#[derive(Parser, Debug)]
#[command(name = "client-recovery-sql")]
#[command(
    about = "Generate SQL that restores clients and reassigns jobs from CSV backups",
    long_about = None
)]
pub struct CliArgs {
    /// CSV backup of the clients table
    #[arg(
        long = "clients",
        value_name = "PATH",
        default_value = DEFAULT_CLIENTS_CSV,
        help = "Path to the clients CSV backup"
    )]
    pub clients_file: PathBuf,

    /// CSV backup of the jobs table
    #[arg(
        long = "jobs",
        value_name = "PATH",
        default_value = DEFAULT_JOBS_CSV,
        help = "Path to the jobs CSV backup"
    )]
    pub jobs_file: PathBuf,

    /// Write the script to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Schema that holds the clients and jobs tables
    #[arg(
        long = "schema",
        value_name = "NAME",
        default_value = DEFAULT_SCHEMA,
        value_parser = parse_identifier
    )]
    pub schema: String,

    /// Loading strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Loading strategy: 'sync' reads the backups in turn, 'async' reads them concurrently"
    )]
    pub strategy: StrategyType,

    /// Number of rows per read batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of rows per read batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of runtime worker threads (async mode only)
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Available loading strategies
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Accept only plain SQL identifiers, since the schema is spliced unquoted
fn parse_identifier(value: &str) -> Result<String, String> {
    let mut chars = value.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest {
        Ok(value.to_string())
    } else {
        Err(format!("'{value}' is not a plain SQL identifier"))
    }
}

impl CliArgs {
    /// Paths of the two backups
    pub fn to_inputs(&self) -> RecoveryInputs {
        RecoveryInputs {
            clients: self.clients_file.clone(),
            jobs: self.jobs_file.clone(),
        }
    }

    /// Script rendering settings
    pub fn to_script_config(&self) -> ScriptConfig {
        ScriptConfig::new(self.schema.clone())
    }

    /// Destination of the script
    pub fn to_target(&self) -> ScriptTarget {
        match &self.output_file {
            Some(path) => ScriptTarget::File(path.clone()),
            None => ScriptTarget::Stdout,
        }
    }

    /// Create an AsyncConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values fall back with a
    /// warning (see [`AsyncConfig::new`]).
    pub fn to_async_config(&self) -> AsyncConfig {
        if self.batch_size.is_some() || self.worker_threads.is_some() {
            let default = AsyncConfig::default();
            AsyncConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.worker_threads.unwrap_or(default.worker_threads),
            )
        } else {
            AsyncConfig::default()
        }
    }

    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
