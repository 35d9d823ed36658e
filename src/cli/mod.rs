// CLI module
// Command-line interface, argument parsing and log setup

mod args;

pub use args::{CliArgs, StrategyType};

use crate::core::script::RecoveryReport;
use crate::strategy::create_strategy;
use crate::types::RecoveryError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, --help, etc.), clap displays an error
/// or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Logs never go to stdout,
/// which carries the SQL script.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Fails only if a subscriber is already installed
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// Run the recovery described by `args`
///
/// The `--output` file is only created once both backups have loaded.
pub fn run(args: &CliArgs) -> Result<RecoveryReport, RecoveryError> {
    let config = match args.strategy {
        StrategyType::Async => Some(args.to_async_config()),
        StrategyType::Sync => None,
    };
    let strategy = create_strategy(args.strategy.clone(), config);

    strategy.generate_to(&args.to_inputs(), &args.to_script_config(), &args.to_target())
}
