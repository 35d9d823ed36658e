//! Client Recovery SQL CLI
//!
//! Command-line interface for turning CSV backups of the `clients` and `jobs`
//! tables into a SQL recovery script.
//!
//! # Usage
//!
//! ```bash
//! cargo run > restore.sql
//! cargo run -- --clients ~/Downloads/clients_rows.csv --jobs ~/Downloads/jobs_rows.csv > restore.sql
//! cargo run -- --strategy async --output restore.sql -v
//! ```
//!
//! The script is written to stdout unless `--output` is given. Logs go to
//! stderr; set `RUST_LOG` or pass `-v`/`-vv` to see more.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, missing column, invalid value, write failure, etc.)
//! - 2: Invalid command-line arguments

use client_recovery_sql::cli;
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_logging(args.log_level());

    if let Err(e) = cli::run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
