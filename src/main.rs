// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unused_self)]
#![allow(clippy::needless_pass_by_value)]

//! bqs CLI
//!
//! Infers, merges and compares warehouse table schemas

use bqs::cli::{init_logging, Cli, Outcome, Runner};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level, &cli.log_output) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let runner = Runner::new(cli);

    match runner.run() {
        Ok(Outcome::Done) => {}
        Ok(Outcome::Different) => std::process::exit(1),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
