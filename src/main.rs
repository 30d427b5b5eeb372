//! Command line access to Amazon Glacier vaults and Amazon S3 buckets.
//!
//! Each subcommand maps onto exactly one AWS API call; the response is
//! printed as returned, and failures reported by AWS are decoded into a
//! readable line rather than aborting the process.
//!
//! Credentials are resolved via the guidelines in the [AWS Documentation]
//! (https://docs.aws.amazon.com/cli/latest/userguide/cli-environment.html),
//! and can be written to the default location by `silo configure`.
#[macro_use]
extern crate log as logger;

use std::{env, process};

mod cli;
mod log;
mod remote;
mod types;
mod util;

mod configure;
mod glacier;
mod s3;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{}", err.message());
        process::exit(err.code());
    }
}

/// Parses the CLI arguments and delegates to the chosen subcommand.
async fn run() -> types::UtilResult<()> {
    // build the CLI and grab all arguments
    let args = cli::parse(env::args_os())?;

    // initialize logging
    log::init(&args)?;

    // delegate to the cli mod
    cli::exec(&args).await
}
