//! CLI bindings for all internal commands and modules.
//!
//! This module focuses on the common CLI bindings required to provide easy
//! APIs and consistency across all other modules. This is where the parent
//! CLI can be found, as well as utilities for fetching common flags and
//! validating their presence.
use clap::{App, AppSettings, Arg, ArgMatches, ErrorKind, SubCommand};
use rusoto_core::credential::ChainProvider;
use rusoto_core::Region;

use std::ffi::OsString;
use std::time::Duration;

use crate::types::{UtilError, UtilResult};

/// Environment variable used as a fallback for `--region`.
pub const REGION_ENV: &str = "AWS_DEFAULT_REGION";

/// Constructs a new CLI application using Clap.
///
/// This will register all subcommand modules and embed all metadata. All
/// metadata is fetched dynamically from Cargo and shouldn't require to
/// be updated (ever).
pub fn build<'a, 'b>() -> App<'a, 'b> {
    App::new("")
        .name(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .arg(
            Arg::with_name("quiet")
                .help("Only prints errors during execution")
                .short("q")
                .long("quiet")
                .global(true),
        )
        .subcommand(crate::configure::cmd())
        .subcommand(crate::glacier::cmd())
        .subcommand(crate::s3::cmd())
        .settings(&[
            AppSettings::ArgRequiredElseHelp,
            AppSettings::DisableHelpSubcommand,
            AppSettings::SubcommandRequiredElseHelp,
            AppSettings::VersionlessSubcommands,
        ])
}

/// Parses the provided arguments against the CLI built by `build`.
///
/// Help and version requests are printed and exit immediately. Flags
/// which are malformed or carry an invalid value are usage errors, the
/// same as flags which are missing entirely.
pub fn parse<'a, I, T>(argv: I) -> UtilResult<ArgMatches<'a>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    build().get_matches_from_safe(argv).map_err(|err| {
        if !err.use_stderr() {
            err.exit();
        }
        match err.kind {
            ErrorKind::EmptyValue | ErrorKind::InvalidValue | ErrorKind::UnknownArgument => {
                UtilError::usage(err.message)
            }
            _ => err.into(),
        }
    })
}

/// Executes a subcommand based on the parsed arguments from the CLI.
///
/// Each service module constructs its own client, as the region is only
/// known once the subcommand flags have been validated.
pub async fn exec(args: &ArgMatches<'_>) -> UtilResult<()> {
    match args.subcommand() {
        ("configure", Some(_)) => crate::configure::exec(),
        ("glacier", Some(subargs)) => crate::glacier::exec(subargs).await,
        ("s3", Some(subargs)) => crate::s3::exec(subargs).await,
        _ => {
            build().print_help()?;
            Ok(())
        }
    }
}

/// Creates the credentials provider shared by both service clients.
///
/// This reads the environment, then the files written by `configure`,
/// then the instance metadata; the timeout keeps the last step short.
pub fn credentials() -> ChainProvider {
    let mut chain = ChainProvider::new();
    chain.set_timeout(Duration::from_millis(500));
    chain
}

/// Creates a service operation subcommand carrying the region flag.
pub fn operation<'a, 'b>(name: &'a str, about: &'a str, args: Vec<Arg<'a, 'b>>) -> App<'a, 'b> {
    SubCommand::with_name(name)
        .about(about)
        .arg(region_arg())
        .args(&args)
}

/// Creates the `--region` flag, falling back to the environment.
pub fn region_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("region")
        .help("aws region")
        .long("region")
        .takes_value(true)
        .env(REGION_ENV)
}

/// Creates the `--name` flag, used for both vaults and buckets.
pub fn name_arg<'a, 'b>(help: &'a str) -> Arg<'a, 'b> {
    value_arg("name", help)
}

/// Creates a named flag which takes a single value.
pub fn value_arg<'a, 'b>(name: &'a str, help: &'a str) -> Arg<'a, 'b> {
    Arg::with_name(name).help(help).long(name).takes_value(true)
}

/// Fetches a flag value, treating a missing flag as empty.
pub fn value(args: &ArgMatches<'_>, name: &str) -> String {
    args.value_of(name).unwrap_or_default().to_string()
}

/// Ensures that all of the named flags were provided with a value.
///
/// Clap's own `required` handling is avoided so that a missing flag
/// always produces the provided usage message and the usage exit code.
pub fn require(args: &ArgMatches<'_>, names: &[&str], usage: &str) -> UtilResult<()> {
    if names.iter().any(|name| value(args, name).is_empty()) {
        return Err(UtilError::usage(usage));
    }
    Ok(())
}

/// Parses the `--region` flag into a Rusoto `Region`.
pub fn region(args: &ArgMatches<'_>) -> UtilResult<Region> {
    Ok(value(args, "region").parse::<Region>()?)
}
