//! Operations against Amazon S3 buckets and objects.
//!
//! These mirror the Glacier operations for synchronous storage: each one
//! validates its flags, forwards a single request and prints the result.
use clap::{App, AppSettings, ArgMatches, SubCommand};
use rusoto_core::{HttpClient, Region};
use rusoto_s3::S3Client;

use std::path::PathBuf;

use crate::cli;
use crate::remote::Outcome;
use crate::types::UtilResult;

pub mod bucket;
pub mod object;

/// A validated S3 subcommand along with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListBuckets,
    CreateBucket { bucket: String },
    DeleteBucket { bucket: String },
    UploadObject { bucket: String, file: PathBuf },
    ListObjects { bucket: String },
    DeleteObject { bucket: String, key: String },
}

/// A parsed invocation: the region to talk to and what to do there.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub region: Region,
    pub command: Command,
}

/// Generates an appropriate `SubCommand` for this module.
pub fn cmd<'a, 'b>() -> App<'a, 'b> {
    let bucket = || cli::name_arg("bucket name");

    SubCommand::with_name("s3")
        .about("s3 operations")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommands(vec![
            cli::operation("list-buckets", "list buckets in region", vec![]),
            cli::operation("create-bucket", "create a bucket", vec![bucket()]),
            cli::operation("delete-bucket", "delete a bucket", vec![bucket()]),
            cli::operation(
                "upload-archive",
                "upload data to a bucket",
                vec![bucket(), cli::value_arg("file", "upload file name")],
            ),
            cli::operation("list-objects", "list objects in a bucket", vec![bucket()]),
            cli::operation(
                "delete-object",
                "delete object from bucket",
                vec![bucket(), cli::value_arg("objectKey", "object key")],
            ),
        ])
}

/// Executes this subcommand and returns a `UtilResult` to indicate success.
///
/// Failures reported by S3 are printed, but do not fail the command.
pub async fn exec(args: &ArgMatches<'_>) -> UtilResult<()> {
    let invocation = parse(args)?;

    // create the client for the requested region
    let client = HttpClient::new()?;
    let s3 = S3Client::new_with(client, cli::credentials(), invocation.region.clone());

    run(&s3, &invocation.region, invocation.command).await?.print();

    Ok(())
}

/// Validates the flags of an S3 subcommand into an `Invocation`.
///
/// No client is constructed here, so a missing flag never reaches AWS.
pub fn parse(args: &ArgMatches<'_>) -> UtilResult<Invocation> {
    let (name, sub) = match args.subcommand() {
        (name, Some(sub)) => (name, sub),
        _ => return Err("no s3 operation provided".into()),
    };

    let value = |flag: &str| cli::value(sub, flag);

    let command = match name {
        "list-buckets" => {
            cli::require(sub, &["region"], "specify region using --region")?;
            Command::ListBuckets
        }
        "create-bucket" => {
            cli::require(sub, &["name", "region"], USAGE_BUCKET)?;
            Command::CreateBucket {
                bucket: value("name"),
            }
        }
        "delete-bucket" => {
            cli::require(sub, &["name", "region"], USAGE_BUCKET)?;
            Command::DeleteBucket {
                bucket: value("name"),
            }
        }
        "upload-archive" => {
            cli::require(
                sub,
                &["name", "region", "file"],
                "specify bucket name, region and upload file using --name, --region and --file",
            )?;
            Command::UploadObject {
                bucket: value("name"),
                file: PathBuf::from(value("file")),
            }
        }
        "list-objects" => {
            cli::require(sub, &["name", "region"], USAGE_BUCKET)?;
            Command::ListObjects {
                bucket: value("name"),
            }
        }
        "delete-object" => {
            cli::require(
                sub,
                &["name", "region", "objectKey"],
                "specify bucket name, region and object key using --name, --region and --objectKey",
            )?;
            Command::DeleteObject {
                bucket: value("name"),
                key: value("objectKey"),
            }
        }
        other => return Err(format!("unknown s3 operation: {}", other).into()),
    };

    Ok(Invocation {
        region: cli::region(sub)?,
        command,
    })
}

/// Forwards a validated command to S3.
///
/// The region is needed as well as the client, as new buckets are
/// constrained to the region they're created from.
pub async fn run(s3: &S3Client, region: &Region, command: Command) -> UtilResult<Outcome> {
    let outcome = match command {
        Command::ListBuckets => bucket::list(s3).await,
        Command::CreateBucket { bucket } => bucket::create(s3, region, bucket).await,
        Command::DeleteBucket { bucket } => bucket::delete(s3, bucket).await,
        Command::UploadObject { bucket, file } => object::upload(s3, bucket, &file).await?,
        Command::ListObjects { bucket } => object::list(s3, bucket).await,
        Command::DeleteObject { bucket, key } => object::delete(s3, bucket, key).await,
    };
    Ok(outcome)
}

// Usage message shared by several subcommands.
const USAGE_BUCKET: &str = "specify bucket name and region using --name and --region";
