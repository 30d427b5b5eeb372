//! Operations against Amazon Glacier vaults, archives and jobs.
//!
//! Every subcommand here validates its flags, constructs a single request
//! and forwards it to Glacier. All requests are made against the account
//! owning the credentials, which Glacier accepts as the `-` account id.
use clap::{App, AppSettings, ArgMatches, SubCommand};
use rusoto_core::{HttpClient, Region};
use rusoto_glacier::GlacierClient;

use std::path::PathBuf;

use crate::cli;
use crate::remote::Outcome;
use crate::types::UtilResult;

pub mod archive;
pub mod job;
pub mod lock;
pub mod policy;
pub mod treehash;
pub mod vault;

/// Account identifier referring to the account of the caller.
pub const ACCOUNT_ID: &str = "-";

/// A validated Glacier subcommand along with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateVault { vault: String },
    ListVaults,
    DescribeVault { vault: String },
    DeleteVault { vault: String },
    GetAccessPolicy { vault: String },
    UploadArchive { vault: String, file: PathBuf },
    DeleteArchive { vault: String, archive_id: String },
    InitInventoryRetrieval { vault: String, description: String },
    InitArchiveRetrieval { vault: String, description: String, archive_id: String },
    ListJobs { vault: String },
    DescribeJob { vault: String, job_id: String },
    GetInventory { vault: String, job_id: String },
    GetArchive { vault: String, job_id: String, file: PathBuf },
    GetVaultLock { vault: String },
    InitVaultLock { vault: String, policy: String },
    AbortVaultLock { vault: String },
    CompleteVaultLock { vault: String, lock_id: String },
    GetRetrievalPolicy,
    SetRetrievalPolicy { strategy: String, bytes_per_hour: Option<i64> },
}

/// A parsed invocation: the region to talk to and what to do there.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub region: Region,
    pub command: Command,
}

/// Generates an appropriate `SubCommand` for this module.
pub fn cmd<'a, 'b>() -> App<'a, 'b> {
    let vault = || cli::name_arg("vault name");

    SubCommand::with_name("glacier")
        .about("glacier operations")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommands(vec![
            cli::operation("create-vault", "create new vault", vec![vault()]),
            cli::operation("list-vaults", "list vaults in region", vec![]),
            cli::operation("describe-vault", "get information about a vault", vec![vault()]),
            cli::operation("delete-vault", "delete empty vault", vec![vault()]),
            cli::operation(
                "get-access-policy",
                "get the access policy set on a vault",
                vec![vault()],
            ),
            cli::operation(
                "upload-archive",
                "upload data to a vault",
                vec![vault(), cli::value_arg("file", "upload file name")],
            ),
            cli::operation(
                "delete-archive",
                "delete archive from vault",
                vec![vault(), cli::value_arg("archiveID", "specify an archive ID")],
            ),
            cli::operation(
                "init-inventory-retrieval",
                "initiate an inventory-retrieval job for vault",
                vec![
                    vault(),
                    cli::value_arg("desc", "description for a job")
                        .default_value(job::INVENTORY_DESCRIPTION),
                ],
            ),
            cli::operation(
                "init-archive-retrieval",
                "initiate an archive-retrieval job for vault",
                vec![
                    vault(),
                    cli::value_arg("archiveID", "specify an archive ID"),
                    cli::value_arg("desc", "description for a job")
                        .default_value(job::ARCHIVE_DESCRIPTION),
                ],
            ),
            cli::operation("list-jobs", "list jobs per vault", vec![vault()]),
            cli::operation(
                "describe-job",
                "get information about a previously initiated job",
                vec![vault(), cli::value_arg("jobID", "specify a job ID")],
            ),
            cli::operation(
                "get-inventory",
                "get output of inventory retrieval job",
                vec![vault(), cli::value_arg("jobID", "specify a job ID")],
            ),
            cli::operation(
                "get-archive",
                "get output of archive retrieval job",
                vec![
                    vault(),
                    cli::value_arg("jobID", "specify a job ID"),
                    cli::value_arg("file", "specify file including path"),
                ],
            ),
            cli::operation(
                "get-vaultlock",
                "get information about vault's lock policy",
                vec![vault()],
            ),
            cli::operation(
                "init-vaultlock",
                "init vault lock policy on the specified vault",
                vec![vault(), cli::value_arg("policy", "vault lock policy document")],
            ),
            cli::operation(
                "abort-vaultlock",
                "aborts the vault locking process if not already in locked state",
                vec![vault()],
            ),
            cli::operation(
                "complete-vaultlock",
                "complete vault lock in process",
                vec![vault(), cli::value_arg("lockID", "vault lockID")],
            ),
            cli::operation(
                "get-retrieval-policy",
                "get the current data retrieval policy",
                vec![],
            ),
            cli::operation(
                "set-retrieval-policy",
                "set the data retrieval policy of the region",
                vec![
                    cli::value_arg("strategy", "retrieval strategy")
                        .possible_values(&policy::STRATEGIES),
                    cli::value_arg("bytesPerHour", "retrieval limit for BytesPerHour"),
                ],
            ),
        ])
}

/// Executes this subcommand and returns a `UtilResult` to indicate success.
///
/// Failures reported by Glacier are printed, but do not fail the command.
pub async fn exec(args: &ArgMatches<'_>) -> UtilResult<()> {
    let invocation = parse(args)?;

    // create the client for the requested region
    let client = HttpClient::new()?;
    let glacier = GlacierClient::new_with(client, cli::credentials(), invocation.region);

    run(&glacier, invocation.command).await?.print();

    Ok(())
}

/// Validates the flags of a Glacier subcommand into an `Invocation`.
///
/// No client is constructed here, so a missing flag never reaches AWS.
pub fn parse(args: &ArgMatches<'_>) -> UtilResult<Invocation> {
    let (name, sub) = match args.subcommand() {
        (name, Some(sub)) => (name, sub),
        _ => return Err("no glacier operation provided".into()),
    };

    let value = |flag: &str| cli::value(sub, flag);

    let command = match name {
        "create-vault" => {
            cli::require(sub, &["name", "region"], USAGE_VAULT)?;
            Command::CreateVault {
                vault: value("name"),
            }
        }
        "list-vaults" => {
            cli::require(sub, &["region"], USAGE_REGION)?;
            Command::ListVaults
        }
        "describe-vault" => {
            cli::require(sub, &["name", "region"], USAGE_VAULT)?;
            Command::DescribeVault {
                vault: value("name"),
            }
        }
        "delete-vault" => {
            cli::require(sub, &["name", "region"], USAGE_VAULT)?;
            Command::DeleteVault {
                vault: value("name"),
            }
        }
        "get-access-policy" => {
            cli::require(sub, &["name", "region"], USAGE_VAULT)?;
            Command::GetAccessPolicy {
                vault: value("name"),
            }
        }
        "upload-archive" => {
            cli::require(
                sub,
                &["name", "region", "file"],
                "specify vault name, region and upload file using --name, --region and --file",
            )?;
            Command::UploadArchive {
                vault: value("name"),
                file: PathBuf::from(value("file")),
            }
        }
        "delete-archive" => {
            cli::require(sub, &["name", "region", "archiveID"], USAGE_ARCHIVE)?;
            Command::DeleteArchive {
                vault: value("name"),
                archive_id: value("archiveID"),
            }
        }
        "init-inventory-retrieval" => {
            cli::require(sub, &["name", "region"], USAGE_VAULT)?;
            Command::InitInventoryRetrieval {
                vault: value("name"),
                description: value("desc"),
            }
        }
        "init-archive-retrieval" => {
            cli::require(sub, &["name", "region", "archiveID"], USAGE_ARCHIVE)?;
            Command::InitArchiveRetrieval {
                vault: value("name"),
                description: value("desc"),
                archive_id: value("archiveID"),
            }
        }
        "list-jobs" => {
            cli::require(sub, &["name", "region"], USAGE_VAULT)?;
            Command::ListJobs {
                vault: value("name"),
            }
        }
        "describe-job" => {
            cli::require(
                sub,
                &["name", "region", "jobID"],
                "specify vault name, region and job ID using --name, --region and --jobID",
            )?;
            Command::DescribeJob {
                vault: value("name"),
                job_id: value("jobID"),
            }
        }
        "get-inventory" => {
            cli::require(sub, &["name", "region", "jobID"], USAGE_JOB)?;
            Command::GetInventory {
                vault: value("name"),
                job_id: value("jobID"),
            }
        }
        "get-archive" => {
            cli::require(
                sub,
                &["name", "region", "jobID", "file"],
                "specify vault name, region, jobID and file using --name, --region, --jobID and --file",
            )?;
            Command::GetArchive {
                vault: value("name"),
                job_id: value("jobID"),
                file: PathBuf::from(value("file")),
            }
        }
        "get-vaultlock" => {
            cli::require(sub, &["name", "region"], USAGE_VAULT)?;
            Command::GetVaultLock {
                vault: value("name"),
            }
        }
        "init-vaultlock" => {
            cli::require(
                sub,
                &["name", "region", "policy"],
                "specify vault name, region and policy using --name, --region and --policy",
            )?;
            Command::InitVaultLock {
                vault: value("name"),
                policy: value("policy"),
            }
        }
        "abort-vaultlock" => {
            cli::require(sub, &["name", "region"], USAGE_VAULT)?;
            Command::AbortVaultLock {
                vault: value("name"),
            }
        }
        "complete-vaultlock" => {
            cli::require(
                sub,
                &["name", "region", "lockID"],
                "specify vault name, region and lockID using --name, --region and --lockID",
            )?;
            Command::CompleteVaultLock {
                vault: value("name"),
                lock_id: value("lockID"),
            }
        }
        "get-retrieval-policy" => {
            cli::require(sub, &["region"], USAGE_REGION)?;
            Command::GetRetrievalPolicy
        }
        "set-retrieval-policy" => {
            cli::require(
                sub,
                &["region", "strategy"],
                "specify region and strategy using --region and --strategy",
            )?;
            policy::parse_set(value("strategy"), value("bytesPerHour"))?
        }
        other => return Err(format!("unknown glacier operation: {}", other).into()),
    };

    Ok(Invocation {
        region: cli::region(sub)?,
        command,
    })
}

/// Forwards a validated command to Glacier.
pub async fn run(glacier: &GlacierClient, command: Command) -> UtilResult<Outcome> {
    let outcome = match command {
        Command::CreateVault { vault } => vault::create(glacier, vault).await,
        Command::ListVaults => vault::list(glacier).await,
        Command::DescribeVault { vault } => vault::describe(glacier, vault).await,
        Command::DeleteVault { vault } => vault::delete(glacier, vault).await,
        Command::GetAccessPolicy { vault } => vault::access_policy(glacier, vault).await,
        Command::UploadArchive { vault, file } => archive::upload(glacier, vault, &file).await?,
        Command::DeleteArchive { vault, archive_id } => {
            archive::delete(glacier, vault, archive_id).await
        }
        Command::InitInventoryRetrieval { vault, description } => {
            job::init_inventory_retrieval(glacier, vault, description).await
        }
        Command::InitArchiveRetrieval {
            vault,
            description,
            archive_id,
        } => job::init_archive_retrieval(glacier, vault, description, archive_id).await,
        Command::ListJobs { vault } => job::list(glacier, vault).await,
        Command::DescribeJob { vault, job_id } => job::describe(glacier, vault, job_id).await,
        Command::GetInventory { vault, job_id } => job::get_inventory(glacier, vault, job_id).await,
        Command::GetArchive {
            vault,
            job_id,
            file,
        } => job::get_archive(glacier, vault, job_id, &file).await?,
        Command::GetVaultLock { vault } => lock::get(glacier, vault).await,
        Command::InitVaultLock { vault, policy } => lock::initiate(glacier, vault, policy).await,
        Command::AbortVaultLock { vault } => lock::abort(glacier, vault).await,
        Command::CompleteVaultLock { vault, lock_id } => {
            lock::complete(glacier, vault, lock_id).await
        }
        Command::GetRetrievalPolicy => policy::get(glacier).await,
        Command::SetRetrievalPolicy {
            strategy,
            bytes_per_hour,
        } => policy::set(glacier, strategy, bytes_per_hour).await,
    };
    Ok(outcome)
}

// Usage messages shared by several subcommands.
const USAGE_REGION: &str = "specify region using --region";
const USAGE_VAULT: &str = "specify vault name and region using --name and --region";
const USAGE_ARCHIVE: &str =
    "specify vault name, region and archiveID using --name, --region and --archiveID";
const USAGE_JOB: &str = "specify vault name, region and jobID using --name, --region and --jobID";
