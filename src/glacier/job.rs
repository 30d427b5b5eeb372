//! Retrieval jobs: initiating them, tracking them and fetching their output.
//!
//! Glacier never returns data directly; both vault inventories and archive
//! contents are requested through a job, which is polled via `describe-job`
//! and eventually read through `get-inventory` or `get-archive`.
use rusoto_glacier::*;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use std::path::Path;
use std::time::Instant;

use super::{treehash, ACCOUNT_ID};
use crate::remote::Outcome;
use crate::types::UtilResult;
use crate::util;

/// Default description of an inventory retrieval job.
pub const INVENTORY_DESCRIPTION: &str = "inventory-retrieval-job";

/// Default description of an archive retrieval job.
pub const ARCHIVE_DESCRIPTION: &str = "archive-retrieval-job";

/// Inventory of a vault, as produced by an inventory retrieval job.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Inventory {
    #[serde(rename = "VaultARN")]
    pub vault_arn: String,
    pub inventory_date: String,
    pub archive_list: Vec<InventoryArchive>,
}

/// Single archive entry in a vault `Inventory`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryArchive {
    pub archive_id: String,
    pub archive_description: String,
    pub creation_date: String,
    pub size: u64,
    #[serde(rename = "SHA256TreeHash")]
    pub sha256_tree_hash: String,
}

/// Initiates a job to retrieve the inventory of a vault.
pub async fn init_inventory_retrieval(
    glacier: &GlacierClient,
    vault: String,
    description: String,
) -> Outcome {
    let parameters = JobParameters {
        description: Some(description),
        type_: Some("inventory-retrieval".to_string()),
        ..JobParameters::default()
    };
    initiate(glacier, vault, parameters).await
}

/// Initiates a job to retrieve the contents of an archive.
pub async fn init_archive_retrieval(
    glacier: &GlacierClient,
    vault: String,
    description: String,
    archive_id: String,
) -> Outcome {
    let parameters = JobParameters {
        archive_id: Some(archive_id),
        description: Some(description),
        type_: Some("archive-retrieval".to_string()),
        ..JobParameters::default()
    };
    initiate(glacier, vault, parameters).await
}

/// Initiates a job using the provided parameters.
async fn initiate(glacier: &GlacierClient, vault: String, parameters: JobParameters) -> Outcome {
    let request = InitiateJobInput {
        account_id: ACCOUNT_ID.to_string(),
        job_parameters: Some(parameters),
        vault_name: vault,
    };
    Outcome::from_result(glacier.initiate_job(request).await)
}

/// Lists the jobs of a vault, both in progress and recently completed.
pub async fn list(glacier: &GlacierClient, vault: String) -> Outcome {
    let request = ListJobsInput {
        account_id: ACCOUNT_ID.to_string(),
        vault_name: vault,
        ..ListJobsInput::default()
    };
    Outcome::from_result(glacier.list_jobs(request).await)
}

/// Retrieves the status of a single job.
pub async fn describe(glacier: &GlacierClient, vault: String, job_id: String) -> Outcome {
    let request = DescribeJobInput {
        account_id: ACCOUNT_ID.to_string(),
        job_id,
        vault_name: vault,
    };
    Outcome::from_result(glacier.describe_job(request).await)
}

/// Fetches the output of an inventory job and prints the archive list.
///
/// Output which isn't a JSON inventory (such as the output of an archive
/// job, or a CSV inventory) is reported as a failure.
pub async fn get_inventory(glacier: &GlacierClient, vault: String, job_id: String) -> Outcome {
    let output = match glacier.get_job_output(output_request(vault, job_id)).await {
        Ok(output) => output,
        Err(err) => return Outcome::from_result::<(), _>(Err(err)),
    };

    let body = output.body.as_deref().unwrap_or_default();
    match serde_json::from_slice::<Inventory>(body) {
        Ok(inventory) => Outcome::Success(render_inventory(&inventory)),
        Err(err) => Outcome::Failure(format!("unable to decode inventory: {}", err)),
    }
}

/// Fetches the output of an archive job and writes it to a local file.
///
/// When Glacier returns a checksum for the output, the received body is
/// hashed and compared against it.
pub async fn get_archive(
    glacier: &GlacierClient,
    vault: String,
    job_id: String,
    file: &Path,
) -> UtilResult<Outcome> {
    let started = Instant::now();

    let mut output = match glacier.get_job_output(output_request(vault, job_id)).await {
        Ok(output) => output,
        Err(err) => return Ok(Outcome::from_result::<(), _>(Err(err))),
    };

    let body = output.body.take().unwrap_or_default();

    let mut target = tokio::fs::File::create(file).await?;
    target.write_all(&body).await?;
    target.flush().await?;

    let mut summary = format!("{:#?}\n", output);
    summary.push_str(&format!(
        "Wrote {} to {} in {}",
        util::convert_bytes(body.len() as u64),
        file.display(),
        util::convert_elapsed(started.elapsed())
    ));

    if let Some(expected) = output.checksum {
        let computed = treehash::tree_hash(&body);

        if computed != expected {
            return Ok(Outcome::Failure(format!(
                "checksum mismatch for {}: expected {}, computed {}",
                file.display(),
                expected,
                computed
            )));
        }
        summary.push_str(&format!("\nVerified tree hash {}", computed));
    }

    Ok(Outcome::Success(summary))
}

/// Builds a request for the full output of a job.
fn output_request(vault: String, job_id: String) -> GetJobOutputInput {
    GetJobOutputInput {
        account_id: ACCOUNT_ID.to_string(),
        job_id,
        vault_name: vault,
        range: None,
    }
}

/// Renders an `Inventory` into a human readable listing.
pub fn render_inventory(inventory: &Inventory) -> String {
    let mut lines = vec![
        format!("VaultARN: {}", inventory.vault_arn),
        format!("InventoryDate: {}", inventory.inventory_date),
    ];

    for archive in &inventory.archive_list {
        lines.push(format!("ArchiveID: {}", archive.archive_id));
        lines.push(format!("ArchiveDescription: {}", archive.archive_description));
        lines.push(format!("CreationDate: {}", archive.creation_date));
        lines.push(format!(
            "Size: {} ({})",
            archive.size,
            util::convert_bytes(archive.size)
        ));
        lines.push(format!("SHA256TreeHash: {}", archive.sha256_tree_hash));
    }

    lines.join("\n")
}
