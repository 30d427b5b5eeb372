//! Upload and removal of archives within a Glacier vault.
use rusoto_glacier::*;

use std::path::Path;
use std::time::Instant;

use super::{treehash, ACCOUNT_ID};
use crate::remote::Outcome;
use crate::types::UtilResult;
use crate::util;

/// Uploads a local file as a single archive.
///
/// The archive description is set to the base name of the file, and the
/// tree hash of the body is sent along for Glacier to verify against.
pub async fn upload(glacier: &GlacierClient, vault: String, file: &Path) -> UtilResult<Outcome> {
    let body = util::read_upload(file).await?;
    let checksum = treehash::tree_hash(&body);

    info!(
        "Uploading {} ({}) to {}...",
        file.display(),
        util::convert_bytes(body.len() as u64),
        vault
    );

    let request = UploadArchiveInput {
        account_id: ACCOUNT_ID.to_string(),
        archive_description: Some(util::file_name(file)),
        body: Some(body.into()),
        checksum: Some(checksum),
        vault_name: vault,
    };

    let started = Instant::now();
    let outcome = Outcome::from_result(glacier.upload_archive(request).await);

    if outcome.is_success() {
        info!("Upload completed in {}", util::convert_elapsed(started.elapsed()));
    }

    Ok(outcome)
}

/// Deletes an archive from a vault.
pub async fn delete(glacier: &GlacierClient, vault: String, archive_id: String) -> Outcome {
    let message = format!("Deleted archive {} from {}", archive_id, vault);
    let request = DeleteArchiveInput {
        account_id: ACCOUNT_ID.to_string(),
        archive_id,
        vault_name: vault,
    };
    Outcome::from_unit(glacier.delete_archive(request).await, message)
}

#[cfg(test)]
mod tests {
    use super::super::tests::mock_client;
    use super::super::treehash;
    use rusoto_mock::MockRequestDispatcher;

    #[tokio::test]
    async fn uploading_archives_with_checksums() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photos.tar");
        std::fs::write(&path, b"holiday photos").unwrap();

        let expected = treehash::tree_hash(b"holiday photos");
        let dispatcher = MockRequestDispatcher::with_status(201).with_request_checker(
            move |req| {
                let checksum = req.headers.get("x-amz-sha256-tree-hash").unwrap();
                assert_eq!(checksum[0], expected.as_bytes());

                let description = req.headers.get("x-amz-archive-description").unwrap();
                assert_eq!(description[0], b"photos.tar".to_vec());
            },
        );
        let glacier = mock_client(dispatcher);

        let outcome = super::upload(&glacier, "vault1".to_string(), &path)
            .await
            .unwrap();

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn deleting_archives() {
        let glacier = mock_client(MockRequestDispatcher::with_status(204));

        let outcome = super::delete(&glacier, "vault1".to_string(), "abc123".to_string()).await;

        assert_eq!(outcome.text(), "Deleted archive abc123 from vault1");
    }
}
