//! Upload, listing and removal of objects within an S3 bucket.
use rusoto_s3::*;

use std::path::Path;
use std::time::Instant;

use crate::remote::Outcome;
use crate::types::UtilResult;
use crate::util;

/// Uploads a local file, keyed by its base name.
pub async fn upload(s3: &S3Client, bucket: String, file: &Path) -> UtilResult<Outcome> {
    let body = util::read_upload(file).await?;
    let key = util::file_name(file);

    info!(
        "Uploading {} ({}) to s3://{}/{}...",
        file.display(),
        util::convert_bytes(body.len() as u64),
        bucket,
        key
    );

    let request = PutObjectRequest {
        bucket,
        key,
        content_length: Some(body.len() as i64),
        body: Some(body.into()),
        ..PutObjectRequest::default()
    };

    let started = Instant::now();
    let outcome = Outcome::from_result(s3.put_object(request).await);

    if outcome.is_success() {
        info!("Upload completed in {}", util::convert_elapsed(started.elapsed()));
    }

    Ok(outcome)
}

/// Lists the first page of objects in a bucket.
pub async fn list(s3: &S3Client, bucket: String) -> Outcome {
    let request = ListObjectsV2Request {
        bucket,
        ..ListObjectsV2Request::default()
    };
    Outcome::from_result(s3.list_objects_v2(request).await)
}

/// Deletes a single object from a bucket.
pub async fn delete(s3: &S3Client, bucket: String, key: String) -> Outcome {
    let request = DeleteObjectRequest {
        bucket,
        key,
        ..DeleteObjectRequest::default()
    };
    Outcome::from_result(s3.delete_object(request).await)
}

#[cfg(test)]
mod tests {
    use super::super::tests::mock_client;
    use rusoto_mock::MockRequestDispatcher;

    #[tokio::test]
    async fn uploading_objects_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, b"id,total\n1,42\n").unwrap();

        let dispatcher = MockRequestDispatcher::with_status(200).with_request_checker(|req| {
            assert_eq!(req.method, "PUT");
            assert_eq!(req.path, "/bucket1/report.csv");
        });
        let s3 = mock_client(dispatcher);

        let outcome = super::upload(&s3, "bucket1".to_string(), &path)
            .await
            .unwrap();

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn listing_objects() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
            <ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
                <Name>bucket1</Name>
                <Prefix></Prefix>
                <KeyCount>1</KeyCount>
                <MaxKeys>1000</MaxKeys>
                <IsTruncated>false</IsTruncated>
                <Contents>
                    <Key>report.csv</Key>
                    <LastModified>2019-03-01T10:00:00.000Z</LastModified>
                    <ETag>&quot;d41d8cd98f00b204e9800998ecf8427e&quot;</ETag>
                    <Size>14</Size>
                    <StorageClass>STANDARD</StorageClass>
                </Contents>
            </ListBucketResult>"#;
        let s3 = mock_client(MockRequestDispatcher::with_status(200).with_body(body));

        let outcome = super::list(&s3, "bucket1".to_string()).await;

        assert!(outcome.is_success());
        assert!(outcome.text().contains("report.csv"));
    }

    #[tokio::test]
    async fn deleting_objects() {
        let dispatcher = MockRequestDispatcher::with_status(204).with_request_checker(|req| {
            assert_eq!(req.method, "DELETE");
            assert_eq!(req.path, "/bucket1/report.csv");
        });
        let s3 = mock_client(dispatcher);

        let outcome = super::delete(&s3, "bucket1".to_string(), "report.csv".to_string()).await;

        assert!(outcome.is_success());
    }
}
