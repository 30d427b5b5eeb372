//! Creation, listing and removal of S3 buckets.
use rusoto_core::Region;
use rusoto_s3::*;

use crate::remote::Outcome;

/// Lists all buckets owned by the caller.
pub async fn list(s3: &S3Client) -> Outcome {
    Outcome::from_result(s3.list_buckets().await)
}

/// Creates a bucket in the provided region.
///
/// S3 rejects `us-east-1` as an explicit location constraint, so the
/// configuration is only sent for other regions.
pub async fn create(s3: &S3Client, region: &Region, bucket: String) -> Outcome {
    let configuration = match region {
        Region::UsEast1 => None,
        other => Some(CreateBucketConfiguration {
            location_constraint: Some(other.name().to_string()),
        }),
    };

    let request = CreateBucketRequest {
        bucket,
        create_bucket_configuration: configuration,
        ..CreateBucketRequest::default()
    };
    Outcome::from_result(s3.create_bucket(request).await)
}

/// Deletes a bucket, which must contain no objects.
pub async fn delete(s3: &S3Client, bucket: String) -> Outcome {
    let message = format!("Deleted bucket {}", bucket);
    let request = DeleteBucketRequest {
        bucket,
        ..DeleteBucketRequest::default()
    };
    Outcome::from_unit(s3.delete_bucket(request).await, message)
}
