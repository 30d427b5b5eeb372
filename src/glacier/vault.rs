//! Creation, inspection and removal of Glacier vaults.
use rusoto_glacier::*;

use super::ACCOUNT_ID;
use crate::remote::Outcome;

/// Creates a new vault with the provided name.
pub async fn create(glacier: &GlacierClient, vault: String) -> Outcome {
    let request = CreateVaultInput {
        account_id: ACCOUNT_ID.to_string(),
        vault_name: vault,
    };
    Outcome::from_result(glacier.create_vault(request).await)
}

/// Lists all vaults in the region of the client.
pub async fn list(glacier: &GlacierClient) -> Outcome {
    let request = ListVaultsInput {
        account_id: ACCOUNT_ID.to_string(),
        ..ListVaultsInput::default()
    };
    Outcome::from_result(glacier.list_vaults(request).await)
}

/// Retrieves the metadata of a vault.
pub async fn describe(glacier: &GlacierClient, vault: String) -> Outcome {
    let request = DescribeVaultInput {
        account_id: ACCOUNT_ID.to_string(),
        vault_name: vault,
    };
    Outcome::from_result(glacier.describe_vault(request).await)
}

/// Deletes a vault, which must contain no archives.
pub async fn delete(glacier: &GlacierClient, vault: String) -> Outcome {
    let message = format!("Deleted vault {}", vault);
    let request = DeleteVaultInput {
        account_id: ACCOUNT_ID.to_string(),
        vault_name: vault,
    };
    Outcome::from_unit(glacier.delete_vault(request).await, message)
}

/// Retrieves the access policy attached to a vault.
pub async fn access_policy(glacier: &GlacierClient, vault: String) -> Outcome {
    let request = GetVaultAccessPolicyInput {
        account_id: ACCOUNT_ID.to_string(),
        vault_name: vault,
    };
    Outcome::from_result(glacier.get_vault_access_policy(request).await)
}

#[cfg(test)]
mod tests {
    use super::super::tests::mock_client;
    use rusoto_mock::MockRequestDispatcher;

    #[tokio::test]
    async fn listing_vaults() {
        let body = r#"{
            "Marker": null,
            "VaultList": [{
                "CreationDate": "2019-03-01T10:00:00.000Z",
                "NumberOfArchives": 2,
                "SizeInBytes": 2097152,
                "VaultARN": "arn:aws:glacier:us-east-1:111122223333:vaults/vault1",
                "VaultName": "vault1"
            }]
        }"#;
        let glacier = mock_client(MockRequestDispatcher::with_status(200).with_body(body));

        let outcome = super::list(&glacier).await;

        assert!(outcome.is_success());
        assert!(outcome.text().contains("vault1"));
        assert!(outcome.text().contains("2097152"));
    }

    #[tokio::test]
    async fn deleting_vaults() {
        let dispatcher = MockRequestDispatcher::with_status(204).with_request_checker(|req| {
            assert_eq!(req.method, "DELETE");
            assert_eq!(req.path, "/-/vaults/vault1");
        });
        let glacier = mock_client(dispatcher);

        let outcome = super::delete(&glacier, "vault1".to_string()).await;

        assert_eq!(outcome.text(), "Deleted vault vault1");
    }

    #[tokio::test]
    async fn describing_missing_vaults() {
        let body = r#"{"code":"ResourceNotFoundException","message":"Vault not found for ARN: arn:aws:glacier:us-east-1:111122223333:vaults/gone","type":"Client"}"#;
        let glacier = mock_client(MockRequestDispatcher::with_status(404).with_body(body));

        let outcome = super::describe(&glacier, "gone".to_string()).await;

        assert!(!outcome.is_success());
        assert!(outcome.text().contains("Vault not found"));
    }

    #[tokio::test]
    async fn getting_access_policies() {
        let body = r#"{"Policy":"{\"Version\":\"2012-10-17\",\"Statement\":[{\"Effect\":\"Allow\",\"Action\":\"glacier:ListJobs\"}]}"}"#;
        let dispatcher = MockRequestDispatcher::with_status(200)
            .with_body(body)
            .with_request_checker(|req| {
                assert_eq!(req.method, "GET");
                assert_eq!(req.path, "/-/vaults/vault1/access-policy");
            });
        let glacier = mock_client(dispatcher);

        let outcome = super::access_policy(&glacier, "vault1".to_string()).await;

        assert!(outcome.is_success());
        assert!(outcome.text().contains("glacier:ListJobs"));
    }
}
