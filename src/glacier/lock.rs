//! Vault lock policies and their two step locking process.
//!
//! Initiating a lock attaches the policy in an `InProgress` state and hands
//! back a lock id; the lock becomes immutable once completed with that id,
//! and can be aborted at any point before.
use rusoto_glacier::*;

use super::ACCOUNT_ID;
use crate::remote::Outcome;

/// Retrieves the lock policy and lock state of a vault.
pub async fn get(glacier: &GlacierClient, vault: String) -> Outcome {
    let request = GetVaultLockInput {
        account_id: ACCOUNT_ID.to_string(),
        vault_name: vault,
    };
    Outcome::from_result(glacier.get_vault_lock(request).await)
}

/// Attaches a lock policy to a vault, returning the lock id.
pub async fn initiate(glacier: &GlacierClient, vault: String, policy: String) -> Outcome {
    let request = InitiateVaultLockInput {
        account_id: ACCOUNT_ID.to_string(),
        policy: Some(VaultLockPolicy {
            policy: Some(policy),
        }),
        vault_name: vault,
    };
    Outcome::from_result(glacier.initiate_vault_lock(request).await)
}

/// Aborts an in progress vault lock.
pub async fn abort(glacier: &GlacierClient, vault: String) -> Outcome {
    let message = format!("Aborted vault lock on {}", vault);
    let request = AbortVaultLockInput {
        account_id: ACCOUNT_ID.to_string(),
        vault_name: vault,
    };
    Outcome::from_unit(glacier.abort_vault_lock(request).await, message)
}

/// Completes an in progress vault lock, making the policy immutable.
pub async fn complete(glacier: &GlacierClient, vault: String, lock_id: String) -> Outcome {
    let message = format!("Completed vault lock {} on {}", lock_id, vault);
    let request = CompleteVaultLockInput {
        account_id: ACCOUNT_ID.to_string(),
        lock_id,
        vault_name: vault,
    };
    Outcome::from_unit(glacier.complete_vault_lock(request).await, message)
}
