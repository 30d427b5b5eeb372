//! Data retrieval policies, which apply to every vault in a region.
use rusoto_glacier::*;

use super::{Command, ACCOUNT_ID};
use crate::remote::Outcome;
use crate::types::{UtilError, UtilResult};

/// Strategies accepted by Glacier for a data retrieval policy.
pub const STRATEGIES: [&str; 3] = ["BytesPerHour", "FreeTier", "None"];

/// Validates the flags of `set-retrieval-policy` into a `Command`.
///
/// A limit is only meaningful for (and required by) `BytesPerHour`.
pub fn parse_set(strategy: String, bytes_per_hour: String) -> UtilResult<Command> {
    if strategy != "BytesPerHour" {
        return Ok(Command::SetRetrievalPolicy {
            strategy,
            bytes_per_hour: None,
        });
    }

    if bytes_per_hour.is_empty() {
        return Err(UtilError::usage(
            "specify the retrieval limit for BytesPerHour using --bytesPerHour",
        ));
    }

    let limit = bytes_per_hour
        .parse::<i64>()
        .map_err(|_| format!("invalid value for --bytesPerHour: {}", bytes_per_hour))?;

    Ok(Command::SetRetrievalPolicy {
        strategy,
        bytes_per_hour: Some(limit),
    })
}

/// Retrieves the data retrieval policy of the region.
pub async fn get(glacier: &GlacierClient) -> Outcome {
    let request = GetDataRetrievalPolicyInput {
        account_id: ACCOUNT_ID.to_string(),
    };
    Outcome::from_result(glacier.get_data_retrieval_policy(request).await)
}

/// Replaces the data retrieval policy of the region with a single rule.
pub async fn set(glacier: &GlacierClient, strategy: String, bytes_per_hour: Option<i64>) -> Outcome {
    let message = format!("Set data retrieval policy to {}", strategy);
    let rule = DataRetrievalRule {
        bytes_per_hour,
        strategy: Some(strategy),
    };
    let request = SetDataRetrievalPolicyInput {
        account_id: ACCOUNT_ID.to_string(),
        policy: Some(DataRetrievalPolicy {
            rules: Some(vec![rule]),
        }),
    };
    Outcome::from_unit(glacier.set_data_retrieval_policy(request).await, message)
}
