//! Removing people from the friends list.

use crate::{
    endpoints::{self, EndpointError, Hosts, TokenError},
    Credential, UserId,
};
use reqwest::Client;
use serde_derive::{Deserialize, Serialize};
use std::time::Duration;

/// How long to wait between unfriend requests so Roblox doesn't start
/// rate-limiting us.
pub const DEFAULT_UNFRIEND_DELAY: Duration = Duration::from_millis(300);

/// Remove a single friend.
pub async fn unfriend_one(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
    target: UserId,
) -> Result<(), UnfriendError> {
    let token = endpoints::csrf_token(client, hosts, credential).await?;
    endpoints::unfriend(client, hosts, credential, &token, target).await?;

    log::info!("Removed {} from the friends list", target);

    Ok(())
}

/// Remove several friends, one at a time.
///
/// A single anti-forgery token is used for the whole batch and `delay` is
/// inserted between consecutive unfriend requests. One removal failing
/// doesn't stop the others, its error is recorded in the outcome instead.
/// Nothing is retried.
pub async fn unfriend_many(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
    targets: &[UserId],
    delay: Duration,
) -> Result<BatchOutcome, BatchError> {
    if targets.is_empty() {
        return Err(BatchError::NoTargets);
    }

    let token = endpoints::csrf_token(client, hosts, credential).await?;
    let mut results = Vec::with_capacity(targets.len());

    for (i, &target) in targets.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match endpoints::unfriend(client, hosts, credential, &token, target)
            .await
        {
            Ok(()) => {
                log::debug!("Removed {} from the friends list", target);
                results.push(UnfriendResult::removed(target));
            },
            Err(e) => {
                log::warn!("Unable to remove {}: {}", target, e);
                results.push(UnfriendResult::failed(target, &e));
            },
        }
    }

    let outcome = BatchOutcome { results };
    log::info!("{}", outcome.summary());

    Ok(outcome)
}

/// What happened when we tried to remove a particular friend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfriendResult {
    pub user_id: UserId,
    pub success: bool,
    /// Whatever Roblox said when it refused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl UnfriendResult {
    pub fn removed(user_id: UserId) -> Self {
        UnfriendResult {
            user_id,
            success: true,
            error: None,
        }
    }

    pub fn failed(user_id: UserId, error: &EndpointError) -> Self {
        UnfriendResult {
            user_id,
            success: false,
            error: Some(error.detail()),
        }
    }
}

/// The per-friend results of [`unfriend_many()`], in the order they were
/// requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub results: Vec<UnfriendResult>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}/{} friends removed successfully",
            self.succeeded(),
            self.results.len()
        )
    }
}

/// Possible errors that may be returned by [`unfriend_one()`].
#[derive(Debug, thiserror::Error)]
pub enum UnfriendError {
    #[error("Unable to get an anti-forgery token")]
    Token(#[from] TokenError),
    #[error("Roblox refused to remove the friend")]
    Rejected(#[from] EndpointError),
}

/// Reasons a whole batch can fail before anyone is removed.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("No users were given to unfriend")]
    NoTargets,
    #[error("Unable to get an anti-forgery token")]
    Token(#[from] TokenError),
}
