//! The JSON bodies exchanged between the proxy and its clients.

use crate::{
    removal::{BatchOutcome, UnfriendResult},
    Friend, UserId,
};
use serde_derive::{Deserialize, Serialize};

/// The request header clients put their Roblox cookie in.
pub const COOKIE_HEADER: &str = "x-roblox-cookie";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendsResponse {
    pub data: Vec<Friend>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfriendRequest {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnfriendResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUnfriendRequest {
    pub user_ids: Vec<UserId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUnfriendResponse {
    pub success: bool,
    pub results: Vec<UnfriendResult>,
    /// e.g. `"3/4 friends removed successfully"`.
    pub summary: String,
}

impl From<BatchOutcome> for BatchUnfriendResponse {
    fn from(outcome: BatchOutcome) -> Self {
        BatchUnfriendResponse {
            success: true,
            summary: outcome.summary(),
            results: outcome.results,
        }
    }
}

/// The body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// When the probe was answered, as an RFC 3339 timestamp.
    pub timestamp: String,
}
