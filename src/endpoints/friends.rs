use super::{EndpointError, Hosts, Page};
use crate::{Credential, UserId};
use reqwest::Client;
use serde_derive::Deserialize;

/// Fetch a user's friends.
///
/// Roblox currently returns the whole list in one go, so we don't follow any
/// pagination cursors.
pub async fn friends(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
    user_id: UserId,
) -> Result<Vec<FriendEntry>, EndpointError> {
    let url = hosts.friends.join(&format!("v1/users/{}/friends", user_id))?;

    log::debug!("Sending a friends request to {}", url);
    let response = super::send(client.get(url), credential).await?;
    let page: Page<FriendEntry> = super::parse_json(response).await?;

    log::debug!("User {} has {} friends", user_id, page.data.len());

    Ok(page.data)
}

/// A single entry in the friends list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendEntry {
    pub id: UserId,
    #[serde(default)]
    pub is_online: Option<bool>,
}
