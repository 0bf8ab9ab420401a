use super::{EndpointError, Hosts, Page};
use crate::{Credential, UserId};
use reqwest::Client;
use serde_derive::{Deserialize, Serialize};

/// Look up the usernames and display names for a batch of users.
///
/// Roblox won't accept more than [`crate::MAX_BATCH_SIZE`] IDs at a time.
pub async fn user_details(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
    user_ids: &[UserId],
) -> Result<Vec<UserDetails>, EndpointError> {
    let url = hosts.users.join("v1/users")?;
    let data = Data {
        user_ids,
        exclude_banned_users: false,
    };

    log::debug!("Sending a user details request to {}", url);
    log::trace!("Payload: {:#?}", data);
    let response = super::send(client.post(url).json(&data), credential).await?;
    let page: Page<UserDetails> = super::parse_json(response).await?;

    Ok(page.data)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Data<'a> {
    user_ids: &'a [UserId],
    exclude_banned_users: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub id: UserId,
    pub name: String,
    pub display_name: String,
}
