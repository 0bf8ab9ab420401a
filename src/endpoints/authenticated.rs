use super::{EndpointError, Hosts};
use crate::{Credential, UserId};
use reqwest::Client;
use serde_derive::{Deserialize, Serialize};

/// Ask Roblox who the credential belongs to.
pub async fn authenticated_user(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
) -> Result<AuthenticatedUser, EndpointError> {
    let url = hosts.users.join("v1/users/authenticated")?;

    log::debug!("Sending an authenticated user request to {}", url);
    let response = super::send(client.get(url), credential).await?;
    let user: AuthenticatedUser = super::parse_json(response).await?;

    log::debug!("The credential belongs to {}", user.id);

    Ok(user)
}

/// The identity payload returned by Roblox.
///
/// Only the ID is required. Everything else is carried along untouched so
/// it can be handed back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
