use super::{EndpointError, Hosts, Page};
use crate::{Credential, UserId};
use reqwest::Client;
use serde_derive::{Deserialize, Serialize};

const HEADSHOT_SIZE: &str = "150x150";
const HEADSHOT_FORMAT: &str = "Png";

/// Get the URLs for a batch of users' avatar headshots.
pub async fn avatar_headshots(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
    user_ids: &[UserId],
) -> Result<Vec<Thumbnail>, EndpointError> {
    let url = hosts.thumbnails.join("v1/users/avatar-headshot")?;
    let user_ids = user_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let query = Query {
        user_ids: &user_ids,
        size: HEADSHOT_SIZE,
        format: HEADSHOT_FORMAT,
    };

    log::debug!("Sending an avatar headshot request to {}", url);
    log::trace!("Query: {:#?}", query);
    let response =
        super::send(client.get(url).query(&query), credential).await?;
    let page: Page<Thumbnail> = super::parse_json(response).await?;

    Ok(page.data)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Query<'a> {
    user_ids: &'a str,
    size: &'a str,
    format: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub target_id: UserId,
    /// Roblox leaves this empty while an image is still being rendered or
    /// when it has been moderated.
    #[serde(default)]
    pub image_url: Option<String>,
}
