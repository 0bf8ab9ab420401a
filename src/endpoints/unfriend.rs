use super::{logout::CSRF_HEADER, CsrfToken, EndpointError, Hosts};
use crate::{Credential, UserId};
use reqwest::Client;

/// Remove someone from the user's friends list.
pub async fn unfriend(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
    token: &CsrfToken,
    target: UserId,
) -> Result<(), EndpointError> {
    let url = hosts.friends.join(&format!("v1/users/{}/unfriend", target))?;

    log::debug!("Sending an unfriend request to {}", url);
    let request = client
        .post(url)
        .header(CSRF_HEADER, token.as_str())
        .json(&serde_json::json!({}));
    super::send(request, credential).await?;

    Ok(())
}
