use super::Hosts;
use crate::Credential;
use reqwest::{header::COOKIE, Client, Error as ReqwestError};

/// The header Roblox uses for its anti-forgery tokens.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Get an anti-forgery token for the credential.
///
/// We send a logout request without a token. Roblox refuses to log us out,
/// but the refusal carries a fresh token in its headers. The response status
/// is deliberately ignored.
pub async fn csrf_token(
    client: &Client,
    hosts: &Hosts,
    credential: &Credential,
) -> Result<CsrfToken, TokenError> {
    let url = hosts.auth.join("v2/logout")?;

    log::debug!("Sending a logout request to {}", url);
    let response = client
        .post(url)
        .header(COOKIE, credential.cookie_header())
        .send()
        .await?;

    log::trace!("Headers: {:#?}", response.headers());

    let token = response
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or(TokenError::MissingHeader {
            status: response.status(),
        })?;

    Ok(CsrfToken(token.to_string()))
}

/// A short-lived token which must accompany any request that changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn as_str(&self) -> &str { &self.0 }
}

/// An error that may occur while fetching an anti-forgery token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Unable to send the request")]
    HttpClient(
        #[source]
        #[from]
        ReqwestError,
    ),
    #[error("The response ({status}) didn't contain an anti-forgery token")]
    MissingHeader { status: reqwest::StatusCode },
    #[error("Unable to construct the request URL")]
    BadUrl(#[from] url::ParseError),
}
