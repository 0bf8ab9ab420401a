//! The Roblox web API's endpoints.

mod authenticated;
mod friends;
mod logout;
mod thumbnails;
mod unfriend;
mod users;

pub use authenticated::{authenticated_user, AuthenticatedUser};
pub use friends::{friends, FriendEntry};
pub use logout::{csrf_token, CsrfToken, TokenError, CSRF_HEADER};
pub use thumbnails::{avatar_headshots, Thumbnail};
pub use unfriend::unfriend;
pub use users::{user_details, UserDetails};

use crate::Credential;
use reqwest::{
    header::COOKIE, Error as ReqwestError, RequestBuilder, Response,
    StatusCode,
};
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use url::Url;

/// The base URLs of the Roblox services we talk to.
#[derive(Debug, Clone, PartialEq)]
pub struct Hosts {
    pub users: Url,
    pub friends: Url,
    pub thumbnails: Url,
    pub auth: Url,
}

impl Hosts {
    pub const DEFAULT_USERS: &'static str = "https://users.roblox.com/";
    pub const DEFAULT_FRIENDS: &'static str = "https://friends.roblox.com/";
    pub const DEFAULT_THUMBNAILS: &'static str =
        "https://thumbnails.roblox.com/";
    pub const DEFAULT_AUTH: &'static str = "https://auth.roblox.com/";

    /// Send every request to the same server (handy when testing).
    pub fn all(base: Url) -> Self {
        Hosts {
            users: base.clone(),
            friends: base.clone(),
            thumbnails: base.clone(),
            auth: base,
        }
    }
}

impl Default for Hosts {
    fn default() -> Self {
        let parse = |url: &str| {
            Url::parse(url).expect("The default hosts are valid URLs")
        };

        Hosts {
            users: parse(Hosts::DEFAULT_USERS),
            friends: parse(Hosts::DEFAULT_FRIENDS),
            thumbnails: parse(Hosts::DEFAULT_THUMBNAILS),
            auth: parse(Hosts::DEFAULT_AUTH),
        }
    }
}

/// Typical endpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The HTTP client encountered an error (connection failure, timeout,
    /// etc.).
    #[error("Unable to send the request")]
    HttpClient(#[from] ReqwestError),
    /// The server answered with a non-2xx status code.
    #[error("The server rejected the request with {status}")]
    Rejected {
        status: StatusCode,
        /// The response body, if it was valid JSON.
        body: Option<serde_json::Value>,
    },
    /// Unable to parse the JSON in the response.
    #[error("Unable to parse the response")]
    Decode(#[from] serde_json::Error),
    #[error("Unable to construct the request URL")]
    BadUrl(#[from] url::ParseError),
}

impl EndpointError {
    /// Did the server reject our credentials?
    pub fn is_auth_failure(&self) -> bool {
        match self {
            EndpointError::Rejected { status, .. } => {
                *status == StatusCode::UNAUTHORIZED
                    || *status == StatusCode::FORBIDDEN
            },
            _ => false,
        }
    }

    /// Is this the sort of failure that might go away if we tried again
    /// later?
    pub fn is_retryable(&self) -> bool {
        match self {
            EndpointError::HttpClient(e) => e.is_timeout() || e.is_connect(),
            EndpointError::Rejected { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error()
            },
            EndpointError::Decode(_) | EndpointError::BadUrl(_) => false,
        }
    }

    /// Something to show the user when a request fails, preferring
    /// whatever the server told us.
    pub fn detail(&self) -> serde_json::Value {
        match self {
            EndpointError::Rejected {
                body: Some(body), ..
            } => body.clone(),
            EndpointError::HttpClient(e) => {
                serde_json::Value::String(format!("{}: {}", self, e))
            },
            EndpointError::Decode(e) => {
                serde_json::Value::String(format!("{}: {}", self, e))
            },
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

/// The `{ "data": [...] }` envelope most Roblox endpoints use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Page<T> {
    pub data: Vec<T>,
}

/// Attach the session cookie, send the request, and make sure it was
/// successful.
async fn send(
    request: RequestBuilder,
    credential: &Credential,
) -> Result<Response, EndpointError> {
    let response = request
        .header(COOKIE, credential.cookie_header())
        .send()
        .await?;

    log::trace!("Headers: {:#?}", response.headers());

    check_status(response).await
}

async fn check_status(response: Response) -> Result<Response, EndpointError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    log::debug!("The request was rejected with {}", status);
    log::trace!("Response: {}", body);

    Err(EndpointError::Rejected {
        status,
        body: serde_json::from_str(&body).ok(),
    })
}

async fn parse_json<T>(response: Response) -> Result<T, EndpointError>
where
    T: DeserializeOwned,
{
    let body = response.text().await?;
    log::trace!("Response: {}", body);

    serde_json::from_str(&body).map_err(EndpointError::from)
}
