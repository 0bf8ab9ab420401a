//! A client for talking to the proxy.

use crate::{
    api::{
        BatchUnfriendRequest, BatchUnfriendResponse, ErrorBody,
        FriendsResponse, UnfriendRequest, UnfriendResponse, COOKIE_HEADER,
    },
    endpoints::AuthenticatedUser,
    friends, BatchOutcome, Credential, Friend, UserId,
};
use reqwest::{Client, Error as ReqwestError, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use url::Url;

/// Issues requests to an Allyst proxy on behalf of a single user.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    base: Url,
    credential: Credential,
}

impl ProxyClient {
    pub fn new(client: Client, base: Url, credential: Credential) -> Self {
        ProxyClient {
            client,
            base,
            credential,
        }
    }

    /// Check the credential by asking who it belongs to.
    pub async fn user_info(&self) -> Result<AuthenticatedUser, ClientError> {
        self.post("api/user-info", None::<&()>).await
    }

    pub async fn friends(&self) -> Result<Vec<Friend>, ClientError> {
        let response: FriendsResponse =
            self.post("api/friends", None::<&()>).await?;

        Ok(response.data)
    }

    pub async fn unfriend(
        &self,
        user_id: UserId,
    ) -> Result<UnfriendResponse, ClientError> {
        self.post("api/unfriend", Some(&UnfriendRequest { user_id }))
            .await
    }

    pub async fn batch_unfriend(
        &self,
        user_ids: &[UserId],
    ) -> Result<BatchUnfriendResponse, ClientError> {
        let data = BatchUnfriendRequest {
            user_ids: user_ids.to_vec(),
        };

        self.post("api/batch-unfriend", Some(&data)).await
    }

    /// Remove any number of friends, splitting them into requests small
    /// enough for the proxy to accept.
    pub async fn unfriend_all(
        &self,
        user_ids: &[UserId],
    ) -> Result<BatchOutcome, ClientError> {
        let mut outcome = BatchOutcome::default();

        for batch in friends::batches(user_ids) {
            let response = self.batch_unfriend(batch).await?;
            outcome.results.extend(response.results);
        }

        Ok(outcome)
    }

    async fn post<D, T>(
        &self,
        path: &str,
        data: Option<&D>,
    ) -> Result<T, ClientError>
    where
        D: Debug + Serialize,
        T: DeserializeOwned,
    {
        let url = self.base.join(path)?;

        log::debug!("Sending a request to {}", url);
        log::trace!("Payload: {:#?}", data);

        let mut request = self
            .client
            .post(url)
            .header(COOKIE_HEADER, self.credential.as_str());
        if let Some(data) = data {
            request = request.json(data);
        }

        let response = check_status(request.send().await?).await?;
        let body = response.text().await?;
        log::trace!("Response: {}", body);

        serde_json::from_str(&body).map_err(ClientError::from)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|body| body.error)
        .unwrap_or(body);

    Err(ClientError::Proxy { status, message })
}

/// Possible errors that may be returned by the [`ProxyClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Unable to reach the proxy")]
    HttpClient(#[from] ReqwestError),
    #[error("The proxy responded with {status}: {message}")]
    Proxy { status: StatusCode, message: String },
    #[error("Unable to parse the proxy's response")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid proxy URL")]
    BadUrl(#[from] url::ParseError),
}
