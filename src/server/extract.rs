use super::ApiError;
use crate::{api::COOKIE_HEADER, Credential};
use axum::{extract::FromRequestParts, http::request::Parts};

/// The caller's Roblox cookie, taken from the `X-Roblox-Cookie` header.
///
/// Requests without one are rejected before anything is sent upstream.
#[derive(Debug, Clone)]
pub struct RobloxCookie(pub Credential);

impl<S> FromRequestParts<S> for RobloxCookie
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(COOKIE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(Credential::new)
            .map(RobloxCookie)
            .ok_or(ApiError::MissingCredential)
    }
}
