use crate::api::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// The errors the proxy reports to its clients.
///
/// The messages are deliberately vague, the details are only ever logged.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Roblox cookie is required")]
    MissingCredential,
    /// Roblox rejected the cookie (or couldn't be reached to check it).
    #[error("Invalid cookie or authentication failed")]
    Unauthorized,
    #[error("{0}")]
    InvalidArgument(&'static str),
    #[error("Request body is too large")]
    PayloadTooLarge,
    #[error("Failed to obtain an anti-forgery token")]
    TokenAcquisitionFailed,
    #[error("Failed to fetch friends list")]
    AggregationFailed,
    #[error("Failed to unfriend user")]
    UnfriendFailed,
    #[error("Failed to process batch unfriend")]
    BatchFailed,
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredential | ApiError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            },
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::TokenAcquisitionFailed
            | ApiError::AggregationFailed
            | ApiError::UnfriendFailed
            | ApiError::BatchFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
