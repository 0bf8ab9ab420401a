use super::{ApiError, AppState, RobloxCookie};
use crate::{
    api::{
        BatchUnfriendResponse, FriendsResponse, HealthResponse,
        UnfriendResponse,
    },
    endpoints::{self, AuthenticatedUser},
    friends,
    removal::{self, BatchError, UnfriendError},
    UserId,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

const USER_ID_REQUIRED: &str = "User ID is required";
const USER_IDS_REQUIRED: &str = "User IDs array is required";

/// `POST /api/user-info`
pub async fn user_info(
    State(state): State<AppState>,
    RobloxCookie(credential): RobloxCookie,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    match endpoints::authenticated_user(state.client(), state.hosts(), &credential)
        .await
    {
        Ok(user) => Ok(Json(user)),
        Err(e) => {
            state.log_failure("Error fetching user info", &e);
            Err(ApiError::Unauthorized)
        },
    }
}

/// `POST /api/friends`
pub async fn friends_list(
    State(state): State<AppState>,
    RobloxCookie(credential): RobloxCookie,
) -> Result<Json<FriendsResponse>, ApiError> {
    match friends::fetch_friends(state.client(), state.hosts(), &credential)
        .await
    {
        Ok(data) => Ok(Json(FriendsResponse { data })),
        Err(e) => {
            if e.is_auth_failure() {
                state.log_failure("The cookie was rejected by Roblox", &e);
            } else {
                state.log_failure("Error fetching friends", &e);
            }

            Err(ApiError::AggregationFailed)
        },
    }
}

/// `POST /api/unfriend`
pub async fn unfriend(
    State(state): State<AppState>,
    RobloxCookie(credential): RobloxCookie,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UnfriendResponse>, ApiError> {
    let body = read_json(body, USER_ID_REQUIRED)?;
    let target = body
        .get("userId")
        .and_then(UserId::from_json)
        .ok_or(ApiError::InvalidArgument(USER_ID_REQUIRED))?;

    match removal::unfriend_one(
        state.client(),
        state.hosts(),
        &credential,
        target,
    )
    .await
    {
        Ok(()) => Ok(Json(UnfriendResponse {
            success: true,
            message: String::from("Friend removed successfully"),
        })),
        Err(UnfriendError::Token(e)) => {
            state.log_failure("Error getting an anti-forgery token", &e);
            Err(ApiError::TokenAcquisitionFailed)
        },
        Err(e) => {
            state.log_failure("Error unfriending user", &e);
            Err(ApiError::UnfriendFailed)
        },
    }
}

/// `POST /api/batch-unfriend`
pub async fn batch_unfriend(
    State(state): State<AppState>,
    RobloxCookie(credential): RobloxCookie,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<BatchUnfriendResponse>, ApiError> {
    let body = read_json(body, USER_IDS_REQUIRED)?;
    let targets = body
        .get("userIds")
        .and_then(Value::as_array)
        .filter(|ids| !ids.is_empty())
        .and_then(|ids| {
            ids.iter().map(UserId::from_json).collect::<Option<Vec<_>>>()
        })
        .ok_or(ApiError::InvalidArgument(USER_IDS_REQUIRED))?;

    // The batch runs on its own task so it still finishes if the client
    // goes away halfway through.
    let task_state = state.clone();
    let task = tokio::spawn(async move {
        removal::unfriend_many(
            task_state.client(),
            task_state.hosts(),
            &credential,
            &targets,
            task_state.unfriend_delay(),
        )
        .await
    });

    match task.await {
        Ok(Ok(outcome)) => Ok(Json(BatchUnfriendResponse::from(outcome))),
        Ok(Err(BatchError::NoTargets)) => {
            Err(ApiError::InvalidArgument(USER_IDS_REQUIRED))
        },
        Ok(Err(e)) => {
            state.log_failure("Error getting an anti-forgery token", &e);
            Err(ApiError::TokenAcquisitionFailed)
        },
        Err(e) => {
            state.log_failure("Error in batch unfriend", &e);
            Err(ApiError::BatchFailed)
        },
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Parse a request body as JSON. An empty body is treated as `null`.
fn read_json(
    body: Result<Bytes, BytesRejection>,
    invalid: &'static str,
) -> Result<Value, ApiError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::InvalidArgument(invalid)
        }
    })?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&body).map_err(|_| ApiError::InvalidArgument(invalid))
}
