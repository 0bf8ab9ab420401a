//! An in-process stand-in for the Roblox API, plus helpers for spinning up
//! the proxy in front of it.

use crate::{
    endpoints::{Hosts, CSRF_HEADER},
    server::{self, AppState},
    Config, Credential, UserId,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tokio::net::TcpListener;
use url::Url;

pub const RAW_COOKIE: &str = "test-cookie";
pub const COOKIE: &str = ".ROBLOSECURITY=test-cookie";
pub const CSRF_TOKEN: &str = "csrf-token-123";
/// The ID of the user [`RAW_COOKIE`] belongs to.
pub const MY_ID: UserId = UserId(1);

/// How the fake Roblox servers should behave.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// What `/v1/users/authenticated` answers with.
    pub identity: Value,
    pub friends: Vec<UserId>,
    /// `(name, display name)` for each user we know about.
    pub details: HashMap<UserId, (String, String)>,
    pub thumbnails: HashMap<UserId, String>,
    /// The token handed out by the logout endpoint, if any.
    pub csrf_token: Option<String>,
    pub rejected_unfriends: HashSet<UserId>,
    pub fail_thumbnails: bool,
    /// Hold every response back for this long.
    pub response_delay: Option<Duration>,
}

impl Scenario {
    /// A scenario where every friend has a name and an avatar.
    pub fn with_friends(friends: &[UserId]) -> Self {
        let details = friends
            .iter()
            .map(|&id| (id, (format!("user{}", id), format!("User {}", id))))
            .collect();
        let thumbnails = friends
            .iter()
            .map(|&id| (id, format!("https://tr.rbxcdn.com/{}.png", id)))
            .collect();

        Scenario {
            friends: friends.to_vec(),
            details,
            thumbnails,
            ..Default::default()
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            identity: json!({ "id": MY_ID, "name": "me", "displayName": "Me" }),
            friends: Vec::new(),
            details: HashMap::new(),
            thumbnails: HashMap::new(),
            csrf_token: Some(CSRF_TOKEN.to_string()),
            rejected_unfriends: HashSet::new(),
            fail_thumbnails: false,
            response_delay: None,
        }
    }
}

/// A request received by the fake servers.
#[derive(Debug, Clone)]
pub struct Call {
    pub at: Instant,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub cookie: Option<String>,
    pub csrf: Option<String>,
    pub body: Value,
}

type Shared = Arc<Mutex<Inner>>;

struct Inner {
    scenario: Scenario,
    calls: Vec<Call>,
}

pub struct FakeRoblox {
    base: Url,
    state: Shared,
}

impl FakeRoblox {
    pub async fn start(scenario: Scenario) -> Self {
        let state = Arc::new(Mutex::new(Inner {
            scenario,
            calls: Vec::new(),
        }));
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let base = spawn(app).await;

        FakeRoblox { base, state }
    }

    pub fn hosts(&self) -> Hosts { Hosts::all(self.base.clone()) }

    pub fn credential(&self) -> Credential {
        Credential::new(RAW_COOKIE).unwrap()
    }

    pub fn calls(&self) -> Vec<Call> { self.state.lock().unwrap().calls.clone() }

    /// Every request received so far, formatted as `"METHOD /path"`.
    pub fn requests(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|call| format!("{} {}", call.method, call.path))
            .collect()
    }

    /// Start a proxy which forwards to this fake, returning its base URL.
    pub async fn proxy(&self) -> Url {
        self.proxy_with(Config::for_testing(self.hosts())).await
    }

    /// Start a proxy with custom settings. The upstream hosts should come
    /// from [`FakeRoblox::hosts()`].
    pub async fn proxy_with(&self, config: Config) -> Url {
        let state = AppState::new(&config).unwrap();

        spawn(server::router(&config, state)).await
    }
}

async fn spawn(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    Url::parse(&format!("http://{}/", address)).unwrap()
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };
    let call = Call {
        at: Instant::now(),
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(String::from),
        cookie: header("cookie"),
        csrf: header(CSRF_HEADER),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };

    let delay = state.lock().unwrap().scenario.response_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut inner = state.lock().unwrap();
    inner.calls.push(call.clone());

    respond(&inner.scenario, &call)
}

fn respond(scenario: &Scenario, call: &Call) -> Response {
    let authorized = call.cookie.as_deref() == Some(COOKIE);
    let segments: Vec<&str> = call.path.trim_matches('/').split('/').collect();

    match (call.method.as_str(), segments.as_slice()) {
        ("GET", ["v1", "users", "authenticated"]) => {
            if !authorized {
                return unauthorized();
            }
            Json(scenario.identity.clone()).into_response()
        },
        ("POST", ["v1", "users"]) => {
            let data: Vec<Value> = call.body["userIds"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(Value::as_u64)
                .filter_map(|id| {
                    let (name, display_name) =
                        scenario.details.get(&UserId(id))?;
                    Some(json!({
                        "hasVerifiedBadge": false,
                        "id": id,
                        "name": name,
                        "displayName": display_name,
                    }))
                })
                .collect();
            Json(json!({ "data": data })).into_response()
        },
        ("GET", ["v1", "users", "avatar-headshot"]) => {
            if scenario.fail_thumbnails {
                return (StatusCode::INTERNAL_SERVER_ERROR, "Oops").into_response();
            }
            let query = call.query.as_deref().unwrap_or_default();
            let ids = url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "userIds")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default();
            let data: Vec<Value> = ids
                .split(',')
                .filter_map(|id| id.parse::<u64>().ok())
                .map(|id| match scenario.thumbnails.get(&UserId(id)) {
                    Some(url) => json!({
                        "targetId": id,
                        "state": "Completed",
                        "imageUrl": url,
                    }),
                    None => json!({
                        "targetId": id,
                        "state": "Blocked",
                        "imageUrl": null,
                    }),
                })
                .collect();
            Json(json!({ "data": data })).into_response()
        },
        ("GET", ["v1", "users", _, "friends"]) => {
            if !authorized {
                return unauthorized();
            }
            let data: Vec<Value> = scenario
                .friends
                .iter()
                .map(|id| json!({ "id": id, "isOnline": id.0 % 2 == 0 }))
                .collect();
            Json(json!({ "data": data })).into_response()
        },
        ("POST", ["v2", "logout"]) => {
            let body = Json(json!({
                "errors": [{ "code": 0, "message": "Token Validation Failed" }]
            }));
            match &scenario.csrf_token {
                Some(token) => (
                    StatusCode::FORBIDDEN,
                    [(CSRF_HEADER, token.clone())],
                    body,
                )
                    .into_response(),
                None => (StatusCode::FORBIDDEN, body).into_response(),
            }
        },
        ("POST", ["v1", "users", target, "unfriend"]) => {
            if !authorized {
                return unauthorized();
            }
            if call.csrf.as_deref() != scenario.csrf_token.as_deref() {
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "errors": [{ "code": 0, "message": "Token Validation Failed" }]
                    })),
                )
                    .into_response();
            }
            let rejected = target
                .parse()
                .map(|id| scenario.rejected_unfriends.contains(&UserId(id)))
                .unwrap_or(true);
            if rejected {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "errors": [{ "code": 1, "message": "The target user is invalid or does not exist." }]
                    })),
                )
                    .into_response();
            }
            Json(json!({})).into_response()
        },
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "errors": [{ "code": 0, "message": "Authorization has been denied for this request." }]
        })),
    )
        .into_response()
}
