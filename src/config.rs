use crate::{endpoints::Hosts, removal::DEFAULT_UNFRIEND_DELAY};
use reqwest::Client;
use std::{str::FromStr, time::Duration};

/// The largest request body the proxy will accept.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024;
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to run the proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The interface to bind to.
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// The only origin allowed to make cross-origin requests in production.
    pub frontend_url: Option<String>,
    pub hosts: Hosts,
    /// The pause between consecutive unfriend requests in a batch.
    pub unfriend_delay: Duration,
    /// How long to wait for Roblox before giving up on a request.
    pub upstream_timeout: Duration,
    pub body_limit: usize,
}

impl Config {
    /// A configuration suitable for tests, with no delays and a random port.
    pub fn for_testing(hosts: Hosts) -> Self {
        Config {
            host: String::from("127.0.0.1"),
            port: 0,
            hosts,
            unfriend_delay: Duration::from_millis(0),
            upstream_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

    /// Create the HTTP client used to talk to Roblox.
    pub fn http_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .user_agent(crate::DEFAULT_USER_AGENT)
            .timeout(self.upstream_timeout)
            .build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: String::from("0.0.0.0"),
            port: 5000,
            environment: Environment::Development,
            frontend_url: None,
            hosts: Hosts::default(),
            unfriend_delay: DEFAULT_UNFRIEND_DELAY,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Are we running for real?
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown environment \"{0}\", expected development or production")]
pub struct UnknownEnvironment(String);
