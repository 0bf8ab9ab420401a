use crate::{endpoints::Hosts, Config};
use reqwest::Client;
use std::{error::Error, fmt::Write, sync::Arc, time::Duration};

/// Read-only state shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    client: Client,
    hosts: Hosts,
    unfriend_delay: Duration,
    production: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = config.http_client()?;

        Ok(AppState {
            inner: Arc::new(Inner {
                client,
                hosts: config.hosts.clone(),
                unfriend_delay: config.unfriend_delay,
                production: config.is_production(),
            }),
        })
    }

    pub fn client(&self) -> &Client { &self.inner.client }

    pub fn hosts(&self) -> &Hosts { &self.inner.hosts }

    pub fn unfriend_delay(&self) -> Duration { self.inner.unfriend_delay }

    /// Log a failed request. The underlying cause is only included outside
    /// of production.
    pub fn log_failure(&self, context: &str, error: &(dyn Error + 'static)) {
        if self.inner.production {
            log::error!("{}", context);
            return;
        }

        let mut message = format!("{}: {}", context, error);
        let mut source = error.source();

        while let Some(cause) = source {
            let _ = write!(message, ", caused by: {}", cause);
            source = cause.source();
        }

        log::error!("{}", message);
    }
}
