use anyhow::{Context, Result};
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_EXPLORER_URL: &str = "https://explorer.harmony.one";

/// Service settings, read from the environment at startup.
///
/// - `PAGE_SERVICE_ADDR` (default `0.0.0.0:8080`)
/// - `PAGE_LEDGER_PATH`: RocksDB directory; unset keeps the ledger in memory
/// - `PAGE_EXPLORER_URL` (default `https://explorer.harmony.one`)
/// - `PAGE_ALLOWED_ORIGIN`: CORS origin of the page front-end; unset allows any
#[derive(Debug, Clone)]
pub(crate) struct ServiceConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ledger_path: Option<String>,
    pub(crate) explorer_url: String,
    pub(crate) allowed_origin: Option<String>,
}

impl ServiceConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = non_empty("PAGE_SERVICE_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .context("PAGE_SERVICE_ADDR must be a socket address like 0.0.0.0:8080")?;

        let explorer_url = non_empty("PAGE_EXPLORER_URL")
            .unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        Ok(Self {
            bind_addr,
            ledger_path: non_empty("PAGE_LEDGER_PATH"),
            explorer_url,
            allowed_origin: non_empty("PAGE_ALLOWED_ORIGIN"),
        })
    }
}
