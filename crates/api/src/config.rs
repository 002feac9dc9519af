//! Server configuration from environment variables.

use std::net::SocketAddr;

use anyhow::Context;

use meditrack_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `MEDITRACK_BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `MEDITRACK_SEED`: load sample records, accounts and portal content.
    pub seed: bool,
    /// `MEDITRACK_LOG_FORMAT`: `json` or `pretty`.
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("MEDITRACK_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("MEDITRACK_BIND_ADDR must be host:port")?;

        let seed = match lookup("MEDITRACK_SEED") {
            None => true,
            Some(v) => parse_bool(&v).context("MEDITRACK_SEED must be true or false")?,
        };

        let log_format = match lookup("MEDITRACK_LOG_FORMAT") {
            None => LogFormat::default(),
            Some(v) => v
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .context("MEDITRACK_LOG_FORMAT")?,
        };

        Ok(Self {
            bind_addr,
            seed,
            log_format,
        })
    }
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {other}"),
    }
}
