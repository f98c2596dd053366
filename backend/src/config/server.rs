use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_DATABASE_PATH: &str = "nfl.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr = value("BIND_ADDR", DEFAULT_BIND_ADDR);
        Ok(Self {
            database_path: PathBuf::from(value("DATABASE_PATH", DEFAULT_DATABASE_PATH)),
            bind_addr: bind_addr
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: {}", bind_addr))?,
        })
    }
}
