//! Server configuration, read from the environment

use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_PATH: &str = "todos.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:9090";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_path =
            lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        let bind_address =
            lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_address
            .parse()
            .with_context(|| format!("Failed to parse bind address: {}", bind_address))?;

        Ok(Self {
            bind_address,
            database_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_path, "todos.db");
        assert_eq!(config.bind_address.port(), 9090);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_PATH", "/tmp/keeper/todos.db"),
            ("BIND_ADDRESS", "127.0.0.1:8080"),
        ]))
        .unwrap();
        assert_eq!(config.database_path, "/tmp/keeper/todos.db");
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bad_bind_address() {
        assert!(Config::from_lookup(lookup_from(&[("BIND_ADDRESS", "localhost")])).is_err());
    }
}
