//! Runtime settings from the environment (`.env` is honored by the server binary via dotenvy).

use crate::error::ConfigError;
use axum_extra::extract::cookie::Key;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
/// Minimum `SECRET_KEY` length accepted for signing cookies.
pub const MIN_SECRET_KEY_BYTES: usize = 64;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub secret_key: Option<String>,
    pub debug: bool,
    pub max_body_bytes: usize,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw
            .parse()
            .map_err(|e| ConfigError::Settings(format!("BIND_ADDR '{}': {}", bind_raw, e)))?;
        let secret_key = get("SECRET_KEY");
        if let Some(ref s) = secret_key {
            if s.len() < MIN_SECRET_KEY_BYTES {
                return Err(ConfigError::Settings(format!(
                    "SECRET_KEY must be at least {} bytes",
                    MIN_SECRET_KEY_BYTES
                )));
            }
        }
        let debug = match get("INVENTORY_DEBUG") {
            Some(v) => parse_flag("INVENTORY_DEBUG", &v)?,
            None => false,
        };
        let max_body_bytes = parse_number("MAX_BODY_BYTES", get("MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES)?;
        let db_max_connections =
            parse_number("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Settings("DB_MAX_CONNECTIONS must be at least 1".into()));
        }

        Ok(Settings {
            database_url,
            bind_addr,
            secret_key,
            debug,
            max_body_bytes,
            db_max_connections,
        })
    }

    /// Key for signing flash cookies. Without `SECRET_KEY` a random key is used,
    /// so pending messages do not survive a restart.
    pub fn cookie_key(&self) -> Result<Key, ConfigError> {
        match &self.secret_key {
            Some(secret) => Key::try_from(secret.as_bytes())
                .map_err(|e| ConfigError::Settings(format!("SECRET_KEY: {}", e))),
            None => {
                tracing::warn!("SECRET_KEY not set; using a random key for this process");
                Ok(Key::generate())
            }
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "inventory_tracker=debug,inventory_server=debug,tower_http=debug"
        } else {
            "inventory_tracker=info,inventory_server=info"
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Settings(format!("{} '{}' is not a boolean", key, other))),
    }
}

fn parse_number<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .parse()
            .map_err(|e| ConfigError::Settings(format!("{} '{}': {}", key, v, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert!(!s.debug);
        assert!(s.secret_key.is_none());
        assert_eq!(s.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(s.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("DATABASE_URL", "sqlite:///var/lib/inventory.db"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("INVENTORY_DEBUG", "Yes"),
            ("MAX_BODY_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(s.database_url, "sqlite:///var/lib/inventory.db");
        assert_eq!(s.bind_addr.port(), 8080);
        assert!(s.debug);
        assert_eq!(s.max_body_bytes, 1024);
        assert!(s.default_log_filter().contains("debug"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let s = settings(&[("DATABASE_URL", "  "), ("INVENTORY_DEBUG", "")]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert!(!s.debug);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(settings(&[("BIND_ADDR", "nowhere")]), Err(ConfigError::Settings(_))));
        assert!(matches!(settings(&[("INVENTORY_DEBUG", "maybe")]), Err(ConfigError::Settings(_))));
        assert!(matches!(settings(&[("MAX_BODY_BYTES", "-1")]), Err(ConfigError::Settings(_))));
        assert!(matches!(settings(&[("DB_MAX_CONNECTIONS", "0")]), Err(ConfigError::Settings(_))));
    }

    #[test]
    fn short_secret_key_is_rejected() {
        assert!(matches!(settings(&[("SECRET_KEY", "change_this_secret")]), Err(ConfigError::Settings(_))));
        let long = "k".repeat(MIN_SECRET_KEY_BYTES);
        let s = settings(&[("SECRET_KEY", long.as_str())]).unwrap();
        s.cookie_key().unwrap();
    }
}
