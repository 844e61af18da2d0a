use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use roomgate_token::TokenIssuer;

const DEV_API_KEY: &str = "devkey";
const DEV_API_SECRET: &str = "secret";
const DEFAULT_TOKEN_TTL_SECS: u64 = 600;
/// 30 days.
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Process-wide settings, read once at start-up.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub token_ttl: Duration,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },

    #[error("LIVEKIT_TOKEN_TTL_SECS must be greater than zero")]
    ZeroTtl,

    #[error("LIVEKIT_TOKEN_TTL_SECS must be at most {max} seconds, got {value}")]
    TtlTooLong { value: u64, max: u64 },
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str, default: &str| {
            vars.get(name).cloned().unwrap_or_else(|| default.to_string())
        };

        let ttl_secs: u64 = parse_var(vars, "LIVEKIT_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if ttl_secs == 0 {
            return Err(ConfigError::ZeroTtl);
        }
        if ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::TtlTooLong {
                value: ttl_secs,
                max: MAX_TOKEN_TTL_SECS,
            });
        }

        Ok(Config {
            api_key: get("LIVEKIT_API_KEY", DEV_API_KEY),
            api_secret: get("LIVEKIT_API_SECRET", DEV_API_SECRET),
            token_ttl: Duration::from_secs(ttl_secs),
            db_path: get("DB_PATH", "meeting_app.db").into(),
            host: get("HOST", "0.0.0.0"),
            port: parse_var(vars, "PORT", 3000)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when either half of the API credentials is still the development default.
    pub fn uses_dev_credentials(&self) -> bool {
        self.api_key == DEV_API_KEY || self.api_secret == DEV_API_SECRET
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(&self.api_key, &self.api_secret, self.token_ttl)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("db_path", &self.db_path)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

fn parse_var<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.get(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: name.to_string(),
            value: raw.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::from_vars(&HashMap::new()).unwrap();

        assert_eq!(config.api_key, "devkey");
        assert_eq!(config.api_secret, "secret");
        assert_eq!(config.token_ttl, Duration::from_secs(600));
        assert_eq!(config.db_path, PathBuf::from("meeting_app.db"));
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(config.uses_dev_credentials());
    }

    #[test]
    fn overrides() {
        let config = Config::from_vars(&vars(&[
            ("LIVEKIT_API_KEY", "prodkey"),
            ("LIVEKIT_API_SECRET", "prodsecret"),
            ("LIVEKIT_TOKEN_TTL_SECS", "7200"),
            ("DB_PATH", "/var/lib/roomgate/app.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.token_ttl, Duration::from_secs(7200));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(!config.uses_dev_credentials());
        assert_eq!(config.token_issuer().api_key(), "prodkey");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_vars(&vars(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "PORT"));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let err = Config::from_vars(&vars(&[("LIVEKIT_TOKEN_TTL_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTtl));
    }

    #[test]
    fn oversized_ttl_is_rejected() {
        let err = Config::from_vars(&vars(&[(
            "LIVEKIT_TOKEN_TTL_SECS",
            &(i64::MAX as u64).to_string(),
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::TtlTooLong { .. }));

        let config =
            Config::from_vars(&vars(&[("LIVEKIT_TOKEN_TTL_SECS", "2592000")])).unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(30 * 24 * 60 * 60));
    }

    #[test]
    fn debug_hides_secret() {
        let config = Config::from_vars(&vars(&[("LIVEKIT_API_SECRET", "hunter2")])).unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
