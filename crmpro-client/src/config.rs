//! Client configuration and backend mode selection.

use crate::error::{ClientError, ClientResult};
use crmpro_store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_REMOTE_URL: &str = "SUPABASE_URL";
pub const ENV_REMOTE_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_DATA_DIR: &str = "CRMPRO_DATA_DIR";
pub const ENV_STORAGE_KEY: &str = "CRMPRO_STORAGE_KEY";
pub const ENV_SESSION_TTL: &str = "CRMPRO_SESSION_TTL_SECS";

/// Configuration for a [`crate::Client`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Key the document is stored under.
    pub storage_key: String,

    /// Directory for the JSON document. `None` keeps it in memory.
    pub data_dir: Option<PathBuf>,

    /// Lifetime of issued sessions in seconds.
    pub session_ttl_secs: i64,

    /// Hosted backend URL; selects remote mode together with `remote_key`.
    pub remote_url: Option<String>,

    /// Hosted backend anonymous key.
    #[serde(skip_serializing)]
    pub remote_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            session_ttl_secs: 86_400, // 24 hours
            remote_url: None,
            remote_key: None,
        }
    }
}

impl ClientConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for unset or
    /// empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(key) = get(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        config.data_dir = get(ENV_DATA_DIR).map(PathBuf::from);
        if let Some(raw) = get(ENV_SESSION_TTL) {
            config.session_ttl_secs = raw
                .parse()
                .map_err(|_| ClientError::Config(format!("{ENV_SESSION_TTL} is not an integer: {raw}")))?;
        }
        config.remote_url = get(ENV_REMOTE_URL);
        config.remote_key = get(ENV_REMOTE_KEY);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.storage_key.is_empty() {
            return Err(ClientError::Config("storage key must not be empty".into()));
        }
        if self.session_ttl_secs <= 0 {
            return Err(ClientError::Config(format!(
                "session TTL must be positive, got {}",
                self.session_ttl_secs
            )));
        }
        Ok(())
    }
}

/// Which backend the client talks to.
#[derive(Clone, PartialEq, Eq)]
pub enum BackendMode {
    /// Local document store with simulated auth.
    Mock,
    /// Hosted backend.
    Remote { url: String, key: String },
}

impl BackendMode {
    /// Remote when both URL and key are present and non-empty.
    pub fn select(config: &ClientConfig) -> Self {
        match (config.remote_url.as_deref(), config.remote_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Self::Remote {
                url: url.to_string(),
                key: key.to_string(),
            },
            _ => Self::Mock,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock)
    }
}

impl std::fmt::Debug for BackendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mock => f.write_str("Mock"),
            Self::Remote { url, .. } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("key", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(BackendMode::select(&config), BackendMode::Mock);
    }

    #[test]
    fn both_remote_vars_select_remote() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_REMOTE_URL, "https://db.example.com"),
            (ENV_REMOTE_KEY, "anon"),
        ]))
        .unwrap();
        assert!(!BackendMode::select(&config).is_mock());
    }

    #[test]
    fn partial_remote_vars_stay_mock() {
        let only_url = ClientConfig::from_lookup(lookup(&[(ENV_REMOTE_URL, "https://db.example.com")])).unwrap();
        assert!(BackendMode::select(&only_url).is_mock());

        let blank_key = ClientConfig::from_lookup(lookup(&[
            (ENV_REMOTE_URL, "https://db.example.com"),
            (ENV_REMOTE_KEY, "  "),
        ]))
        .unwrap();
        assert!(BackendMode::select(&blank_key).is_mock());
    }

    #[test]
    fn bad_ttl_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_SESSION_TTL, "soon")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        let err = ClientConfig::from_lookup(lookup(&[(ENV_SESSION_TTL, "0")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn remote_debug_redacts_key() {
        let mode = BackendMode::Remote {
            url: "https://db.example.com".into(),
            key: "secret".into(),
        };
        assert!(!format!("{mode:?}").contains("secret"));
    }
}
