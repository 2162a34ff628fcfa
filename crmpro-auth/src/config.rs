//! Auth simulator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for issued sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in seconds.
    pub session_ttl_secs: i64,

    /// Password used when an OAuth sign-in is simulated.
    pub oauth_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: 86_400, // 24 hours
            oauth_password: "demo".to_string(),
        }
    }
}
