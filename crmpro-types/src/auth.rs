//! Auth identity records.

use serde::{Deserialize, Serialize};

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: serde_json::Map<String, serde_json::Value>,
    pub created_at: String,
}

/// The single active session and its tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry instant in epoch milliseconds.
    pub expires_at: i64,
    /// Lifetime in seconds.
    pub expires_in: i64,
    pub token_type: String,
    pub user: User,
}

/// Auth state transitions broadcast to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

impl AuthChangeEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
            Self::PasswordRecovery => "PASSWORD_RECOVERY",
        }
    }
}

impl std::fmt::Display for AuthChangeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_wire_names() {
        let json = serde_json::to_string(&AuthChangeEvent::SignedOut).unwrap();
        assert_eq!(json, "\"SIGNED_OUT\"");
        assert_eq!(AuthChangeEvent::InitialSession.to_string(), "INITIAL_SESSION");
    }

    #[test]
    fn user_metadata_defaults_to_empty() {
        let user: User = serde_json::from_str(
            r#"{"id":"u","email":"e@x.com","created_at":"2025-01-01T00:00:00.000000Z"}"#,
        )
        .unwrap();
        assert!(user.user_metadata.is_empty());
    }
}
