//! Auth simulator: one session slot over the document store.
//!
//! Credentials are never checked. Every sign-in path writes the identity and
//! the per-user singletons in a single document save, then queues the state
//! change for the [`AuthDispatcher`].

use crate::config::AuthConfig;
use crate::dispatcher::{AuthDispatcher, Notification};
use crate::error::AuthResult;
use crate::listener::{
    lock_registry, AuthListener, ListenerId, ListenerRegistry, SharedRegistry, Subscription,
};
use crmpro_store::seed::{demo_dashboard, demo_profile, demo_stats, demo_user, DEMO_USER_ID};
use crmpro_store::DocumentStore;
use crmpro_types::{
    new_id, to_record, AuthChangeEvent, Clock, Dashboard, Profile, Record, Session, Stats, User,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Result of a successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub session: Session,
}

/// An auth state change as seen by a channel subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthStateChange {
    pub event: AuthChangeEvent,
    pub session: Option<Session>,
}

/// Creates a simulator and the dispatcher that delivers its notifications.
///
/// The dispatcher must be run (or drained) for listeners to observe anything.
pub fn create_auth_simulator(
    store: Arc<DocumentStore>,
    clock: Arc<Clock>,
    config: AuthConfig,
) -> (AuthSimulator, AuthDispatcher) {
    let registry: SharedRegistry = Arc::new(Mutex::new(ListenerRegistry::default()));
    let (notify_tx, notify_rx) = mpsc::unbounded_channel();
    let dispatcher = AuthDispatcher::new(notify_rx, Arc::clone(&registry));
    let simulator = AuthSimulator {
        store,
        clock,
        config,
        registry,
        notify_tx,
    };
    (simulator, dispatcher)
}

/// Mock authentication over the shared [`DocumentStore`].
pub struct AuthSimulator {
    store: Arc<DocumentStore>,
    clock: Arc<Clock>,
    config: AuthConfig,
    registry: SharedRegistry,
    notify_tx: mpsc::UnboundedSender<Notification>,
}

impl AuthSimulator {
    /// Registers a new user and signs them in. Always succeeds for any input.
    pub async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        metadata: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> AuthResult<AuthResponse> {
        let now = self.clock.timestamp();
        let user = User {
            id: new_id(),
            email: email.to_string(),
            user_metadata: metadata.unwrap_or_default(),
            created_at: now.clone(),
        };

        let profile = Profile {
            id: new_id(),
            user_id: user.id.clone(),
            full_name: display_name(&user),
            email: user.email.clone(),
            avatar_url: None,
            company: None,
            phone: None,
            created_at: now.clone(),
            updated_at: now.clone(),
        };
        let dashboard = Dashboard {
            id: new_id(),
            user_id: user.id.clone(),
            layout: json!({ "type": "default" }),
            widgets: vec!["stats".into(), "deals".into(), "tasks".into()],
            theme: json!({ "mode": "dark" }),
            created_at: now.clone(),
            updated_at: now.clone(),
        };
        let stats = Stats {
            id: new_id(),
            user_id: user.id.clone(),
            total_incidents: 0,
            ai_queries: 0,
            workflows_count: 0,
            digital_twins_count: 0,
            last_active: now.clone(),
            created_at: now.clone(),
            updated_at: now,
        };

        let response = self.establish(user, to_record(&profile)?, to_record(&dashboard)?, to_record(&stats)?)?;
        info!(user_id = %response.user.id, "user signed up");
        Ok(response)
    }

    /// Signs in as the demo identity with `email`. The password is ignored.
    pub async fn sign_in_with_password(&self, email: &str, _password: &str) -> AuthResult<AuthResponse> {
        let mut user = demo_user();
        user.email = email.to_string();

        let mut profile = demo_profile();
        profile.user_id = DEMO_USER_ID.to_string();
        profile.email = email.to_string();
        let mut dashboard = demo_dashboard();
        dashboard.user_id = DEMO_USER_ID.to_string();
        let mut stats = demo_stats();
        stats.user_id = DEMO_USER_ID.to_string();
        stats.last_active = self.clock.timestamp();

        let response = self.establish(user, to_record(&profile)?, to_record(&dashboard)?, to_record(&stats)?)?;
        info!(user_id = %response.user.id, "user signed in");
        Ok(response)
    }

    /// Simulated OAuth: signs in as `demo@<provider>.com`.
    pub async fn sign_in_with_oauth(&self, provider: &str) -> AuthResult<AuthResponse> {
        debug!(provider, "simulating oauth sign-in");
        let email = format!("demo@{provider}.com");
        self.sign_in_with_password(&email, &self.config.oauth_password).await
    }

    /// Clears the identity and per-user singletons and queues `SIGNED_OUT`.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.store.mutate(|document| document.clear_identity())?;
        info!("user signed out");
        self.notify(AuthChangeEvent::SignedOut, None, None);
        Ok(())
    }

    pub async fn get_session(&self) -> AuthResult<Option<Session>> {
        Ok(self.store.load()?.session)
    }

    pub async fn get_user(&self) -> AuthResult<Option<User>> {
        Ok(self.store.load()?.user)
    }

    /// Registers `listener` for auth state changes.
    ///
    /// If a session exists, an `INITIAL_SESSION` is queued for this listener only.
    pub fn on_auth_state_change<F>(&self, listener: F) -> AuthResult<Subscription>
    where
        F: Fn(AuthChangeEvent, Option<&Session>) + Send + Sync + 'static,
    {
        let session = self.store.load()?.session;
        let listener: AuthListener = Arc::new(listener);
        let id = lock_registry(&self.registry).register(listener);
        debug!(listener = %id, "auth listener registered");

        if let Some(session) = session {
            self.notify(AuthChangeEvent::InitialSession, Some(session), Some(id));
        }
        Ok(Subscription::new(id, &self.registry))
    }

    /// Channel flavour of [`AuthSimulator::on_auth_state_change`].
    pub fn subscribe(&self) -> AuthResult<(Subscription, mpsc::UnboundedReceiver<AuthStateChange>)> {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.on_auth_state_change(move |event, session| {
            let change = AuthStateChange {
                event,
                session: session.cloned(),
            };
            // Receiver dropped: nothing left to notify.
            let _ = tx.send(change);
        })?;
        Ok((subscription, rx))
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        lock_registry(&self.registry).len()
    }

    fn establish(
        &self,
        user: User,
        profile: Record,
        dashboard: Record,
        stats: Record,
    ) -> AuthResult<AuthResponse> {
        let session = self.issue_session(&user);
        let stored = session.clone();
        self.store.mutate(move |document| {
            document.user = Some(stored.user.clone());
            document.session = Some(stored);
            document.profile = Some(profile);
            document.dashboard = Some(dashboard);
            document.stats = Some(stats);
        })?;

        self.notify(AuthChangeEvent::SignedIn, Some(session.clone()), None);
        Ok(AuthResponse { user, session })
    }

    fn issue_session(&self, user: &User) -> Session {
        let token_id = new_id();
        let ttl = self.config.session_ttl_secs;
        Session {
            access_token: format!("mock-token-{token_id}"),
            refresh_token: format!("mock-refresh-{token_id}"),
            expires_at: chrono::Utc::now().timestamp_millis() + ttl * 1000,
            expires_in: ttl,
            token_type: "bearer".to_string(),
            user: user.clone(),
        }
    }

    fn notify(
        &self,
        event: AuthChangeEvent,
        session: Option<Session>,
        target: Option<ListenerId>,
    ) {
        let notification = Notification {
            event,
            session,
            target,
        };
        if self.notify_tx.send(notification).is_err() {
            warn!(%event, "auth dispatcher dropped, event not delivered");
        }
    }
}

impl std::fmt::Debug for AuthSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSimulator")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// `full_name` from metadata, else the local part of the email.
fn display_name(user: &User) -> String {
    match user.user_metadata.get("full_name").and_then(|v| v.as_str()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => user
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
