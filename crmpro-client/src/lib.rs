//! CRMPro backend client.
//!
//! Picks the backend from configuration (`SUPABASE_URL` and
//! `SUPABASE_ANON_KEY` select a hosted backend, anything else the local mock)
//! and wires the document store, auth simulator and query emulator together.
//!
//! ```ignore
//! crmpro_client::init_tracing();
//! let client = Client::spawn(ClientConfig::from_env()?)?;
//! client.auth().sign_in_with_password("demo@crmpro.app", "x").await?;
//! let deals = client.from("deals").select("*").order("value", false).await;
//! ```

mod client;
mod config;
mod error;

pub use client::Client;
pub use config::{
    BackendMode, ClientConfig, ENV_DATA_DIR, ENV_REMOTE_KEY, ENV_REMOTE_URL, ENV_SESSION_TTL,
    ENV_STORAGE_KEY,
};
pub use error::{ClientError, ClientResult};

pub use crmpro_auth as auth;
pub use crmpro_plans as plans;
pub use crmpro_query as query;
pub use crmpro_store as store;
pub use crmpro_types as types;

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
