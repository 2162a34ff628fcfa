//! Mock authentication for the CRMPro backend shim.
//!
//! [`AuthSimulator`] owns the single session slot (persisted in the
//! [`crmpro_store::DocumentStore`]) and the listener registry. State changes
//! are queued and delivered by an [`AuthDispatcher`], never inline.
//!
//! ```ignore
//! let (auth, dispatcher) = create_auth_simulator(store, clock, AuthConfig::default());
//! tokio::spawn(dispatcher.run());
//! let sub = auth.on_auth_state_change(|event, session| println!("{event}"))?;
//! auth.sign_in_with_password("demo@crmpro.app", "anything").await?;
//! ```

mod config;
mod dispatcher;
mod error;
mod listener;
mod simulator;

pub use config::AuthConfig;
pub use dispatcher::AuthDispatcher;
pub use error::{AuthError, AuthResult};
pub use listener::{AuthListener, ListenerId, Subscription};
pub use simulator::{create_auth_simulator, AuthResponse, AuthSimulator, AuthStateChange};
