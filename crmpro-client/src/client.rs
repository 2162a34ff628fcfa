//! The assembled backend client.

use crate::config::{BackendMode, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crmpro_auth::{create_auth_simulator, AuthConfig, AuthDispatcher, AuthSimulator};
use crmpro_query::{FunctionsClient, QueryBuilder, QueryContext};
use crmpro_store::{DocumentStore, FileBackend, MemoryBackend, StorageBackend};
use crmpro_types::Clock;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// One mock backend: a document store shared by the auth simulator and the
/// query emulator.
pub struct Client {
    config: ClientConfig,
    store: Arc<DocumentStore>,
    auth: AuthSimulator,
    queries: QueryContext,
    dispatcher_task: Option<JoinHandle<()>>,
}

impl Client {
    /// Builds a client and returns the auth dispatcher for the caller to run.
    ///
    /// Fails with [`ClientError::RemoteUnsupported`] when the config selects a
    /// hosted backend.
    pub fn new(config: ClientConfig) -> ClientResult<(Self, AuthDispatcher)> {
        config.validate()?;

        let mode = BackendMode::select(&config);
        info!(?mode, "backend mode selected");
        if let BackendMode::Remote { url, .. } = mode {
            return Err(ClientError::RemoteUnsupported { url });
        }

        let backend: Arc<dyn StorageBackend> = match &config.data_dir {
            Some(dir) => {
                info!(dir = %dir.display(), key = %config.storage_key, "using file-backed store");
                Arc::new(FileBackend::new(dir))
            }
            None => Arc::new(MemoryBackend::new()),
        };
        let store = Arc::new(DocumentStore::new(backend, config.storage_key.clone()));
        let clock = Arc::new(Clock::new());

        let auth_config = AuthConfig {
            session_ttl_secs: config.session_ttl_secs,
            ..AuthConfig::default()
        };
        let (auth, dispatcher) = create_auth_simulator(Arc::clone(&store), Arc::clone(&clock), auth_config);
        let queries = QueryContext::new(Arc::clone(&store), clock);

        let client = Self {
            config,
            store,
            auth,
            queries,
            dispatcher_task: None,
        };
        Ok((client, dispatcher))
    }

    /// Builds a client and spawns its dispatcher on the current tokio runtime.
    /// The task is aborted when the client is dropped.
    pub fn spawn(config: ClientConfig) -> ClientResult<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ClientError::Config(format!("no tokio runtime: {e}")))?;
        let (mut client, dispatcher) = Self::new(config)?;
        client.dispatcher_task = Some(runtime.spawn(dispatcher.run()));
        Ok(client)
    }

    pub fn auth(&self) -> &AuthSimulator {
        &self.auth
    }

    /// Starts a query on `table`.
    pub fn from(&self, table: &str) -> QueryBuilder {
        self.queries.from(table)
    }

    pub fn functions(&self) -> FunctionsClient {
        FunctionsClient::new(self.queries.clone())
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces the stored document with fresh fixtures. Signs out as a
    /// side effect without notifying listeners.
    pub fn reset_demo_data(&self) -> ClientResult<()> {
        self.store.reset()?;
        Ok(())
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if let Some(task) = self.dispatcher_task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
