//! Listener registry and subscriptions.

use crmpro_types::{AuthChangeEvent, Session};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::debug;

/// Callback invoked for every auth state change it is subscribed to.
pub type AuthListener = Arc<dyn Fn(AuthChangeEvent, Option<&Session>) + Send + Sync>;

/// Identity of a registered listener. Ids increase with registration order
/// and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: BTreeMap<ListenerId, AuthListener>,
}

impl ListenerRegistry {
    pub(crate) fn register(&mut self, listener: AuthListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub(crate) fn get(&self, id: ListenerId) -> Option<AuthListener> {
        self.listeners.get(&id).cloned()
    }

    /// Current listeners in registration order.
    pub(crate) fn snapshot(&self) -> Vec<(ListenerId, AuthListener)> {
        self.listeners
            .iter()
            .map(|(id, l)| (*id, Arc::clone(l)))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

pub(crate) type SharedRegistry = Arc<Mutex<ListenerRegistry>>;

pub(crate) fn lock_registry(registry: &Mutex<ListenerRegistry>) -> MutexGuard<'_, ListenerRegistry> {
    registry.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("[AuthListeners] recovering from poisoned mutex");
        poisoned.into_inner()
    })
}

/// Handle returned by `on_auth_state_change`. Dropping it does not
/// unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Clone)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, registry: &SharedRegistry) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Removes this listener. Other listeners are unaffected. Returns false if
    /// it was already removed or the simulator is gone.
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = lock_registry(&registry).remove(self.id);
        if removed {
            debug!(listener = %self.id, "auth listener unsubscribed");
        }
        removed
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
