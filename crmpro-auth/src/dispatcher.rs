//! Deferred delivery of auth state changes.
//!
//! The simulator never calls listeners itself. It queues a notification and
//! returns; the dispatcher delivers queued notifications in FIFO order on a
//! later turn. The listener set is read at delivery time, so a listener
//! registered right after a sign-in (before the dispatcher runs) still sees
//! that `SIGNED_IN`, and one unsubscribed before delivery does not.

use crate::listener::{lock_registry, AuthListener, ListenerId, SharedRegistry};
use crmpro_types::{AuthChangeEvent, Session};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// A queued auth state change.
#[derive(Debug, Clone)]
pub(crate) struct Notification {
    pub(crate) event: AuthChangeEvent,
    pub(crate) session: Option<Session>,
    /// `None` broadcasts; `Some` delivers to one listener only.
    pub(crate) target: Option<ListenerId>,
}

/// Delivers queued notifications to listeners.
///
/// Either spawn [`AuthDispatcher::run`] on a runtime, or call
/// [`AuthDispatcher::drain`] to deliver everything queued so far.
pub struct AuthDispatcher {
    rx: mpsc::UnboundedReceiver<Notification>,
    registry: SharedRegistry,
}

impl AuthDispatcher {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<Notification>, registry: SharedRegistry) -> Self {
        Self { rx, registry }
    }

    /// Delivers notifications until the simulator is dropped.
    pub async fn run(mut self) {
        debug!("auth dispatcher started");
        while let Some(notification) = self.rx.recv().await {
            self.deliver(&notification);
        }
        debug!("auth dispatcher stopped");
    }

    /// Delivers every notification queued so far. Returns how many were processed.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(notification) = self.rx.try_recv() {
            self.deliver(&notification);
            processed += 1;
        }
        processed
    }

    fn deliver(&self, notification: &Notification) {
        let targets: Vec<(ListenerId, AuthListener)> = {
            let registry = lock_registry(&self.registry);
            match notification.target {
                Some(id) => registry.get(id).map(|l| vec![(id, l)]).unwrap_or_default(),
                None => registry.snapshot(),
            }
        };

        debug!(
            event = %notification.event,
            listeners = targets.len(),
            "delivering auth event"
        );

        for (id, listener) in targets {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                listener(notification.event, notification.session.as_ref())
            }));
            if outcome.is_err() {
                error!(listener = %id, event = %notification.event, "auth listener panicked");
            }
        }
    }
}
