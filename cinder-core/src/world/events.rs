//! World lifecycle notifications.
//!
//! Subscribers receive events through their own channel. Dropping a
//! [`Subscription`] unsubscribes it.

use std::sync::{Arc, Weak};

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;

/// A world lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// A map was loaded or reloaded in place.
    NewMapLoaded,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    senders: Vec<(u64, Sender<WorldEvent>)>,
}

/// Broadcasts world lifecycle events to every live subscriber.
///
/// Cloning is cheap and shares the same subscriber list.
#[derive(Clone, Default)]
pub struct WorldEvents {
    subscribers: Arc<Mutex<Subscribers>>,
}

impl WorldEvents {
    /// Creates an event bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = channel::unbounded();
        let mut subscribers = self.subscribers.lock();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.senders.push((id, sender));

        Subscription {
            id,
            receiver,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Notifies every subscriber that a map was (re)loaded.
    pub fn raise_new_map_loaded(&self) {
        self.raise(WorldEvent::NewMapLoaded);
    }

    fn raise(&self, event: WorldEvent) {
        let subscribers = self.subscribers.lock();
        for (_, sender) in &subscribers.senders {
            // The receiver lives as long as the subscription, which removes
            // its sender on drop.
            let _ = sender.send(event);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().senders.len()
    }
}

/// A live registration on [`WorldEvents`].
pub struct Subscription {
    id: u64,
    receiver: Receiver<WorldEvent>,
    subscribers: Weak<Mutex<Subscribers>>,
}

impl Subscription {
    /// Takes every event raised since the last call, oldest first.
    pub fn drain(&self) -> impl Iterator<Item = WorldEvent> + '_ {
        self.receiver.try_iter()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers
                .lock()
                .senders
                .retain(|(id, _)| *id != self.id);
        }
    }
}
