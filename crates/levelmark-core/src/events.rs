//! Typed application events with a subscribe/emit bus.
//!
//! State changes are broadcast as [`Event`] values instead of being read out
//! of shared mutable globals. Delivery is fan-out with continue-on-error: a
//! failing subscriber never blocks the others, its error is logged and
//! delivery moves on.

use crate::model::{Level, ModuleId};
use crate::score::AbilityScores;

/// A state change broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A level was assigned, either for the first time or replacing an
    /// earlier one. Carries the ability profile so subscribers need no
    /// separate state lookup.
    LevelChanged {
        previous: Option<Level>,
        level: Level,
        abilities: AbilityScores,
    },
    /// The assigned level was cleared ahead of a retake.
    LevelCleared { previous: Level },
    /// A module reported learning progress.
    ProgressUpdated {
        module: ModuleId,
        completed: u32,
        total: u32,
    },
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(&Event) -> anyhow::Result<()> + Send>;

/// A synchronous event bus. Subscribers run in subscription order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Callback)>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and return its handle.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&Event) -> anyhow::Result<()> + Send + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if the handle was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver `event` to every subscriber, returning how many handled it
    /// without error. Subscriber errors are logged and skipped.
    pub fn emit(&mut self, event: &Event) -> usize {
        let mut delivered = 0;
        for (id, callback) in &mut self.subscribers {
            match callback(event) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(subscriber = id.0, "event subscriber failed: {e:#}");
                }
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
