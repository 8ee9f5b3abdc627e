use dashmap::DashMap;
use hui_domain::{GroupId, MemberId, Money};
use std::sync::{
    Arc, Weak,
    atomic::{AtomicU64, Ordering},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MemberCreated,
    MemberUpdated,
    MemberDeleted,
    GroupOpened,
    GroupCompleted,
    PeriodClosed,
    PaymentMade,
    CollectionExecuted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    MemberCreated {
        member: MemberId,
    },
    MemberUpdated {
        member: MemberId,
    },
    MemberDeleted {
        member: MemberId,
    },
    GroupOpened {
        group: GroupId,
    },
    GroupCompleted {
        group: GroupId,
    },
    PeriodClosed {
        group: GroupId,
        period: u32,
    },
    PaymentMade {
        group: GroupId,
        member: MemberId,
        period: u32,
        amount: Money,
    },
    CollectionExecuted {
        group: GroupId,
        winner: MemberId,
        period: u32,
        net_received: Money,
    },
}

impl LedgerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MemberCreated { .. } => EventKind::MemberCreated,
            Self::MemberUpdated { .. } => EventKind::MemberUpdated,
            Self::MemberDeleted { .. } => EventKind::MemberDeleted,
            Self::GroupOpened { .. } => EventKind::GroupOpened,
            Self::GroupCompleted { .. } => EventKind::GroupCompleted,
            Self::PeriodClosed { .. } => EventKind::PeriodClosed,
            Self::PaymentMade { .. } => EventKind::PaymentMade,
            Self::CollectionExecuted { .. } => EventKind::CollectionExecuted,
        }
    }
}

type Handler = Arc<dyn Fn(&LedgerEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    handlers: DashMap<u64, (EventKind, Handler)>,
}

/// Explicit observer registry.
///
/// Cloning shares the registry. Handlers stay registered for as long as the
/// [`Subscription`] returned by [`EventBus::subscribe`] is alive.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Registry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "dropping the subscription unsubscribes the handler"]
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&LedgerEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.handlers.insert(id, (kind, Arc::new(handler)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Calls matching handlers in subscription order.
    pub fn publish(&self, event: &LedgerEvent) {
        let kind = event.kind();
        // Collected first so handlers may subscribe or unsubscribe without
        // contending on the map's shard locks.
        let mut matching: Vec<(u64, Handler)> = self
            .inner
            .handlers
            .iter()
            .filter(|entry| entry.value().0 == kind)
            .map(|entry| (*entry.key(), Arc::clone(&entry.value().1)))
            .collect();
        matching.sort_unstable_by_key(|(id, _)| *id);

        tracing::trace!(?kind, handlers = matching.len(), "Publishing event");
        for (_, handler) in matching {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.len()
    }
}

pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.handlers.remove(&self.id);
        }
    }
}
