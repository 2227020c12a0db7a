//! Per-category event registry.
//!
//! An [`EventRegistry`] keeps the subscriptions of one event category in one
//! bucket per [`EventPriority`]. Publishers never walk the buckets directly;
//! they call [`EventRegistry::ordered_subscriptions`], which hands out an
//! immutable, priority-ordered [`Snapshot`].
//!
//! # Caching
//!
//! ```text
//! register / unregister / clear          ordered_subscriptions()
//!          │                                      │
//!          ▼                                      ▼
//!   lock slots ─► mutate ─► drop snapshot    load snapshot ──(hit)──► return
//!                                                 │
//!                                               (miss)
//!                                                 ▼
//!                                   lock slots ─► bake ─► publish ─► return
//! ```
//!
//! Every mutation and every bake runs under the registry's mutex. The
//! snapshot itself lives in an [`ArcSwapOption`], so a hit costs one atomic
//! load and never touches the mutex. A snapshot is fully built before it is
//! published and never modified afterwards.

use crate::directory::RegistryDirectory;
use crate::error::{RegistryError, RegistryResult};
use crate::priority::EventPriority;
use crate::subscription::{Identity, ListenerRef, OwnerId, Subscription};
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, trace, warn};

type Slots<O, H> = [Vec<Subscription<O, H>>; EventPriority::COUNT];

/// Immutable, priority-ordered view of a registry's subscriptions.
///
/// Cheap to clone; every clone shares the same baked sequence.
pub struct Snapshot<O = OwnerId, H = ListenerRef>(Arc<Vec<Subscription<O, H>>>);

impl<O, H> Snapshot<O, H> {
    /// Whether both snapshots are the same baked sequence (not just equal contents)
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn as_slice(&self) -> &[Subscription<O, H>] {
        &self.0
    }
}

impl<O, H> Clone for Snapshot<O, H> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<O, H> Deref for Snapshot<O, H> {
    type Target = [Subscription<O, H>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, O, H> IntoIterator for &'a Snapshot<O, H> {
    type Item = &'a Subscription<O, H>;
    type IntoIter = std::slice::Iter<'a, Subscription<O, H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<O: fmt::Debug, H: fmt::Debug> fmt::Debug for Snapshot<O, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Diagnostic summary of one registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    /// Event category name
    pub category: String,
    /// Total number of subscriptions
    pub total: usize,
    /// Subscription count per priority, in dispatch order
    pub per_priority: BTreeMap<EventPriority, usize>,
    /// Whether a valid snapshot is currently cached
    pub baked: bool,
}

/// Subscriptions of a single event category, bucketed by priority
pub struct EventRegistry<O = OwnerId, H = ListenerRef> {
    category: String,
    slots: Mutex<Slots<O, H>>,
    baked: ArcSwapOption<Vec<Subscription<O, H>>>,
}

impl<O: Identity, H: Identity> EventRegistry<O, H> {
    /// Create a registry for `category` and add it to `directory`.
    ///
    /// Registries are never removed from their directory, so bulk operations
    /// reach every registry ever created through it.
    pub fn new(category: impl Into<String>, directory: &RegistryDirectory<O, H>) -> Arc<Self> {
        let registry = Arc::new(Self {
            category: category.into(),
            slots: Mutex::new(std::array::from_fn(|_| Vec::new())),
            baked: ArcSwapOption::empty(),
        });
        directory.register_instance(Arc::clone(&registry));
        registry
    }

    /// Event category this registry serves
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Register a subscription at the end of its priority bucket.
    ///
    /// Fails if an equal subscription is already registered; the registry is
    /// unchanged in that case.
    pub fn register(&self, subscription: Subscription<O, H>) -> RegistryResult<()> {
        let priority = subscription.priority();
        let mut slots = self.slots.lock();
        let slot = &mut slots[priority.ordinal()];

        if slot.contains(&subscription) {
            let rendered = format!("{:?}", subscription);
            warn!(
                category = %self.category,
                %priority,
                subscription = %rendered,
                "Rejected duplicate subscription"
            );
            return Err(RegistryError::DuplicateRegistration {
                category: self.category.clone(),
                priority,
                subscription: rendered,
            });
        }

        slot.push(subscription);
        self.invalidate();
        debug!(
            category = %self.category,
            %priority,
            "Registered subscription"
        );
        Ok(())
    }

    /// Register subscriptions in order, stopping at the first duplicate.
    ///
    /// Subscriptions registered before the failure stay registered.
    pub fn register_all<I>(&self, subscriptions: I) -> RegistryResult<()>
    where
        I: IntoIterator<Item = Subscription<O, H>>,
    {
        for subscription in subscriptions {
            self.register(subscription)?;
        }
        Ok(())
    }

    /// Remove an equal subscription. Returns `false` if none was registered.
    pub fn unregister(&self, subscription: &Subscription<O, H>) -> bool {
        let priority = subscription.priority();
        let mut slots = self.slots.lock();
        let slot = &mut slots[priority.ordinal()];

        let Some(index) = slot.iter().position(|s| s == subscription) else {
            return false;
        };
        slot.remove(index);
        self.invalidate();
        debug!(
            category = %self.category,
            %priority,
            "Unregistered subscription"
        );
        true
    }

    /// Remove every subscription owned by `owner`. Returns the number removed.
    pub fn unregister_owner(&self, owner: &O) -> usize {
        self.remove_where(|s| s.owner() == owner)
    }

    /// Remove every subscription for `handler`. Returns the number removed.
    pub fn unregister_handler(&self, handler: &H) -> usize {
        self.remove_where(|s| s.handler() == handler)
    }

    /// Remove all subscriptions. Returns the number removed.
    pub fn clear(&self) -> usize {
        self.remove_where(|_| true)
    }

    /// Bake the dispatch snapshot unless a valid one is cached
    pub fn bake(&self) {
        self.bake_snapshot();
    }

    /// Subscriptions in dispatch order.
    ///
    /// Lowest priority first, registration order within a priority. Returns
    /// the cached snapshot without locking when one is valid; an empty
    /// snapshot means there is nobody to notify.
    pub fn ordered_subscriptions(&self) -> Snapshot<O, H> {
        match self.baked.load_full() {
            Some(baked) => Snapshot(baked),
            None => self.bake_snapshot(),
        }
    }

    /// Whether a valid snapshot is currently cached
    pub fn is_baked(&self) -> bool {
        self.baked.load().is_some()
    }

    /// All subscriptions owned by `owner`, in dispatch order
    pub fn subscriptions_for_owner(&self, owner: &O) -> Vec<Subscription<O, H>> {
        self.slots
            .lock()
            .iter()
            .flatten()
            .filter(|s| s.owner() == owner)
            .cloned()
            .collect()
    }

    /// Number of registered subscriptions
    pub fn len(&self) -> usize {
        self.slots.lock().iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Diagnostic summary of this registry
    pub fn stats(&self) -> RegistryStats {
        let slots = self.slots.lock();
        let per_priority: BTreeMap<_, _> = EventPriority::ALL
            .into_iter()
            .map(|p| (p, slots[p.ordinal()].len()))
            .collect();

        RegistryStats {
            category: self.category.clone(),
            total: per_priority.values().sum(),
            per_priority,
            baked: self.is_baked(),
        }
    }

    fn bake_snapshot(&self) -> Snapshot<O, H> {
        let slots = self.slots.lock();

        // Another caller may have baked while we waited for the lock
        if let Some(baked) = self.baked.load_full() {
            return Snapshot(baked);
        }

        let baked: Arc<Vec<_>> = Arc::new(slots.iter().flatten().cloned().collect());
        self.baked.store(Some(Arc::clone(&baked)));
        trace!(
            category = %self.category,
            subscriptions = baked.len(),
            "Baked snapshot"
        );
        Snapshot(baked)
    }

    fn remove_where<F>(&self, mut matches: F) -> usize
    where
        F: FnMut(&Subscription<O, H>) -> bool,
    {
        let mut slots = self.slots.lock();
        let mut removed = 0;
        for slot in slots.iter_mut() {
            let before = slot.len();
            slot.retain(|s| !matches(s));
            removed += before - slot.len();
        }

        if removed > 0 {
            self.invalidate();
            debug!(category = %self.category, removed, "Removed subscriptions");
        }
        removed
    }

    /// Drop the cached snapshot. Callers must hold the slots lock.
    fn invalidate(&self) {
        self.baked.store(None);
    }
}

impl<O, H> fmt::Debug for EventRegistry<O, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("category", &self.category)
            .field(
                "subscriptions",
                &self.slots.lock().iter().map(Vec::len).sum::<usize>(),
            )
            .field("baked", &self.baked.load().is_some())
            .finish()
    }
}
