//! Directory of every event registry.
//!
//! The directory is how lifecycle code reaches all event categories at once,
//! e.g. to drop every subscription of a plugin that is being unloaded. It is
//! an ordinary value passed to the subsystems that need it, not a global.
//!
//! Bulk operations are serialized against each other. Each one copies the
//! member list, then visits registries one at a time, so only the registry
//! currently being visited is locked. Dispatch and registration on other
//! registries continue undisturbed, and new registries can be created while a
//! bulk operation runs (they are simply not visited by it).

use crate::config::RegistryConfig;
use crate::registry::{EventRegistry, RegistryStats};
use crate::subscription::{Identity, ListenerRef, OwnerId, Subscription};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Append-only collection of [`EventRegistry`] instances
pub struct RegistryDirectory<O = OwnerId, H = ListenerRef> {
    members: Mutex<Vec<Arc<EventRegistry<O, H>>>>,
    /// Serializes bulk operations
    fanout: Mutex<()>,
}

impl<O: Identity, H: Identity> RegistryDirectory<O, H> {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(Vec::new()),
            fanout: Mutex::new(()),
        }
    }

    /// Create a registry for `category` that belongs to this directory
    pub fn create_registry(&self, category: impl Into<String>) -> Arc<EventRegistry<O, H>> {
        EventRegistry::new(category, self)
    }

    /// Add a registry. Called once per registry by [`EventRegistry::new`].
    pub fn register_instance(&self, registry: Arc<EventRegistry<O, H>>) {
        debug!(
            category = %registry.category(),
            "Added registry to directory"
        );
        self.members.lock().push(registry);
    }

    /// Bake every registry so the first dispatch does not pay for it
    pub fn bake_all(&self) {
        let baked = self.bake_members();
        debug!(registries = baked, "Baked all registries");
    }

    /// Bake every registry if `config.prebake` is set.
    ///
    /// Returns the number of registries baked.
    pub fn warm_up(&self, config: &RegistryConfig) -> usize {
        if !config.prebake {
            debug!("Prebake disabled, skipping warm-up");
            return 0;
        }
        let baked = self.bake_members();
        info!(registries = baked, "Warmed up registries");
        baked
    }

    /// Clear every registry. Returns the number of subscriptions removed.
    pub fn unregister_all(&self) -> usize {
        let removed = self.for_each_member(EventRegistry::clear);
        if removed > 0 {
            info!(removed, "Unregistered all subscriptions");
        }
        removed
    }

    /// Remove every subscription of `owner` from every registry
    pub fn unregister_all_for_owner(&self, owner: &O) -> usize {
        let removed = self.for_each_member(|registry| registry.unregister_owner(owner));
        if removed > 0 {
            info!(?owner, removed, "Unregistered owner from all registries");
        }
        removed
    }

    /// Remove every subscription of `handler` from every registry
    pub fn unregister_all_for_handler(&self, handler: &H) -> usize {
        let removed = self.for_each_member(|registry| registry.unregister_handler(handler));
        if removed > 0 {
            info!(
                ?handler,
                removed,
                "Unregistered handler from all registries"
            );
        }
        removed
    }

    /// Every subscription of `owner`, across all registries.
    ///
    /// Ordered by registry creation, then dispatch order. The result is a
    /// copy; later registrations do not show up in it.
    pub fn list_subscriptions_for_owner(&self, owner: &O) -> Vec<Subscription<O, H>> {
        let mut found = Vec::new();
        self.for_each_member(|registry| {
            found.extend(registry.subscriptions_for_owner(owner));
            0
        });
        found
    }

    /// All registries, in creation order
    pub fn list_registries(&self) -> Vec<Arc<EventRegistry<O, H>>> {
        self.members.lock().clone()
    }

    /// Diagnostic summary of every registry
    pub fn stats(&self) -> Vec<RegistryStats> {
        self.list_registries().iter().map(|r| r.stats()).collect()
    }

    /// Number of registries
    pub fn len(&self) -> usize {
        self.members.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bake_members(&self) -> usize {
        self.for_each_member(|registry| {
            registry.bake();
            1
        })
    }

    /// Run `op` on each member while holding the fan-out lock, summing results
    fn for_each_member<F>(&self, mut op: F) -> usize
    where
        F: FnMut(&EventRegistry<O, H>) -> usize,
    {
        let _fanout = self.fanout.lock();
        let members = self.list_registries();
        members.iter().map(|registry| op(registry.as_ref())).sum()
    }
}

impl<O: Identity, H: Identity> Default for RegistryDirectory<O, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, H> fmt::Debug for RegistryDirectory<O, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryDirectory")
            .field("registries", &self.members.lock().len())
            .finish()
    }
}
