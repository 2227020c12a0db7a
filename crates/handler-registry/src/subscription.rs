//! Subscriptions and the identity types they are keyed on.
//!
//! A [`Subscription`] is one handler's interest in one event category at one
//! priority. The registry never looks inside owners or handlers; it only
//! compares them, so both are generic over [`Identity`]. The crate ships
//! [`OwnerId`] and [`ListenerRef`] as the default plugin/listener pairing.

use crate::priority::EventPriority;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Capability required from owner and handler types.
///
/// Equality decides duplicate detection and removal, so it must be a stable
/// identity rather than structural similarity.
pub trait Identity: Clone + Eq + fmt::Debug + Send + Sync + 'static {}

impl<T> Identity for T where T: Clone + Eq + fmt::Debug + Send + Sync + 'static {}

/// Identity of the component (usually a plugin) that owns subscriptions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId {
    id: Uuid,
    name: String,
}

impl OwnerId {
    /// Create a new owner with a fresh random id
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create an owner with a known id (e.g. restored from a plugin manifest)
    pub fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Marker for objects that hold event handler methods.
///
/// Invoking handlers is the publisher's business; the registry only needs to
/// tell listeners apart.
pub trait Listener: Send + Sync + 'static {
    /// Human readable name used in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared reference to a [`Listener`], compared by object identity.
///
/// Two `ListenerRef`s are equal only if they point at the same listener
/// allocation, regardless of the listener's contents.
#[derive(Clone)]
pub struct ListenerRef(Arc<dyn Listener>);

impl ListenerRef {
    pub fn new<L: Listener>(listener: L) -> Self {
        Self(Arc::new(listener))
    }

    /// Get the underlying listener
    pub fn listener(&self) -> &Arc<dyn Listener> {
        &self.0
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl<L: Listener> From<Arc<L>> for ListenerRef {
    fn from(listener: Arc<L>) -> Self {
        Self(listener)
    }
}

impl PartialEq for ListenerRef {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ListenerRef {}

impl Hash for ListenerRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for ListenerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRef")
            .field("name", &self.name())
            .field("addr", &self.addr())
            .finish()
    }
}

/// One registered interest of a handler in an event category.
///
/// Equality covers owner, handler and priority. `ignore_cancelled` is
/// carried for the publisher and does not take part in it.
#[derive(Clone)]
pub struct Subscription<O = OwnerId, H = ListenerRef> {
    owner: O,
    handler: H,
    priority: EventPriority,
    ignore_cancelled: bool,
}

impl<O: Identity, H: Identity> Subscription<O, H> {
    pub fn new(owner: O, handler: H, priority: EventPriority) -> Self {
        Self {
            owner,
            handler,
            priority,
            ignore_cancelled: false,
        }
    }

    /// Skip this subscription for events already cancelled by an earlier handler
    pub fn with_ignore_cancelled(mut self, ignore_cancelled: bool) -> Self {
        self.ignore_cancelled = ignore_cancelled;
        self
    }

    pub fn owner(&self) -> &O {
        &self.owner
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn priority(&self) -> EventPriority {
        self.priority
    }

    pub fn ignore_cancelled(&self) -> bool {
        self.ignore_cancelled
    }
}

impl<O: PartialEq, H: PartialEq> PartialEq for Subscription<O, H> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
            && self.owner == other.owner
            && self.handler == other.handler
    }
}

impl<O: Eq, H: Eq> Eq for Subscription<O, H> {}

impl<O: fmt::Debug, H: fmt::Debug> fmt::Debug for Subscription<O, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("owner", &self.owner)
            .field("handler", &self.handler)
            .field("priority", &self.priority)
            .field("ignore_cancelled", &self.ignore_cancelled)
            .finish()
    }
}
