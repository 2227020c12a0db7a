//! Priority-ordered event handler registries.
//!
//! # Architecture
//!
//! ```text
//! RegistryDirectory (bulk lifecycle operations)
//!    │
//!    ├── EventRegistry "player_join"
//!    │      ├── lowest  [sub, sub]
//!    │      ├── normal  [sub]
//!    │      └── monitor [sub]        ──bake──►  Snapshot [sub, sub, sub, sub]
//!    │
//!    └── EventRegistry "block_break"
//!           └── ...
//! ```
//!
//! # Key Components
//!
//! - [`EventRegistry`]: subscriptions of one event category, bucketed by
//!   [`EventPriority`], with a cached dispatch [`Snapshot`]
//! - [`RegistryDirectory`]: every registry, for plugin unload and full resets
//! - [`Subscription`]: one (owner, handler, priority) registration
//! - [`OwnerId`] / [`ListenerRef`]: default owner and handler identities
//!
//! # Example
//!
//! ```rust
//! use handler_registry::{
//!     EventPriority, EventRegistry, Listener, ListenerRef, OwnerId, RegistryDirectory,
//!     Subscription,
//! };
//!
//! struct JoinGreeter;
//! impl Listener for JoinGreeter {}
//!
//! let directory: RegistryDirectory = RegistryDirectory::new();
//! let player_join = EventRegistry::new("player_join", &directory);
//!
//! let plugin = OwnerId::new("greeter");
//! let greeter = ListenerRef::new(JoinGreeter);
//! player_join
//!     .register(Subscription::new(plugin.clone(), greeter, EventPriority::Normal))
//!     .unwrap();
//!
//! // Publisher side
//! for subscription in &player_join.ordered_subscriptions() {
//!     let _ = subscription.handler(); // invoke the listener here
//! }
//!
//! // Plugin unload
//! assert_eq!(directory.unregister_all_for_owner(&plugin), 1);
//! assert!(player_join.ordered_subscriptions().is_empty());
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod priority;
pub mod registry;
pub mod subscription;

pub use config::{LoggingConfig, RegistryConfig};
pub use directory::RegistryDirectory;
pub use error::{ConfigError, ConfigResult, RegistryError, RegistryResult};
pub use logging::init_logging;
pub use priority::{EventPriority, ParsePriorityError};
pub use registry::{EventRegistry, RegistryStats, Snapshot};
pub use subscription::{Identity, Listener, ListenerRef, OwnerId, Subscription};
