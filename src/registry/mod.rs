//! Bounded history of recently constructed root errors.
//!
//! Every root [`Error`] is claimed into a fixed-size ring when it is built:
//! slot `id % capacity` holds the newest root that mapped to it. The
//! [bridge](crate::bridge) looks ids up here to recover a root error that
//! reached [`wrap`](crate::wrap) buried inside a foreign error.
//!
//! Slots never own their errors. A root is found only while its slot has
//! not been reused and something else still holds it.
//!
//! The process-wide registry is created on first use with
//! [`DEFAULT_CAPACITY`] slots. Call [`install`] before any error is built to
//! use a different capacity or another [`ErrorRegistry`] implementation.
//!
//! # Examples
//!
//! ```
//! use errtrail::registry::{ErrorRegistry, RegistryConfig, RingRegistry};
//!
//! let registry = RingRegistry::new(RegistryConfig { capacity: 2 });
//! let first = errtrail::Error::new("first");
//! registry.claim(&first);
//! assert_eq!(registry.lookup(first.id()), Some(first.clone()));
//!
//! let second = errtrail::Error::new("second");
//! let third = errtrail::Error::new("third");
//! registry.claim(&second);
//! registry.claim(&third);
//! assert_eq!(registry.lookup(first.id()), None);
//! assert_eq!(registry.lookup(third.id()), Some(third.clone()));
//!
//! let id = third.id();
//! drop(third);
//! assert_eq!(registry.lookup(id), None);
//! ```

use crate::types::error::WeakError;
use crate::types::Error;
use core::fmt;
use parking_lot::RwLock;
use std::sync::OnceLock;

/// Slots in the default process-wide registry.
pub const DEFAULT_CAPACITY: usize = 100;

/// Storage for recently constructed root errors.
///
/// Implementations must be safe to share between threads: `claim` and
/// `lookup` may race, and a lookup must either see a slot's previous occupant
/// or its new one, never a partial write.
pub trait ErrorRegistry: Send + Sync {
    /// Records `error`, evicting whatever occupied its slot.
    fn claim(&self, error: &Error);

    /// Returns the error with `id` if it is still registered and alive.
    fn lookup(&self, id: u64) -> Option<Error>;

    fn capacity(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Number of slots; zero is treated as one.
    pub capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY }
    }
}

/// Ring buffer registry guarded by a single reader/writer lock.
///
/// Slots hold weak handles: claiming an error does not extend its lifetime.
pub struct RingRegistry {
    slots: RwLock<Box<[Option<WeakError>]>>,
}

impl RingRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        let capacity = config.capacity.max(1);
        Self { slots: RwLock::new((0..capacity).map(|_| None).collect()) }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(RegistryConfig { capacity })
    }

    /// Empties every slot.
    pub fn clear(&self) {
        self.slots.write().iter_mut().for_each(|slot| *slot = None);
    }

    /// Number of slots whose error is still alive.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .iter()
            .flatten()
            .filter(|weak| weak.upgrade().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn index(id: u64, capacity: usize) -> usize {
        (id % capacity as u64) as usize
    }
}

impl Default for RingRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl fmt::Debug for RingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingRegistry")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

impl ErrorRegistry for RingRegistry {
    fn claim(&self, error: &Error) {
        let mut slots = self.slots.write();
        let index = Self::index(error.id(), slots.len());
        let evicted = slots[index].replace(error.downgrade());
        drop(slots);

        #[cfg(feature = "tracing")]
        if let Some(evicted) = evicted {
            tracing::trace!(
                target: "errtrail::registry",
                evicted = evicted.id(),
                claimed = error.id(),
                slot = index,
                "root error evicted"
            );
        }
        #[cfg(not(feature = "tracing"))]
        let _ = evicted;
    }

    fn lookup(&self, id: u64) -> Option<Error> {
        let weak = {
            let slots = self.slots.read();
            slots[Self::index(id, slots.len())].as_ref().filter(|w| w.id() == id).cloned()
        };
        weak.and_then(|w| w.upgrade())
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.read().len()
    }
}

static GLOBAL: OnceLock<Box<dyn ErrorRegistry>> = OnceLock::new();

/// The process-wide registry used by constructors and [`wrap`](crate::wrap).
pub fn global() -> &'static dyn ErrorRegistry {
    GLOBAL.get_or_init(|| Box::new(RingRegistry::default())).as_ref()
}

/// Replaces the default process-wide registry.
///
/// Must run before the first error is constructed; afterwards the registry
/// is fixed for the life of the process.
pub fn install<R: ErrorRegistry + 'static>(registry: R) -> Result<(), InstallError> {
    GLOBAL.set(Box::new(registry)).map_err(|_| InstallError::AlreadyInitialized)
}

/// Failure of [`install`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallError {
    /// A registry is already in use.
    AlreadyInitialized,
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => f.write_str("error registry already initialized"),
        }
    }
}

impl std::error::Error for InstallError {}
