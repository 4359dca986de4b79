//! Capacity-bounded bidirectional pod identity registry
//!
//! Maps a namespace-qualified pod name to its runtime identity (pod UID
//! plus container ID) and back. The registry holds at most `capacity`
//! bindings; admitting a new name when full evicts the binding that was
//! written longest ago. Updating an existing name counts as a fresh write
//! and moves it to the back of the eviction order, while reads never
//! affect the order.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use api_types::PodId;
use api_types::PodName;
use tracing::debug;
use tracing::info;

use crate::error::Result;
use crate::error::TrackerError;

/// Interior state kept in lock-step under a single lock.
///
/// Invariants: `by_name` and `by_id` are mutual inverses, and `write_order`
/// contains each bound name exactly once, oldest write first.
#[derive(Debug, Default)]
struct RegistryState {
    by_name: HashMap<PodName, PodId>,
    by_id: HashMap<PodId, PodName>,
    write_order: VecDeque<PodName>,
}

impl RegistryState {
    /// Remove the binding for `name` from all three structures.
    ///
    /// Returns the identity it was bound to, or `None` if the name was not
    /// bound. Removal from the middle of `write_order` is a linear scan;
    /// capacities are one entry per tracked pod on a node, so this stays
    /// cheap.
    fn unbind(&mut self, name: &PodName) -> Option<PodId> {
        let id = self.by_name.remove(name)?;
        self.by_id.remove(&id);
        if let Some(pos) = self.write_order.iter().position(|n| n == name) {
            self.write_order.remove(pos);
        }
        Some(id)
    }
}

/// Bounded bidirectional pod name ↔ pod identity registry.
///
/// All methods take `&self`; the registry is safe to share across threads
/// behind an `Arc`. Writes are atomic with respect to the instance lock, so
/// readers never observe a half-updated forward/reverse pair.
#[derive(Debug)]
pub struct PodRegistry {
    state: RwLock<RegistryState>,
    capacity: usize,
}

impl PodRegistry {
    /// Create a registry holding at most `capacity` bindings.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::InvalidCapacity`] if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TrackerError::InvalidCapacity { capacity });
        }
        Ok(Self {
            state: RwLock::new(RegistryState::default()),
            capacity,
        })
    }

    /// Maximum number of bindings this registry will hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Insert or update the binding for `name`.
    ///
    /// An update counts as a fresh write: the name moves to the back of the
    /// eviction order. A brand-new name admitted while the registry is full
    /// first evicts the binding written longest ago. If `id` is already
    /// bound to a different name, that stale binding is removed as well, so
    /// the forward and reverse maps stay mutual inverses.
    pub fn insert(&self, name: PodName, id: PodId) {
        let mut state = self.write();

        if let Some(holder) = state.by_id.get(&id).filter(|n| **n != name).cloned() {
            state.unbind(&holder);
            info!(pod = %holder, id = %id, "Unbound pod whose identity was rebound elsewhere");
        }

        let refreshed = state.unbind(&name).is_some();
        if !refreshed && state.by_name.len() >= self.capacity {
            if let Some(oldest) = state.write_order.front().cloned() {
                state.unbind(&oldest);
                info!(pod = %oldest, "Evicted oldest pod binding at capacity");
            }
        }

        state.by_id.insert(id.clone(), name.clone());
        state.by_name.insert(name.clone(), id);
        state.write_order.push_back(name.clone());

        if refreshed {
            debug!(pod = %name, "Pod binding refreshed");
        } else {
            info!(pod = %name, "Pod binding registered");
        }
    }

    /// Remove the binding for `name`, if present.
    ///
    /// Removing an absent name is a no-op, not an error.
    pub fn remove(&self, name: &PodName) -> Option<PodId> {
        let removed = self.write().unbind(name);
        if removed.is_some() {
            info!(pod = %name, "Pod binding removed");
        }
        removed
    }

    /// Look up the runtime identity bound to `name`.
    ///
    /// A pure read; does not affect the eviction order.
    pub fn get_by_name(&self, name: &PodName) -> Option<PodId> {
        self.read().by_name.get(name).cloned()
    }

    /// Reverse lookup: the pod name bound to `id`. O(1) via the reverse
    /// map; does not affect the eviction order.
    pub fn get_by_id(&self, id: &PodId) -> Option<PodName> {
        self.read().by_id.get(id).cloned()
    }

    /// Current number of bindings.
    pub fn len(&self) -> usize {
        self.read().by_name.len()
    }

    /// True if no bindings are held.
    pub fn is_empty(&self) -> bool {
        self.read().by_name.is_empty()
    }

    /// Copy out all current bindings.
    ///
    /// The returned map is independent of the registry; mutating it never
    /// affects internal state.
    pub fn snapshot(&self) -> HashMap<PodName, PodId> {
        self.read().by_name.clone()
    }

    // No operation panics while holding the lock, so a poisoned lock can
    // only come from a caller-induced panic between operations; the state
    // is consistent either way and the guard is safe to recover.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
