//! In-memory display references.
//!
//! A [`RefRegistry`] binds the bytes of a selected file to a process-local id
//! that the renderer can resolve without touching the filesystem again. The
//! binding is owned by a [`DisplayRef`]; dropping it revokes the id, so any
//! code path that removes a reference from its owner also invalidates it.

use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Process-local identifier of a display reference.
///
/// Ids are never reused while the registry lives, but nothing resolves a
/// revoked id, so callers must not rely on uniqueness after invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(u64);

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mem://{:08x}", self.0)
    }
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    live: HashMap<RefId, Arc<[u8]>>,
    revoked_total: u64,
}

/// Shared registry of live display references.
#[derive(Clone, Default)]
pub struct RefRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl RefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still guards consistent data: every critical section
    // below is a single map operation.
    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Binds `bytes` to a fresh id and returns the owning handle.
    pub fn acquire(&self, bytes: Arc<[u8]>) -> DisplayRef {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = RefId(inner.next_id);
        inner.live.insert(id, bytes);
        debug!("Acquired {} ({} live)", id, inner.live.len());

        DisplayRef {
            id,
            registry: self.clone(),
        }
    }

    /// Returns the bytes behind a live reference, `None` once it is revoked.
    pub fn resolve(&self, id: RefId) -> Option<Arc<[u8]>> {
        self.lock().live.get(&id).cloned()
    }

    pub fn is_live(&self, id: RefId) -> bool {
        self.lock().live.contains_key(&id)
    }

    /// Number of references currently bound.
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    /// Number of successful revocations since the registry was created.
    pub fn revoked_total(&self) -> u64 {
        self.lock().revoked_total
    }

    fn revoke(&self, id: RefId) {
        let mut inner = self.lock();
        if inner.live.remove(&id).is_some() {
            inner.revoked_total += 1;
            debug!("Revoked {} ({} live)", id, inner.live.len());
        } else {
            warn!("Revoke requested for unknown reference {}", id);
        }
    }
}

/// Owning handle of one display reference.
///
/// Not `Clone`: exactly one owner exists, and the reference is revoked when
/// that owner drops it.
pub struct DisplayRef {
    id: RefId,
    registry: RefRegistry,
}

impl DisplayRef {
    pub fn id(&self) -> RefId {
        self.id
    }

    /// Resolves this reference through its registry.
    pub fn resolve(&self) -> Option<Arc<[u8]>> {
        self.registry.resolve(self.id)
    }
}

impl fmt::Debug for DisplayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DisplayRef").field(&self.id).finish()
    }
}

impl Drop for DisplayRef {
    fn drop(&mut self) {
        self.registry.revoke(self.id);
    }
}
