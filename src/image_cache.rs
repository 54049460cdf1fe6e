//! Thumbnail cache for fast re-layout.
//!
//! Caches decoded thumbnails per display reference using an LRU policy, so a
//! window resize redistributes tiles without decoding again. The capacity
//! grows to cover every image in the gallery, so a live tile is never evicted
//! and never decoded twice. Entries for revoked references are dropped on
//! clear and never looked up afterwards.

use crate::image_loader::Thumbnail;
use crate::state::RefId;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// LRU cache for storing decoded thumbnails.
///
/// Also tracks decodes in flight and references whose bytes could not be
/// decoded, so a re-render never schedules the same work twice.
pub struct ImageCache {
    cache: LruCache<RefId, Thumbnail>,
    base_capacity: NonZeroUsize,
    pending: HashSet<RefId>,
    failed: HashSet<RefId>,
}

impl ImageCache {
    /// Creates a new cache with the specified capacity (at least one entry).
    pub fn new(capacity: usize) -> Self {
        let base_capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(base_capacity),
            base_capacity,
            pending: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Retrieves a thumbnail if it is cached.
    pub fn get(&mut self, id: RefId) -> Option<Thumbnail> {
        let result = self.cache.get(&id).cloned();
        if result.is_none() {
            log::trace!("Thumbnail cache MISS: {}", id);
        }
        result
    }

    /// Grows the capacity so `images` thumbnails fit without eviction.
    pub fn ensure_capacity(&mut self, images: usize) {
        if images > self.capacity() {
            if let Some(capacity) = NonZeroUsize::new(images) {
                log::debug!("Thumbnail cache capacity -> {}", capacity);
                self.cache.resize(capacity);
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    /// Claims the decode of `id`. Returns false when it is cached, already
    /// being decoded, or known to fail.
    pub fn begin_decode(&mut self, id: RefId) -> bool {
        if self.cache.contains(&id) || self.failed.contains(&id) {
            return false;
        }
        self.pending.insert(id)
    }

    /// Records a decode failure; the tile keeps its placeholder.
    pub fn mark_failed(&mut self, id: RefId) {
        self.pending.remove(&id);
        self.failed.insert(id);
    }

    /// Releases a claim without storing anything.
    pub fn abandon_decode(&mut self, id: RefId) {
        self.pending.remove(&id);
    }

    /// Stores a thumbnail.
    pub fn put(&mut self, id: RefId, thumbnail: Thumbnail) {
        self.pending.remove(&id);
        log::debug!(
            "Thumbnail cache PUT: {} ({}x{})",
            id,
            thumbnail.width(),
            thumbnail.height()
        );
        self.cache.put(id, thumbnail);
    }

    pub fn contains(&self, id: RefId) -> bool {
        self.cache.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached thumbnail, forgets pending and failed decodes and
    /// returns to the configured capacity.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.cache.resize(self.base_capacity);
        self.pending.clear();
        self.failed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RefRegistry;
    use slint::{Rgb8Pixel, SharedPixelBuffer};
    use std::sync::Arc;

    fn thumbnail(width: u32, height: u32) -> Thumbnail {
        SharedPixelBuffer::<Rgb8Pixel>::new(width, height)
    }

    #[test]
    fn test_put_and_get() {
        let registry = RefRegistry::new();
        let display_ref = registry.acquire(Arc::from(&b"x"[..]));
        let mut cache = ImageCache::new(4);

        assert!(cache.get(display_ref.id()).is_none());
        cache.put(display_ref.id(), thumbnail(3, 2));

        let cached = cache.get(display_ref.id()).unwrap();
        assert_eq!((cached.width(), cached.height()), (3, 2));
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let registry = RefRegistry::new();
        let refs: Vec<_> = (0..3).map(|_| registry.acquire(Arc::from(&b"x"[..]))).collect();
        let mut cache = ImageCache::new(2);

        cache.put(refs[0].id(), thumbnail(1, 1));
        cache.put(refs[1].id(), thumbnail(1, 1));
        cache.get(refs[0].id());
        cache.put(refs[2].id(), thumbnail(1, 1));

        assert!(cache.contains(refs[0].id()));
        assert!(!cache.contains(refs[1].id()));
        assert!(cache.contains(refs[2].id()));
    }

    #[test]
    fn test_ensure_capacity_keeps_every_thumbnail() {
        let registry = RefRegistry::new();
        let refs: Vec<_> = (0..3).map(|_| registry.acquire(Arc::from(&b"x"[..]))).collect();
        let mut cache = ImageCache::new(2);

        cache.ensure_capacity(refs.len());
        for display_ref in &refs {
            cache.put(display_ref.id(), thumbnail(1, 1));
        }

        assert!(refs.iter().all(|display_ref| cache.contains(display_ref.id())));
        assert!(refs.iter().all(|display_ref| !cache.begin_decode(display_ref.id())));
    }

    #[test]
    fn test_ensure_capacity_never_shrinks_and_clear_resets() {
        let mut cache = ImageCache::new(4);

        cache.ensure_capacity(2);
        assert_eq!(cache.capacity(), 4);

        cache.ensure_capacity(10);
        assert_eq!(cache.capacity(), 10);

        cache.clear();
        assert_eq!(cache.capacity(), 4);
    }

    #[test]
    fn test_decode_is_claimed_once() {
        let registry = RefRegistry::new();
        let display_ref = registry.acquire(Arc::from(&b"x"[..]));
        let id = display_ref.id();
        let mut cache = ImageCache::new(2);

        assert!(cache.begin_decode(id));
        assert!(!cache.begin_decode(id));

        cache.put(id, thumbnail(1, 1));
        assert!(!cache.begin_decode(id));
    }

    #[test]
    fn test_failed_decode_is_not_retried() {
        let registry = RefRegistry::new();
        let display_ref = registry.acquire(Arc::from(&b"x"[..]));
        let id = display_ref.id();
        let mut cache = ImageCache::new(2);

        assert!(cache.begin_decode(id));
        cache.mark_failed(id);

        assert!(!cache.begin_decode(id));
    }

    #[test]
    fn test_abandoned_decode_can_be_claimed_again() {
        let registry = RefRegistry::new();
        let display_ref = registry.acquire(Arc::from(&b"x"[..]));
        let id = display_ref.id();
        let mut cache = ImageCache::new(2);

        assert!(cache.begin_decode(id));
        cache.abandon_decode(id);

        assert!(cache.begin_decode(id));
    }

    #[test]
    fn test_clear_empties_cache() {
        let registry = RefRegistry::new();
        let display_ref = registry.acquire(Arc::from(&b"x"[..]));
        let mut cache = ImageCache::new(2);
        cache.put(display_ref.id(), thumbnail(1, 1));

        cache.clear();

        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let registry = RefRegistry::new();
        let display_ref = registry.acquire(Arc::from(&b"x"[..]));
        let mut cache = ImageCache::new(0);
        cache.put(display_ref.id(), thumbnail(1, 1));

        assert_eq!(cache.len(), 1);
    }
}
