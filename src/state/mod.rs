//! State management for the media preview application.

use crate::config::THUMBNAIL_CACHE_CAPACITY;
use crate::image_cache::ImageCache;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

pub mod display_ref;
pub mod gallery;

pub use display_ref::{RefId, RefRegistry};
pub use gallery::Gallery;

/// Application-wide state container.
///
/// Only the event-loop thread mutates these; the mutexes exist so worker
/// completions posted with `slint::invoke_from_event_loop` can carry clones.
#[derive(Clone)]
pub struct AppState {
    pub gallery: Arc<Mutex<Gallery>>,
    /// Decoded thumbnails keyed by display reference.
    pub image_cache: Arc<Mutex<ImageCache>>,
    /// Last known width of the gallery viewport, in logical pixels.
    pub viewport_width: Arc<Mutex<f32>>,
    /// Set while a coalesced re-render is queued on the event loop.
    pub refresh_queued: Arc<AtomicBool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            gallery: Arc::new(Mutex::new(Gallery::new(RefRegistry::new()))),
            image_cache: Arc::new(Mutex::new(ImageCache::new(THUMBNAIL_CACHE_CAPACITY))),
            viewport_width: Arc::new(Mutex::new(0.0)),
            refresh_queued: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Final release of every preview. Called once after the event loop exits.
    pub fn teardown(&self) {
        if let Ok(mut cache) = self.image_cache.lock() {
            cache.clear();
        }
        if let Ok(mut gallery) = self.gallery.lock() {
            if !gallery.is_torn_down() {
                gallery.teardown();
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
