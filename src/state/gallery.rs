//! Gallery controller: the ordered list of active previews.

use crate::file_utils::SelectedFile;
use crate::media::MediaKind;
use crate::state::display_ref::{DisplayRef, RefId, RefRegistry};
use log::{debug, info, warn};

/// One preview in the gallery. Immutable once created.
#[derive(Debug)]
pub struct MediaItem {
    display_ref: DisplayRef,
    kind: MediaKind,
    name: String,
    byte_len: usize,
}

impl MediaItem {
    pub fn id(&self) -> RefId {
        self.display_ref.id()
    }

    pub fn display_ref(&self) -> &DisplayRef {
        &self.display_ref
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

/// Owns the active list, newest batch first.
///
/// Every [`MediaItem`] owns its [`DisplayRef`], so removing an item from the
/// list (clear, teardown, or dropping the gallery) revokes its reference
/// exactly once.
pub struct Gallery {
    registry: RefRegistry,
    items: Vec<MediaItem>,
    torn_down: bool,
}

impl Gallery {
    pub fn new(registry: RefRegistry) -> Self {
        Self {
            registry,
            items: Vec::new(),
            torn_down: false,
        }
    }

    /// Prepends one item per selected file, keeping the batch's own order.
    ///
    /// Returns the number of items added. An empty selection leaves the
    /// gallery untouched.
    pub fn ingest(&mut self, selection: Vec<SelectedFile>) -> usize {
        if selection.is_empty() {
            return 0;
        }
        if self.torn_down {
            warn!(
                "Ignoring selection of {} file(s) after teardown",
                selection.len()
            );
            return 0;
        }

        let added = selection.len();
        let mut batch: Vec<MediaItem> = selection
            .into_iter()
            .map(|file| {
                let kind = MediaKind::from_media_type(&file.media_type);
                let byte_len = file.len();
                let display_ref = self.registry.acquire(file.bytes);
                debug!("{} -> {} ({:?})", file.name, display_ref.id(), kind);

                MediaItem {
                    display_ref,
                    kind,
                    name: file.name,
                    byte_len,
                }
            })
            .collect();

        batch.append(&mut self.items);
        self.items = batch;
        info!("Ingested {} file(s), {} in gallery", added, self.items.len());
        added
    }

    /// Releases every active reference and empties the list.
    ///
    /// Returns the number of items released.
    pub fn clear(&mut self) -> usize {
        let released = self.items.len();
        if released == 0 {
            return 0;
        }

        self.items.clear();
        info!(
            "Cleared {} item(s), {} reference(s) still live",
            released,
            self.registry.live_count()
        );
        released
    }

    /// Final release of the gallery. Runs once; later calls do nothing and
    /// later selections are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let released = self.items.len();
        self.items.clear();
        info!(
            "Gallery torn down: released {} item(s), {} revoked in total",
            released,
            self.registry.revoked_total()
        );
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn registry(&self) -> &RefRegistry {
        &self.registry
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.teardown();
    }
}
