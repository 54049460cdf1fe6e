//! Service for importing selected files into the gallery.
//!
//! Reading files is blocking I/O, so it runs on a rayon worker; the ingest
//! itself is posted back to the event loop, which is the only thread that
//! mutates the gallery.

use crate::file_utils::{self, SelectedFile};
use crate::state::AppState;
use log::{debug, warn};
use std::path::PathBuf;

/// Outcome of one import, reported on the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Items added to the gallery.
    pub added: usize,
    /// Paths that could not be read.
    pub skipped: usize,
}

/// Service for turning path selections into gallery items.
#[derive(Clone)]
pub struct ImportService {
    state: AppState,
}

impl ImportService {
    /// Creates a new import service.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Ingests already loaded files. Must run on the event-loop thread.
    pub fn ingest_loaded(&self, files: Vec<SelectedFile>) -> usize {
        match self.state.gallery.lock() {
            Ok(mut gallery) => gallery.ingest(files),
            Err(e) => {
                warn!("Gallery unavailable, dropping selection: {}", e);
                0
            }
        }
    }

    /// Reads `paths` in the background, then ingests them as one batch and
    /// calls `on_done` on the event loop. An empty selection does nothing.
    pub fn import<F>(&self, paths: Vec<PathBuf>, on_done: F)
    where
        F: FnOnce(ImportSummary) + Send + 'static,
    {
        if paths.is_empty() {
            debug!("Empty selection ignored");
            return;
        }

        let service = self.clone();
        rayon::spawn(move || {
            let files = file_utils::read_selection(&paths);
            let skipped = paths.len() - files.len();

            let _ = slint::invoke_from_event_loop(move || {
                let added = service.ingest_loaded(files);
                on_done(ImportSummary { added, skipped });
            });
        });
    }
}
