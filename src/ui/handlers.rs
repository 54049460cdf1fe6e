//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (pick_files, clear_gallery, viewport_resized)
//! using the appropriate threading model for each operation type.

use crate::file_utils;
use crate::layout;
use crate::services::{ImportService, ImportSummary};
use crate::state::AppState;
use crate::ui::gallery_view::refresh_gallery;
use crate::ui::state_helpers;
use log::{debug, info};
use rfd::AsyncFileDialog;
use slint::ComponentHandle;

/// Refreshes the gallery after an import and reports unreadable files.
pub fn finish_import(ui: slint::Weak<crate::AppWindow>, state: AppState) -> impl FnOnce(ImportSummary) + Send + 'static {
    move |summary| {
        let Some(ui) = ui.upgrade() else {
            return;
        };

        if summary.skipped > 0 {
            state_helpers::set_error_with_prefix(
                &ui,
                "Some files could not be read",
                format!("{} skipped", summary.skipped),
            );
        } else {
            state_helpers::clear_error(&ui);
        }

        if summary.added > 0 {
            refresh_gallery(&ui, &state);
        }
    }
}

/// Sets up all UI event handlers for the application.
///
/// Takes the UI handle and shared application state, then registers
/// callbacks for file picking, clearing, and viewport changes.
pub fn setup_handlers(ui: &crate::AppWindow, state: AppState) {
    // File picking handler
    // Uses slint::spawn_local because AsyncFileDialog must run on the main thread
    ui.global::<crate::Logic>().on_pick_files({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            let ui_handle = ui_handle.clone();
            let state = state.clone();
            let _ = slint::spawn_local(async move {
                // A fresh dialog per pick, so the same files can be chosen again.
                let extensions = file_utils::supported_extensions();
                let Some(handles) = AsyncFileDialog::new()
                    .add_filter("Images and videos", &extensions[..])
                    .pick_files()
                    .await
                else {
                    debug!("File dialog dismissed");
                    return;
                };

                let paths = handles
                    .iter()
                    .map(|handle| handle.path().to_path_buf())
                    .collect();

                ImportService::new(state.clone()).import(paths, finish_import(ui_handle, state));
            });
        }
    });

    // Clear handler
    ui.global::<crate::Logic>().on_clear_gallery({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            let released = state
                .gallery
                .lock()
                .map(|mut gallery| gallery.clear())
                .unwrap_or_default();
            if released == 0 {
                return;
            }

            if let Ok(mut cache) = state.image_cache.lock() {
                cache.clear();
            }
            info!("Cleared {} preview(s)", released);

            if let Some(ui) = ui_handle.upgrade() {
                state_helpers::clear_error(&ui);
                refresh_gallery(&ui, &state);
            }
        }
    });

    // Viewport width handler; only a change of column count needs a re-render
    ui.global::<crate::Logic>().on_viewport_resized({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |width| {
            let previous = match state.viewport_width.lock() {
                Ok(mut current) => std::mem::replace(&mut *current, width),
                Err(_) => return,
            };

            if layout::column_count(previous) != layout::column_count(width) {
                debug!(
                    "Viewport {}px -> {}px, {} columns",
                    previous,
                    width,
                    layout::column_count(width)
                );
                if let Some(ui) = ui_handle.upgrade() {
                    refresh_gallery(&ui, &state);
                }
            }
        }
    });
}
