//! Gallery rendering.
//!
//! Builds the column models from the gallery's active list. Image thumbnails
//! are decoded with `rayon::spawn` and handed back with
//! `slint::invoke_from_event_loop`; a result for a reference revoked in the
//! meantime is dropped without being shown. Completions are folded into one
//! re-render per [`REFRESH_COALESCE_MS`] window.

use crate::config::{REFRESH_COALESCE_MS, VIDEO_TILE_ASPECT};
use crate::image_loader::{self, Thumbnail};
use crate::layout;
use crate::media::MediaKind;
use crate::state::{AppState, RefId};
use crate::ui::state_helpers;
use crate::{GalleryColumn, Tile, TileKind};
use log::{debug, warn};
use slint::{ComponentHandle, ModelRc, VecModel};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Work item for a thumbnail that is not cached yet.
struct DecodeRequest {
    id: RefId,
    bytes: Arc<[u8]>,
}

fn placeholder_tile(id: RefId, kind: TileKind, name: &str, aspect: f32) -> Tile {
    Tile {
        ref_id: id.to_string().into(),
        kind,
        name: name.into(),
        image: slint::Image::default(),
        loaded: false,
        aspect,
    }
}

fn thumbnail_tile(id: RefId, name: &str, thumbnail: &Thumbnail) -> Tile {
    Tile {
        ref_id: id.to_string().into(),
        kind: TileKind::Image,
        name: name.into(),
        image: image_loader::create_slint_image(thumbnail),
        loaded: true,
        aspect: image_loader::aspect_ratio(thumbnail),
    }
}

/// Snapshot of the active list as tiles, plus the thumbnails still missing.
fn collect_tiles(state: &AppState) -> (Vec<Tile>, Vec<DecodeRequest>) {
    let (Ok(gallery), Ok(mut cache)) = (state.gallery.lock(), state.image_cache.lock()) else {
        warn!("Gallery state unavailable, skipping render");
        return (Vec::new(), Vec::new());
    };

    let image_count = gallery
        .items()
        .iter()
        .filter(|item| item.kind() == MediaKind::Image)
        .count();
    cache.ensure_capacity(image_count);

    let mut tiles = Vec::with_capacity(gallery.len());
    let mut requests = Vec::new();

    for item in gallery.items() {
        let id = item.id();
        let tile = match item.kind() {
            MediaKind::Video => placeholder_tile(id, TileKind::Video, item.name(), VIDEO_TILE_ASPECT),
            MediaKind::Image => match cache.get(id) {
                Some(thumbnail) => thumbnail_tile(id, item.name(), &thumbnail),
                None => {
                    if cache.begin_decode(id) {
                        match item.display_ref().resolve() {
                            Some(bytes) => {
                                debug!("Decoding {} ({} bytes)", id, item.byte_len());
                                requests.push(DecodeRequest { id, bytes });
                            }
                            None => cache.abandon_decode(id),
                        }
                    }
                    placeholder_tile(id, TileKind::Image, item.name(), 1.0)
                }
            },
        };
        tiles.push(tile);
    }

    (tiles, requests)
}

fn build_columns(tiles: Vec<Tile>, column_count: usize) -> Vec<GalleryColumn> {
    let heights: Vec<f32> = tiles
        .iter()
        .map(|tile| 1.0 / tile.aspect.max(0.1))
        .collect();

    layout::partition_columns(&heights, column_count)
        .into_iter()
        .map(|range| GalleryColumn {
            tiles: ModelRc::new(VecModel::from(tiles[range].to_vec())),
        })
        .collect()
}

/// Re-renders the gallery from the current state.
pub fn refresh_gallery(ui: &crate::AppWindow, state: &AppState) {
    let width = state.viewport_width.lock().map(|w| *w).unwrap_or_default();
    let (tiles, requests) = collect_tiles(state);
    let item_count = tiles.len();

    let columns = build_columns(tiles, layout::column_count(width));
    state_helpers::set_gallery_view(ui, columns, item_count);

    for request in requests {
        decode_in_background(ui.as_weak(), state.clone(), request);
    }
}

/// Marks a re-render as queued. Returns false when one is already queued.
fn claim_refresh(queued: &AtomicBool) -> bool {
    !queued.swap(true, Ordering::AcqRel)
}

/// Queues one re-render on the event loop; further requests before it runs
/// are folded into it. Must be called on the event-loop thread.
pub fn request_refresh(ui: slint::Weak<crate::AppWindow>, state: AppState) {
    if !claim_refresh(&state.refresh_queued) {
        return;
    }

    slint::Timer::single_shot(Duration::from_millis(REFRESH_COALESCE_MS), move || {
        state.refresh_queued.store(false, Ordering::Release);
        if let Some(ui) = ui.upgrade() {
            refresh_gallery(&ui, &state);
        }
    });
}

fn decode_in_background(ui: slint::Weak<crate::AppWindow>, state: AppState, request: DecodeRequest) {
    rayon::spawn(move || {
        let DecodeRequest { id, bytes } = request;
        let result = image_loader::decode_thumbnail_blocking(&bytes);
        drop(bytes);

        let _ = slint::invoke_from_event_loop(move || {
            let live = state
                .gallery
                .lock()
                .map(|gallery| gallery.registry().is_live(id))
                .unwrap_or(false);

            if let Ok(mut cache) = state.image_cache.lock() {
                match result {
                    Ok(_) if !live => {
                        debug!("Discarding thumbnail for revoked {}", id);
                        cache.abandon_decode(id);
                        return;
                    }
                    Ok(thumbnail) => cache.put(id, thumbnail),
                    Err(e) => {
                        warn!("Failed to decode {}: {}", id, e);
                        cache.mark_failed(id);
                        return;
                    }
                }
            }

            request_refresh(ui, state);
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_utils::SelectedFile;
    use crate::image_cache::ImageCache;
    use slint::{Model, Rgb8Pixel, SharedPixelBuffer};
    use std::sync::Mutex;

    fn tile(aspect: f32) -> Tile {
        Tile {
            aspect,
            ..Tile::default()
        }
    }

    fn ingest_images(state: &AppState, count: usize) {
        let files = (0..count)
            .map(|i| {
                SelectedFile::new(format!("{i}.png"), "image/png", Arc::from(&b"png"[..]))
            })
            .collect();
        state.gallery.lock().unwrap().ingest(files);
    }

    fn store_decoded(state: &AppState, requests: &[DecodeRequest]) {
        let mut cache = state.image_cache.lock().unwrap();
        for request in requests {
            cache.put(request.id, SharedPixelBuffer::<Rgb8Pixel>::new(2, 1));
        }
    }

    #[test]
    fn test_decodes_settle_when_gallery_outgrows_cache() {
        let state = AppState {
            image_cache: Arc::new(Mutex::new(ImageCache::new(2))),
            ..AppState::new()
        };
        ingest_images(&state, 3);

        let scheduled: Vec<usize> = (0..5)
            .map(|_| {
                let (tiles, requests) = collect_tiles(&state);
                assert_eq!(tiles.len(), 3);
                store_decoded(&state, &requests);
                requests.len()
            })
            .collect();

        assert_eq!(scheduled, [3, 0, 0, 0, 0]);
        let (tiles, _) = collect_tiles(&state);
        assert!(tiles.iter().all(|tile| tile.loaded));
    }

    #[test]
    fn test_videos_are_never_decoded() {
        let state = AppState::new();
        state.gallery.lock().unwrap().ingest(vec![SelectedFile::new(
            "clip.mp4",
            "video/mp4",
            Arc::from(&b"mp4"[..]),
        )]);

        let (tiles, requests) = collect_tiles(&state);

        assert!(requests.is_empty());
        assert_eq!(tiles[0].kind, TileKind::Video);
    }

    #[test]
    fn test_refresh_is_claimed_once_until_it_runs() {
        let queued = AtomicBool::new(false);

        assert!(claim_refresh(&queued));
        assert!(!claim_refresh(&queued));

        queued.store(false, Ordering::Release);
        assert!(claim_refresh(&queued));
    }

    #[test]
    fn test_build_columns_keeps_order() {
        let tiles: Vec<Tile> = (0..5)
            .map(|i| Tile {
                name: i.to_string().into(),
                ..tile(1.0)
            })
            .collect();

        let columns = build_columns(tiles, 2);

        assert_eq!(columns.len(), 2);
        let names: Vec<String> = columns
            .iter()
            .flat_map(|column| {
                (0..column.tiles.row_count())
                    .filter_map(|row| column.tiles.row_data(row))
                    .map(|tile| tile.name.to_string())
                    .collect::<Vec<_>>()
            })
            .collect();
        assert_eq!(names, ["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_build_columns_pads_empty_columns() {
        let columns = build_columns(vec![tile(1.0)], 4);

        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].tiles.row_count(), 1);
        assert!(columns[1..].iter().all(|column| column.tiles.row_count() == 0));
    }
}
