//! UI module for handling user interactions and UI updates.
//!
//! Threading model:
//! - `slint::spawn_local`: async UI work that must stay on the main thread (file dialog)
//! - `rayon::spawn`: blocking or CPU-heavy work (reading files, decoding thumbnails)
//! - `slint::invoke_from_event_loop`: hands worker results back to the UI thread

pub mod gallery_view;
pub mod handlers;
mod state_helpers;

pub use gallery_view::refresh_gallery;
pub use handlers::{finish_import, setup_handlers};
pub use state_helpers::*;
