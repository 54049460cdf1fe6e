//! Helper functions to set multiple GalleryState properties in a grouped manner.

use log::error;
use slint::ComponentHandle;

/// Sets the column models and the item counter at once.
pub fn set_gallery_view(
    ui: &crate::AppWindow,
    columns: Vec<crate::GalleryColumn>,
    item_count: usize,
) {
    let gallery_state = ui.global::<crate::GalleryState>();
    gallery_state.set_columns(slint::ModelRc::new(slint::VecModel::from(columns)));
    gallery_state.set_item_count(i32::try_from(item_count).unwrap_or(i32::MAX));
}

/// Sets an error message in the UI with a prefix.
///
/// Logs the error and updates the GalleryState error-message property.
pub fn set_error_with_prefix(ui: &crate::AppWindow, prefix: &str, error: String) {
    let error_message = format!("{}: {}", prefix, error);
    error!("{}", error_message);
    ui.global::<crate::GalleryState>()
        .set_error_message(error_message.into());
}

/// Clears the error message.
pub fn clear_error(ui: &crate::AppWindow) {
    ui.global::<crate::GalleryState>()
        .set_error_message("".into());
}
