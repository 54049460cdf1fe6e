use slint::ComponentHandle;
use std::path::PathBuf;

use crate::services::ImportService;
use crate::state::AppState;
use crate::ui::finish_import;

fn import_paths(ui: slint::Weak<crate::AppWindow>, state: &AppState, paths: Vec<PathBuf>) {
    ImportService::new(state.clone()).import(paths, finish_import(ui, state.clone()));
}

fn startup_media_from_args() -> Vec<PathBuf> {
    std::env::args_os()
        .skip(1)
        .filter_map(|arg| {
            let arg_str = arg.to_string_lossy();
            if arg_str.starts_with('-') {
                None
            } else {
                Some(PathBuf::from(arg))
            }
        })
        .filter(|path| {
            let supported = crate::file_utils::is_supported_media(path);
            if !supported {
                log::warn!("Ignoring unsupported argument: {}", path.display());
            }
            supported
        })
        .collect()
}

fn setup_drop_hook(app: &crate::AppWindow, app_state: &AppState) {
    use i_slint_backend_winit::WinitWindowAccessor;
    use i_slint_backend_winit::{winit::event::WindowEvent, EventResult};

    let ui_handle = app.as_weak();
    let state = app_state.clone();

    app.window().on_winit_window_event(move |_window, event| {
        if let WindowEvent::DroppedFile(path) = event {
            if crate::file_utils::is_supported_media(path) {
                import_paths(ui_handle.clone(), &state, vec![path.clone()]);
            } else {
                log::debug!("Ignoring dropped file: {}", path.display());
            }
        }

        EventResult::Propagate
    });
}

/// Ingests media passed on the command line and accepts files dropped on
/// the window.
pub fn configure_startup_opening(app: &crate::AppWindow, app_state: &AppState) {
    setup_drop_hook(app, app_state);

    let paths = startup_media_from_args();
    if !paths.is_empty() {
        log::info!("Opening {} file(s) from the command line", paths.len());
        import_paths(app.as_weak(), app_state, paths);
    }
}
