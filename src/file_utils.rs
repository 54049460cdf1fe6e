//! Turning picked, dropped or command-line paths into in-memory selections.

use crate::config::MEDIA_TYPES_BY_EXTENSION;
use crate::error::Result;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One file from a selection, fully loaded into memory.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    /// Declared media type; empty when it could not be determined.
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn media_type_for_extension(ext: &str) -> Option<&'static str> {
    MEDIA_TYPES_BY_EXTENSION
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, media_type)| *media_type)
}

/// Extensions offered by the file dialog filter.
pub fn supported_extensions() -> Vec<&'static str> {
    MEDIA_TYPES_BY_EXTENSION.iter().map(|(ext, _)| *ext).collect()
}

/// Returns true for files whose extension is in the media table.
pub fn is_supported_media(path: &Path) -> bool {
    path.is_file()
        && lowercase_extension(path)
            .map(|ext| media_type_for_extension(&ext).is_some())
            .unwrap_or(false)
}

/// Declared media type of a file: the extension table first, then content
/// sniffing, then the empty string.
pub fn detect_media_type(path: &Path, bytes: &[u8]) -> String {
    if let Some(media_type) = lowercase_extension(path)
        .as_deref()
        .and_then(media_type_for_extension)
    {
        return media_type.to_string();
    }

    infer::get(bytes)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_default()
}

/// Reads one path into a [`SelectedFile`].
pub fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let bytes = fs::read(path)?;
    let media_type = detect_media_type(path, &bytes);
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(
        "Read {} ({} bytes, type {:?})",
        path.display(),
        bytes.len(),
        media_type
    );

    Ok(SelectedFile::new(name, media_type, Arc::from(bytes)))
}

/// Reads every path in order, skipping the ones that cannot be read.
pub fn read_selection(paths: &[PathBuf]) -> Vec<SelectedFile> {
    paths
        .iter()
        .filter_map(|path| match read_selected_file(path) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_detect_media_type_from_extension() {
        assert_eq!(detect_media_type(Path::new("a.PNG"), b""), "image/png");
        assert_eq!(detect_media_type(Path::new("clip.mp4"), b""), "video/mp4");
        assert_eq!(detect_media_type(Path::new("clip.webm"), b""), "video/webm");
    }

    #[test]
    fn test_detect_media_type_sniffs_unknown_extension() {
        assert_eq!(
            detect_media_type(Path::new("download.bin"), PNG_SIGNATURE),
            "image/png"
        );
    }

    #[test]
    fn test_detect_media_type_unknown_is_empty() {
        assert_eq!(detect_media_type(Path::new("notes"), b"plain text"), "");
    }

    #[test]
    fn test_read_selection_preserves_order_and_skips_missing() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.png", PNG_SIGNATURE);
        let b = write_file(&dir, "b.mp4", b"not really a video");
        let missing = dir.path().join("missing.png");

        let files = read_selection(&[a, missing, b]);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "a.png");
        assert_eq!(files[0].media_type, "image/png");
        assert_eq!(files[0].len(), PNG_SIGNATURE.len());
        assert_eq!(files[1].name, "b.mp4");
        assert_eq!(files[1].media_type, "video/mp4");
    }

    #[test]
    fn test_is_supported_media() {
        let dir = TempDir::new().unwrap();
        let image = write_file(&dir, "photo.JPG", b"x");
        let text = write_file(&dir, "notes.txt", b"x");

        assert!(is_supported_media(&image));
        assert!(!is_supported_media(&text));
        assert!(!is_supported_media(&dir.path().join("absent.png")));
    }

    #[test]
    fn test_supported_extensions_cover_images_and_videos() {
        let extensions = supported_extensions();
        assert!(extensions.contains(&"png"));
        assert!(extensions.contains(&"mp4"));
    }
}
