//! Media classification.

/// How a gallery item is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies a declared media type.
    ///
    /// Only `video/*` types are videos. Everything else, including unknown and
    /// empty types, falls back to `Image`; this is not a validation step.
    pub fn from_media_type(media_type: &str) -> Self {
        let top_level = media_type
            .trim()
            .split('/')
            .next()
            .unwrap_or_default();

        if top_level.eq_ignore_ascii_case("video") && media_type.contains('/') {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}
