//! Application configuration constants.

/// Extension to declared media type, for files offered by the picker, dropped
/// on the window or passed on the command line.
pub const MEDIA_TYPES_BY_EXTENSION: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
];

/// Layout breakpoints in logical pixels: below the first, `COLUMNS_NARROW`;
/// below the second, `COLUMNS_MEDIUM`; otherwise `COLUMNS_WIDE`.
pub const BREAKPOINT_MEDIUM_PX: f32 = 640.0;
pub const BREAKPOINT_WIDE_PX: f32 = 1024.0;
pub const COLUMNS_NARROW: usize = 2;
pub const COLUMNS_MEDIUM: usize = 3;
pub const COLUMNS_WIDE: usize = 4;

/// Longest edge of a decoded thumbnail.
pub const THUMBNAIL_MAX_EDGE: u32 = 640;

/// Number of decoded thumbnails kept in memory.
pub const THUMBNAIL_CACHE_CAPACITY: usize = 128;

/// Width / height used for video tiles.
pub const VIDEO_TILE_ASPECT: f32 = 16.0 / 9.0;

/// Delay used to fold decode completions into one re-render.
pub const REFRESH_COALESCE_MS: u64 = 30;
