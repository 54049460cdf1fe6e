//! Thumbnail decoding for image previews.
//!
//! Runs on rayon workers. The resulting pixel buffer is `Send`, so it can be
//! handed to the event loop and turned into a `slint::Image` there.

use crate::config::THUMBNAIL_MAX_EDGE;
use crate::error::{AppError, Result};
use image::ImageReader;
use slint::{Image, Rgb8Pixel, SharedPixelBuffer};
use std::io::Cursor;

pub type Thumbnail = SharedPixelBuffer<Rgb8Pixel>;

/// Decodes in-memory image bytes, downscaling so the longest edge is at most
/// [`THUMBNAIL_MAX_EDGE`]. Smaller images keep their size.
pub fn decode_thumbnail_blocking(bytes: &[u8]) -> Result<Thumbnail> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AppError::Decode(e.to_string()))?
        .decode()?;

    let image = if image.width() > THUMBNAIL_MAX_EDGE || image.height() > THUMBNAIL_MAX_EDGE {
        image.thumbnail(THUMBNAIL_MAX_EDGE, THUMBNAIL_MAX_EDGE)
    } else {
        image
    };

    let rgb = image.to_rgb8();
    Ok(SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
    ))
}

/// Wraps a decoded thumbnail for display. Shares the pixel storage.
pub fn create_slint_image(thumbnail: &Thumbnail) -> Image {
    Image::from_rgb8(thumbnail.clone())
}

/// Width / height of a decoded thumbnail.
pub fn aspect_ratio(thumbnail: &Thumbnail) -> f32 {
    if thumbnail.height() == 0 {
        return 1.0;
    }
    thumbnail.width() as f32 / thumbnail.height() as f32
}
