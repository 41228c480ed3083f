//! Logo resizing.
//!
//! Provides square resize operations using Lanczos3 filtering.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Resize an image to a `side` x `side` square, ignoring its aspect ratio.
///
/// Uses Lanczos3 filtering for high-quality resampling.
/// Returns the original image unchanged if it already has the target size.
pub fn resize_square(img: &DynamicImage, side: u32) -> DynamicImage {
    let (orig_w, orig_h) = (img.width(), img.height());
    let side = side.max(1);

    if orig_w == side && orig_h == side {
        debug!(side, "Image already at target size, skipping resize");
        return img.clone();
    }

    debug!(orig_w, orig_h, side, "Resizing image to square");

    img.resize_exact(side, side, FilterType::Lanczos3)
}
