//! Logo composition over the rendered symbol.

use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::resize::resize_square;

/// Where and how large the logo lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    pub offset: u32,
    pub side: u32,
}

impl LogoPlacement {
    /// Centre a square covering `ratio` of `canvas_width`, with its offset
    /// snapped down to the module grid so the logo edges follow module
    /// boundaries.
    pub fn compute(canvas_width: u32, ratio: f64, box_size: u32) -> Self {
        let box_size = box_size.max(1);
        let requested = (f64::from(canvas_width) * ratio) as u32;
        let free = canvas_width.saturating_sub(requested) / 2;
        let offset = free / box_size * box_size;
        Self {
            offset,
            side: canvas_width - 2 * offset,
        }
    }
}

/// Resize `logo` and alpha-composite it in the centre of `canvas`.
pub fn embed_logo(
    canvas: &mut RgbaImage,
    logo: &DynamicImage,
    ratio: f64,
    box_size: u32,
) -> LogoPlacement {
    let placement = LogoPlacement::compute(canvas.width(), ratio, box_size);
    debug!(
        offset = placement.offset,
        side = placement.side,
        logo_w = logo.width(),
        logo_h = logo.height(),
        "Placing embedded image"
    );
    let resized = resize_square(logo, placement.side);
    overlay(canvas, &resized, placement.offset, placement.offset);
    placement
}

/// Overlay `top` image onto `base` at the given position.
///
/// The `top` image is alpha-composited over the base.
pub fn overlay(base: &mut RgbaImage, top: &DynamicImage, x: u32, y: u32) {
    let top_rgba = top.to_rgba8();
    for (dx, dy, pixel) in top_rgba.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let alpha = pixel[3] as f32 / 255.0;
            if alpha > 0.99 {
                base.put_pixel(target_x, target_y, *pixel);
            } else if alpha > 0.01 {
                let bg = base.get_pixel(target_x, target_y);
                let blended = blend_pixel(bg, pixel, alpha);
                base.put_pixel(target_x, target_y, blended);
            }
        }
    }
}

/// Source-over blend of `fg` (with coverage `alpha`) onto `bg`.
fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let bg_alpha = bg[3] as f32 / 255.0;
    let out_alpha = alpha + bg_alpha * (1.0 - alpha);
    let channel = |i: usize| {
        let value = (fg[i] as f32 * alpha + bg[i] as f32 * bg_alpha * (1.0 - alpha)) / out_alpha;
        value.round() as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_alpha * 255.0).round() as u8,
    ])
}
