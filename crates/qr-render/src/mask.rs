//! Color strategies applied to inked pixels.

use image::Rgba;
use qr_types::ColorMask;

/// Resolved color mask. Gradients run from `from` to `to` as the normalized
/// distance grows from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStrategy {
    Solid(Rgba<u8>),
    /// Euclidean distance from the centre, 1.0 at the corners.
    Radial { from: Rgba<u8>, to: Rgba<u8> },
    /// Chebyshev distance from the centre, 1.0 at the edges.
    Square { from: Rgba<u8>, to: Rgba<u8> },
    /// Left to right.
    Horizontal { from: Rgba<u8>, to: Rgba<u8> },
    /// Top to bottom.
    Vertical { from: Rgba<u8>, to: Rgba<u8> },
}

impl FillStrategy {
    pub fn new(mask: ColorMask, fill: Rgba<u8>, back: Rgba<u8>) -> Self {
        match mask {
            ColorMask::SolidFill => FillStrategy::Solid(fill),
            ColorMask::RadialGradiant => FillStrategy::Radial {
                from: fill,
                to: back,
            },
            ColorMask::SquareGradiant => FillStrategy::Square {
                from: fill,
                to: back,
            },
            ColorMask::HorizontalGradiant => FillStrategy::Horizontal {
                from: fill,
                to: back,
            },
            // the bottom edge carries the fill color
            ColorMask::VerticalGradiant => FillStrategy::Vertical {
                from: back,
                to: fill,
            },
        }
    }

    /// Color of an inked pixel at `(x, y)` on a `size`-wide square canvas.
    pub fn color_at(&self, x: u32, y: u32, size: u32) -> Rgba<u8> {
        let size = f64::from(size.max(1));
        let half = size / 2.0;
        let (x, y) = (f64::from(x), f64::from(y));
        match *self {
            FillStrategy::Solid(color) => color,
            FillStrategy::Radial { from, to } => {
                let d = ((x - half).powi(2) + (y - half).powi(2)).sqrt();
                interpolate(from, to, d / (std::f64::consts::SQRT_2 * half))
            }
            FillStrategy::Square { from, to } => {
                let d = (x - half).abs().max((y - half).abs());
                interpolate(from, to, d / half)
            }
            FillStrategy::Horizontal { from, to } => interpolate(from, to, x / size),
            FillStrategy::Vertical { from, to } => interpolate(from, to, y / size),
        }
    }
}

/// Channel-wise linear interpolation, alpha included.
pub fn interpolate(from: Rgba<u8>, to: Rgba<u8>, t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let a = f64::from(from[i]);
        let b = f64::from(to[i]);
        *channel = (a * (1.0 - t) + b * t).round() as u8;
    }
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const BACK: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn solid_ignores_position() {
        let s = FillStrategy::new(ColorMask::SolidFill, FILL, BACK);
        assert_eq!(s.color_at(0, 0, 100), FILL);
        assert_eq!(s.color_at(99, 99, 100), FILL);
    }

    #[test]
    fn radial_is_fill_at_centre_and_back_at_corner() {
        let s = FillStrategy::new(ColorMask::RadialGradiant, FILL, BACK);
        assert_eq!(s.color_at(50, 50, 100), FILL);
        assert_eq!(s.color_at(0, 0, 100), BACK);
    }

    #[test]
    fn square_reaches_back_on_every_edge() {
        let s = FillStrategy::new(ColorMask::SquareGradiant, FILL, BACK);
        assert_eq!(s.color_at(50, 50, 100), FILL);
        assert_eq!(s.color_at(0, 50, 100), BACK);
        assert_eq!(s.color_at(50, 0, 100), BACK);
        // halfway out on either axis gives the same shade
        assert_eq!(s.color_at(25, 50, 100), s.color_at(50, 75, 100));
    }

    #[test]
    fn horizontal_runs_left_to_right() {
        let s = FillStrategy::new(ColorMask::HorizontalGradiant, FILL, BACK);
        assert_eq!(s.color_at(0, 30, 100), FILL);
        assert!(s.color_at(99, 30, 100)[0] > 250);
        assert_eq!(s.color_at(10, 0, 100), s.color_at(10, 99, 100));
    }

    #[test]
    fn vertical_runs_back_to_fill() {
        let s = FillStrategy::new(ColorMask::VerticalGradiant, FILL, BACK);
        assert_eq!(s.color_at(30, 0, 100), BACK);
        assert!(s.color_at(30, 99, 100)[0] < 5);
    }

    #[test]
    fn interpolate_clamps_and_blends_alpha() {
        let clear = Rgba([255, 0, 0, 0]);
        let opaque = Rgba([0, 0, 255, 255]);
        assert_eq!(interpolate(clear, opaque, -1.0), clear);
        assert_eq!(interpolate(clear, opaque, 2.0), opaque);
        assert_eq!(interpolate(clear, opaque, 0.5), Rgba([128, 0, 128, 128]));
    }
}
