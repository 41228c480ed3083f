//! The render pipeline: validate, build the matrix, paint, composite, encode.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbaImage};
use qr_payload::QrPayload;
use tracing::{debug, error, warn};

use crate::compose::embed_logo;
use crate::drawer::{Cell, ModuleDrawer, eye_drawer, module_drawer};
use crate::mask::FillStrategy;
use crate::options::{ResolvedStyle, StyleOptions};
use crate::qr::{ModuleGrid, build_code, version_number};
use crate::{DEFAULT_BORDER, DEFAULT_BOX_SIZE, PNG_CONTENT_TYPE, RenderError, Result};

/// Stateless renderer; one instance can serve any number of requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrRenderer {
    box_size: u32,
    border: u32,
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BOX_SIZE, DEFAULT_BORDER)
    }
}

impl QrRenderer {
    /// `box_size` is the pixel size of one module (at least 1), `border`
    /// the quiet zone in modules.
    pub fn new(box_size: u32, border: u32) -> Self {
        Self {
            box_size: box_size.max(1),
            border,
        }
    }

    pub fn box_size(&self) -> u32 {
        self.box_size
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    /// Render a formatted payload, honouring its version hint.
    pub fn render_payload(&self, payload: &QrPayload, options: &StyleOptions) -> Result<RenderedImage> {
        self.render_with_hint(payload.as_str(), options, payload.min_version())
    }

    /// Render `payload` verbatim.
    pub fn render(&self, payload: &str, options: &StyleOptions) -> Result<RenderedImage> {
        self.render_with_hint(payload, options, None)
    }

    fn render_with_hint(
        &self,
        payload: &str,
        options: &StyleOptions,
        hint: Option<i16>,
    ) -> Result<RenderedImage> {
        let style = options.resolve().inspect_err(|e| {
            warn!(error = %e, field = ?e.field(), "Rejected style options");
        })?;
        let min_version = style.min_version.max(hint);

        let code = build_code(payload, style.error_correction, min_version).inspect_err(|e| {
            error!(error = %e, len = payload.len(), "Failed to build QR matrix");
        })?;
        let grid = ModuleGrid::from_code(&code);
        let version = version_number(&code);
        debug!(
            version,
            modules = grid.width(),
            ec = %style.error_correction,
            style = %style.module,
            mask = %style.mask,
            "Built QR matrix"
        );

        let coverage = self.paint_modules(&grid, &style);
        let mut canvas = colorize(&coverage, &style);

        if let Some(logo) = &style.logo {
            embed_logo(&mut canvas, logo, style.ratio, self.box_size);
        }

        let (width, height) = canvas.dimensions();
        let png = encode_png(canvas).inspect_err(|e| {
            error!(error = %e, "Failed to encode PNG");
        })?;
        debug!(width, height, bytes = png.len(), "Rendered QR image");

        Ok(RenderedImage {
            png,
            width,
            height,
            version,
        })
    }

    /// Paint every dark module into a coverage mask the size of the canvas.
    fn paint_modules(&self, grid: &ModuleGrid, style: &ResolvedStyle) -> GrayImage {
        let side = (grid.width() as u32 + 2 * self.border) * self.box_size;
        let mut coverage = GrayImage::new(side, side);

        let body = module_drawer(style.module);
        // finders stay square unless an eye style is requested
        let eye: &dyn ModuleDrawer = eye_drawer(style.eye.unwrap_or_default());

        for (mx, my) in grid.dark_modules() {
            let drawer = if grid.is_finder_module(mx, my) { eye } else { body };
            let cell = Cell {
                x: (mx as u32 + self.border) * self.box_size,
                y: (my as u32 + self.border) * self.box_size,
                size: self.box_size,
                neighbors: grid.neighbors(mx, my),
            };
            drawer.draw(&mut coverage, cell);
        }
        coverage
    }
}

/// Inked pixels take the fill strategy's color, all others the back color.
fn colorize(coverage: &GrayImage, style: &ResolvedStyle) -> RgbaImage {
    let strategy = FillStrategy::new(style.mask, style.fill, style.back);
    let side = coverage.width();
    RgbaImage::from_fn(side, coverage.height(), |x, y| {
        if coverage.get_pixel(x, y)[0] > 0 {
            strategy.color_at(x, y, side)
        } else {
            style.back
        }
    })
}

fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(RenderError::Png)?;
    Ok(png)
}

/// A finished PNG with its pixel size and symbol version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub version: i16,
}

impl RenderedImage {
    pub fn content_type(&self) -> &'static str {
        PNG_CONTENT_TYPE
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use qr_payload::{Payload, WifiPayload};
    use qr_types::{ColorMask, ErrorCode, ErrorResult, EyeStyle, ModuleStyle};

    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn decode_text(png: &[u8]) -> String {
        let img = image::load_from_memory(png).unwrap().to_luma8();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(img.width() as usize, img.height() as usize, |x, y| {
                img.get_pixel(x as u32, y as u32)[0]
            });
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one symbol");
        let (_, content) = grids[0].decode().unwrap();
        content
    }

    fn png_logo(color: Rgba<u8>) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(32, 32, color));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        buf
    }

    #[test]
    fn default_render_round_trips() {
        let rendered = QrRenderer::default()
            .render("https://example.com", &StyleOptions::default())
            .unwrap();
        assert!(rendered.png.starts_with(PNG_SIGNATURE));
        assert_eq!(rendered.content_type(), "image/png");
        assert_eq!(decode_text(&rendered.png), "https://example.com");
    }

    #[test]
    fn dimensions_include_the_quiet_zone() {
        let rendered = QrRenderer::default()
            .render("hello", &StyleOptions::default())
            .unwrap();
        assert_eq!(rendered.version, 1);
        assert_eq!((rendered.width, rendered.height), (290, 290));

        let img = image::load_from_memory(&rendered.png).unwrap();
        assert_eq!((img.width(), img.height()), (290, 290));
        // quiet zone is background, finder corner is ink
        assert_eq!(img.to_rgba8().get_pixel(5, 5), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.to_rgba8().get_pixel(45, 45), &Rgba([0, 0, 0, 255]));

        let small = QrRenderer::new(4, 0)
            .render("hello", &StyleOptions::default())
            .unwrap();
        assert_eq!(small.width, 84);
    }

    #[test]
    fn every_style_and_mask_yields_a_png() {
        let renderer = QrRenderer::default();
        for &style in ModuleStyle::ALL {
            for &mask in ColorMask::ALL {
                let options = StyleOptions::default()
                    .with_style(style)
                    .with_color_mask(mask);
                let rendered = renderer.render("hello", &options).unwrap();
                let img = image::load_from_memory(&rendered.png).unwrap();
                assert_eq!(img.width(), rendered.width, "{style} {mask}");
            }
        }
    }

    #[test]
    fn every_style_decodes_with_default_eyes() {
        let renderer = QrRenderer::default();
        let wifi = "WIFI:T:WPA;S:TestSSID;P:TestPassword;;";
        for &style in ModuleStyle::ALL {
            let options = StyleOptions::default().with_style(style);
            for text in ["hello", "https://example.com", wifi] {
                let rendered = renderer.render(text, &options).unwrap();
                assert_eq!(decode_text(&rendered.png), text, "{style}");
            }
        }
    }

    #[test]
    fn finders_are_square_without_an_eye_style() {
        let renderer = QrRenderer::default();
        for &style in ModuleStyle::ALL {
            let options = StyleOptions::default().with_style(style);
            let img = image::load_from_memory(&renderer.render("hello", &options).unwrap().png)
                .unwrap()
                .to_rgba8();
            // outer corner and ring edge of the top-left finder
            assert_eq!(img.get_pixel(40, 40), &Rgba([0, 0, 0, 255]), "{style}");
            assert_eq!(img.get_pixel(49, 40), &Rgba([0, 0, 0, 255]), "{style}");
        }
    }

    #[test]
    fn eye_style_only_changes_the_finders() {
        let renderer = QrRenderer::default();
        let plain = StyleOptions::default().with_style(ModuleStyle::Circle);
        let eyes = plain.clone().with_eye_style(EyeStyle::Circle);
        let a = image::load_from_memory(&renderer.render("hello", &plain).unwrap().png)
            .unwrap()
            .to_rgba8();
        let b = image::load_from_memory(&renderer.render("hello", &eyes).unwrap().png)
            .unwrap()
            .to_rgba8();
        // top-left corner of the finder: square by default, rounded off as a circle eye
        assert_eq!(a.get_pixel(40, 40), &Rgba([0, 0, 0, 255]));
        assert_eq!(b.get_pixel(40, 40), &Rgba([255, 255, 255, 255]));
        // the centre of the symbol is drawn identically
        assert_eq!(a.get_pixel(145, 145), b.get_pixel(145, 145));
    }

    #[test]
    fn custom_colors_are_applied() {
        let options = StyleOptions::default().with_colors("#ff0000", "rgb(0, 0, 255)");
        let rendered = QrRenderer::default().render("hello", &options).unwrap();
        let img = image::load_from_memory(&rendered.png).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(45, 45), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn rendering_is_idempotent() {
        let renderer = QrRenderer::default();
        let options = StyleOptions::default()
            .with_style(ModuleStyle::Rounded)
            .with_color_mask(ColorMask::RadialGradiant)
            .with_embedded_image(png_logo(Rgba([0, 128, 0, 255])), 0.2);
        let a = renderer.render("same input", &options).unwrap();
        let b = renderer.render("same input", &options).unwrap();
        assert_eq!(a.png, b.png);
    }

    #[test]
    fn min_version_is_honored() {
        let renderer = QrRenderer::default();
        let rendered = renderer
            .render("hello", &StyleOptions::default().with_min_version(3))
            .unwrap();
        assert_eq!(rendered.version, 3);
        assert_eq!(rendered.width, (29 + 8) * 10);
    }

    #[test]
    fn payload_hint_raises_the_version() {
        let payload = Payload::Wifi(WifiPayload {
            ssid: "a".into(),
            ..WifiPayload::default()
        })
        .format()
        .unwrap();
        let rendered = QrRenderer::default()
            .render_payload(&payload, &StyleOptions::default())
            .unwrap();
        assert_eq!(rendered.version, 2);
        assert_eq!(decode_text(&rendered.png), payload.as_str());

        // the larger of the two hints wins
        let rendered = QrRenderer::default()
            .render_payload(&payload, &StyleOptions::default().with_min_version(4))
            .unwrap();
        assert_eq!(rendered.version, 4);
    }

    #[test]
    fn logo_is_composited_in_the_centre() {
        let options = StyleOptions::default().with_embedded_image(png_logo(Rgba([255, 0, 0, 255])), 0.3);
        let rendered = QrRenderer::default().render("hello", &options).unwrap();
        let img = image::load_from_memory(&rendered.png).unwrap().to_rgba8();
        let centre = img.get_pixel(rendered.width / 2, rendered.height / 2);
        assert!(centre[0] > 200 && centre[1] < 50 && centre[2] < 50);
    }

    #[test]
    fn invalid_color_is_reported_on_its_field() {
        let options = StyleOptions::default().with_colors("not-a-color", "white");
        let err = QrRenderer::default().render("hello", &options).unwrap_err();
        let result = ErrorResult::from(err);
        assert_eq!(result.code, ErrorCode::InvalidParameters);
        assert_eq!(result.field.as_deref(), Some("fill_color"));
    }

    #[test]
    fn oversized_payload_fails_generation() {
        let data = "x".repeat(4000);
        let err = QrRenderer::default()
            .render(&data, &StyleOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::GenerationFailed);
    }

    #[test]
    fn corrupt_logo_is_an_image_error() {
        let options = StyleOptions::default().with_embedded_image(vec![0x89, b'P', b'N', b'G'], 0.2);
        let err = QrRenderer::default().render("hello", &options).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidImage);
    }
}
