//! Style options as received from callers, and their validated form.

use image::{DynamicImage, Rgba};
use qr_types::{ColorMask, ErrorCorrection, EyeStyle, ModuleStyle};
use serde::{Deserialize, Serialize};

use crate::color::parse_color;
use crate::{MAX_IMAGE_RATIO, MIN_IMAGE_RATIO, RenderError, Result};

/// Rendering options. Enumerations arrive as strings so that unknown
/// values surface as field-tagged errors from the render pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    pub style: String,
    pub color_mask: String,
    /// Shape of the finder patterns; the module style when absent.
    pub eye_style: Option<String>,
    pub fill_color: String,
    pub back_color: String,
    /// Encoded raster (PNG, JPEG, ...) placed in the centre.
    #[serde(skip)]
    pub embedded_image: Option<Vec<u8>>,
    pub embedded_image_ratio: f64,
    /// Ignored in favour of `H` when an embedded image is present.
    pub error_correction: ErrorCorrection,
    pub min_version: Option<i16>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            style: ModuleStyle::default().as_str().into(),
            color_mask: ColorMask::default().as_str().into(),
            eye_style: None,
            fill_color: "black".into(),
            back_color: "white".into(),
            embedded_image: None,
            embedded_image_ratio: 0.25,
            error_correction: ErrorCorrection::default(),
            min_version: None,
        }
    }
}

impl StyleOptions {
    pub fn with_style(mut self, style: ModuleStyle) -> Self {
        self.style = style.as_str().into();
        self
    }

    pub fn with_color_mask(mut self, mask: ColorMask) -> Self {
        self.color_mask = mask.as_str().into();
        self
    }

    pub fn with_eye_style(mut self, eye: EyeStyle) -> Self {
        self.eye_style = Some(eye.as_str().into());
        self
    }

    pub fn with_colors(mut self, fill: impl Into<String>, back: impl Into<String>) -> Self {
        self.fill_color = fill.into();
        self.back_color = back.into();
        self
    }

    pub fn with_embedded_image(mut self, bytes: Vec<u8>, ratio: f64) -> Self {
        self.embedded_image = Some(bytes);
        self.embedded_image_ratio = ratio;
        self
    }

    pub fn with_min_version(mut self, version: i16) -> Self {
        self.min_version = Some(version);
        self
    }

    /// Validate every option and decode the embedded image.
    pub fn resolve(&self) -> Result<ResolvedStyle> {
        let module = self
            .style
            .parse::<ModuleStyle>()
            .map_err(|source| RenderError::InvalidChoice {
                field: "style",
                source,
            })?;
        let mask = self
            .color_mask
            .parse::<ColorMask>()
            .map_err(|source| RenderError::InvalidChoice {
                field: "color_mask",
                source,
            })?;
        let eye = self
            .eye_style
            .as_deref()
            .map(|value| value.parse::<EyeStyle>())
            .transpose()
            .map_err(|source| RenderError::InvalidChoice {
                field: "eye_style",
                source,
            })?;

        let fill = parse_color(&self.fill_color).map_err(|source| RenderError::InvalidColor {
            field: "fill_color",
            source,
        })?;
        let back = parse_color(&self.back_color).map_err(|source| RenderError::InvalidColor {
            field: "back_color",
            source,
        })?;

        let ratio = self.embedded_image_ratio;
        if !(MIN_IMAGE_RATIO..=MAX_IMAGE_RATIO).contains(&ratio) {
            return Err(RenderError::InvalidImageRatio(ratio));
        }

        if let Some(version) = self.min_version {
            if !(1..=40).contains(&version) {
                return Err(RenderError::InvalidVersion(version));
            }
        }

        let logo = self
            .embedded_image
            .as_deref()
            .map(image::load_from_memory)
            .transpose()
            .map_err(RenderError::InvalidImage)?;

        let error_correction = if logo.is_some() {
            ErrorCorrection::High
        } else {
            self.error_correction
        };

        Ok(ResolvedStyle {
            module,
            mask,
            eye,
            fill,
            back,
            logo,
            ratio,
            error_correction,
            min_version: self.min_version,
        })
    }
}

/// Options after validation: every enumeration resolved, colors parsed and
/// the logo decoded.
#[derive(Debug, Clone)]
pub struct ResolvedStyle {
    pub module: ModuleStyle,
    pub mask: ColorMask,
    pub eye: Option<EyeStyle>,
    pub fill: Rgba<u8>,
    pub back: Rgba<u8>,
    pub logo: Option<DynamicImage>,
    pub ratio: f64,
    pub error_correction: ErrorCorrection,
    pub min_version: Option<i16>,
}
