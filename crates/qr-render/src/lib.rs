//! Styled QR code rendering.
//!
//! Encodes a payload string into a QR matrix and rasterizes it to PNG with
//! a chosen module shape, a solid or gradient color mask and an optional
//! logo composited in the centre.

pub mod color;
pub mod compose;
pub mod drawer;
pub mod mask;
pub mod options;
pub mod qr;
pub mod render;
pub mod resize;

use qr_types::{ErrorCode, ErrorResult, UnknownVariant};

// Re-exports for convenience
pub use color::{ColorParseError, parse_color};
pub use options::{ResolvedStyle, StyleOptions};
pub use render::{QrRenderer, RenderedImage};

/// Pixels per module.
pub const DEFAULT_BOX_SIZE: u32 = 10;

/// Quiet-zone width in modules.
pub const DEFAULT_BORDER: u32 = 4;

/// Accepted range for the logo size relative to the symbol width.
pub const MIN_IMAGE_RATIO: f64 = 0.1;
pub const MAX_IMAGE_RATIO: f64 = 0.5;

pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Errors that can occur while rendering a QR code.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{source}")]
    InvalidChoice {
        field: &'static str,
        source: UnknownVariant,
    },

    #[error("Invalid {field}: {source}")]
    InvalidColor {
        field: &'static str,
        source: ColorParseError,
    },

    #[error("embedded_image_ratio must be between 0.1 and 0.5, got {0}")]
    InvalidImageRatio(f64),

    #[error("version must be between 1 and 40, got {0}")]
    InvalidVersion(i16),

    #[error("Invalid embedded image file: {0}")]
    InvalidImage(#[source] image::ImageError),

    #[error("QR encode error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encode error: {0}")]
    Png(#[source] image::ImageError),
}

impl RenderError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RenderError::InvalidChoice { .. }
            | RenderError::InvalidColor { .. }
            | RenderError::InvalidImageRatio(_)
            | RenderError::InvalidVersion(_) => ErrorCode::InvalidParameters,
            RenderError::InvalidImage(_) => ErrorCode::InvalidImage,
            RenderError::Encode(_) | RenderError::Png(_) => ErrorCode::GenerationFailed,
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            RenderError::InvalidChoice { field, .. } | RenderError::InvalidColor { field, .. } => {
                Some(field)
            }
            RenderError::InvalidImageRatio(_) => Some("embedded_image_ratio"),
            RenderError::InvalidVersion(_) => Some("version"),
            RenderError::InvalidImage(_) => Some("embedded_image"),
            RenderError::Encode(_) | RenderError::Png(_) => None,
        }
    }
}

impl From<RenderError> for ErrorResult {
    fn from(err: RenderError) -> Self {
        let code = err.code();
        // Internal failures only ever expose the fixed message.
        let mut result = if code.is_client_error() {
            ErrorResult::new(code, err.to_string())
        } else {
            ErrorResult::from_code(code)
        };
        result.field = err.field().map(str::to_string);
        result
    }
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
