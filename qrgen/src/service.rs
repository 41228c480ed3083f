//! Request handling: format the payload, render it, report failures as
//! [`ErrorResult`]s.

use std::panic::{self, AssertUnwindSafe};

use qr_payload::{Payload, QrPayload};
use qr_render::{QrRenderer, StyleOptions};
use qr_types::{ErrorCode, ErrorResult};
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::request::GenerateRequest;

/// A generated image ready to hand back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQr {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub payload: String,
    pub width: u32,
    pub version: i16,
}

/// Stateless front door over formatter and renderer.
#[derive(Debug, Clone)]
pub struct QrGenerator {
    renderer: QrRenderer,
    defaults: StyleOptions,
    max_image_bytes: usize,
}

impl Default for QrGenerator {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl QrGenerator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            renderer: config.renderer(),
            defaults: config.style_defaults(),
            max_image_bytes: config.max_embedded_image_bytes,
        }
    }

    /// Format only, without rendering.
    pub fn format_payload(&self, content: &Payload) -> Result<QrPayload, ErrorResult> {
        content.format().map_err(|e| {
            info!(kind = content.kind(), code = %e.code(), "Rejected payload: {e}");
            ErrorResult::from(e)
        })
    }

    /// Format and render one request. Panics raised anywhere in the pipeline
    /// are reported as `INTERNAL_ERROR`.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GeneratedQr, ErrorResult> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.generate_inner(request))) {
            Ok(result) => result,
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".into());
                error!(kind = request.content.kind(), detail, "QR generation panicked");
                Err(ErrorResult::from_code(ErrorCode::InternalError))
            }
        }
    }

    fn generate_inner(&self, request: &GenerateRequest) -> Result<GeneratedQr, ErrorResult> {
        let payload = self.format_payload(&request.content)?;
        let options = request
            .style
            .apply(self.defaults.clone(), self.max_image_bytes)?;
        debug!(
            kind = request.content.kind(),
            len = payload.as_str().len(),
            has_image = options.embedded_image.is_some(),
            "Generating QR code"
        );

        let rendered = self
            .renderer
            .render_payload(&payload, &options)
            .map_err(ErrorResult::from)?;

        Ok(GeneratedQr {
            content_type: rendered.content_type(),
            width: rendered.width,
            version: rendered.version,
            bytes: rendered.into_bytes(),
            payload: payload.into_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use qr_payload::{TextPayload, UrlPayload};

    use super::*;
    use crate::request::StyleRequest;

    fn url_request(url: &str) -> GenerateRequest {
        GenerateRequest::new(Payload::Url(UrlPayload { url: url.into() }))
    }

    #[test]
    fn generates_png() {
        let generated = QrGenerator::default()
            .generate(&url_request("https://example.com"))
            .unwrap();
        assert_eq!(generated.content_type, "image/png");
        assert_eq!(generated.payload, "https://example.com");
        assert!(generated.bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn payload_errors_come_first() {
        let request = url_request("example").with_style(StyleRequest {
            style: Some("BOGUS".into()),
            ..StyleRequest::default()
        });
        let err = QrGenerator::default().generate(&request).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUrl);
    }

    #[test]
    fn render_errors_are_converted() {
        let request = url_request("https://example.com").with_style(StyleRequest {
            style: Some("BOGUS".into()),
            ..StyleRequest::default()
        });
        let err = QrGenerator::default().generate(&request).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameters);
        assert_eq!(err.field.as_deref(), Some("style"));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn oversized_text_is_a_generation_failure() {
        let request = GenerateRequest::new(Payload::Text(TextPayload {
            text: "x".repeat(4000),
        }));
        let err = QrGenerator::default().generate(&request).unwrap_err();
        assert_eq!(err.code, ErrorCode::GenerationFailed);
        assert_eq!(err.message, ErrorCode::GenerationFailed.default_message());
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn configured_defaults_apply() {
        let config = AppConfig {
            box_size: 2,
            border: 0,
            ..AppConfig::default()
        };
        let generated = QrGenerator::new(&config)
            .generate(&url_request("https://example.com"))
            .unwrap();
        assert_eq!(generated.width, 2 * (17 + 4 * generated.version as u32));
    }
}
