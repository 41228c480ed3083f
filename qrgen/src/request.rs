//! JSON request shape accepted by the generator.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use qr_payload::Payload;
use qr_render::StyleOptions;
use qr_types::{ErrorCode, ErrorCorrection, ErrorResult};
use serde::{Deserialize, Serialize};

/// One generation request: the content fields (tagged by `type`) and the
/// style fields side by side in a single object.
///
/// ```json
/// {"type": "url", "url": "https://example.com", "style": "ROUNDED_MODULE"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub content: Payload,
    #[serde(flatten)]
    pub style: StyleRequest,
}

impl GenerateRequest {
    pub fn new(content: Payload) -> Self {
        Self {
            content,
            style: StyleRequest::default(),
        }
    }

    pub fn with_style(mut self, style: StyleRequest) -> Self {
        self.style = style;
        self
    }
}

/// Style overrides; absent fields take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_color: Option<String>,
    /// Base64 (standard alphabet), optionally as a `data:` URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded_image_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_correction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i16>,
}

impl StyleRequest {
    /// Merge onto `defaults`, decoding the embedded image. Images larger
    /// than `max_image_bytes` are rejected before and after decoding.
    pub fn apply(
        &self,
        mut defaults: StyleOptions,
        max_image_bytes: usize,
    ) -> Result<StyleOptions, ErrorResult> {
        let overrides = [
            (&mut defaults.style, &self.style),
            (&mut defaults.color_mask, &self.color_mask),
            (&mut defaults.fill_color, &self.fill_color),
            (&mut defaults.back_color, &self.back_color),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        if self.eye_style.is_some() {
            defaults.eye_style = self.eye_style.clone();
        }
        if let Some(ratio) = self.embedded_image_ratio {
            defaults.embedded_image_ratio = ratio;
        }
        if let Some(level) = &self.error_correction {
            defaults.error_correction = level.parse::<ErrorCorrection>().map_err(|e| {
                ErrorResult::new(ErrorCode::InvalidParameters, e.to_string())
                    .with_field("error_correction")
            })?;
        }
        if self.version.is_some() {
            defaults.min_version = self.version;
        }
        if let Some(encoded) = self.embedded_image.as_deref() {
            defaults.embedded_image = decode_embedded_image(encoded, max_image_bytes)?;
        }
        Ok(defaults)
    }
}

/// Decode a base64 image. Blank input means no image.
pub fn decode_embedded_image(
    encoded: &str,
    max_bytes: usize,
) -> Result<Option<Vec<u8>>, ErrorResult> {
    let encoded = match encoded.trim() {
        s if s.starts_with("data:") => s.split_once(',').map_or("", |(_, data)| data),
        s => s,
    };
    if encoded.is_empty() {
        return Ok(None);
    }

    let too_large = || {
        tracing::warn!(max_bytes, "Rejected oversized embedded image");
        ErrorResult::new(
            ErrorCode::InvalidImage,
            format!("Embedded image exceeds the {max_bytes} byte limit"),
        )
        .with_field("embedded_image")
    };

    // base64 expands by 4/3; reject before allocating the decoded buffer
    if encoded.len() / 4 > max_bytes / 3 + 1 {
        return Err(too_large());
    }
    let bytes = STANDARD.decode(encoded).map_err(|e| {
        ErrorResult::new(
            ErrorCode::InvalidImage,
            format!("Embedded image is not valid base64: {e}"),
        )
        .with_field("embedded_image")
    })?;
    if bytes.len() > max_bytes {
        return Err(too_large());
    }
    Ok(Some(bytes))
}
