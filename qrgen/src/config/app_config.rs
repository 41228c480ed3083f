//! Runtime application configuration loaded from settings + environment.

use qr_render::{DEFAULT_BORDER, DEFAULT_BOX_SIZE, QrRenderer, StyleOptions};
use qr_types::{ColorMask, ErrorCorrection, ModuleStyle};

use super::manager::SettingsManager;

/// 5 MiB.
pub const DEFAULT_MAX_EMBEDDED_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Runtime configuration populated from the settings source.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub box_size: u32,
    pub border: u32,
    pub default_style: ModuleStyle,
    pub default_color_mask: ColorMask,
    pub default_fill_color: String,
    pub default_back_color: String,
    pub default_error_correction: ErrorCorrection,
    pub max_embedded_image_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            border: DEFAULT_BORDER,
            default_style: ModuleStyle::Square,
            default_color_mask: ColorMask::SolidFill,
            default_fill_color: "black".into(),
            default_back_color: "white".into(),
            default_error_correction: ErrorCorrection::Low,
            max_embedded_image_bytes: DEFAULT_MAX_EMBEDDED_IMAGE_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager. Values have already been
    /// validated there, so parse failures only fall back to defaults.
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let defaults = Self::default();

        Ok(Self {
            box_size: sm.get_setting("QR_BOX_SIZE")?.parse().unwrap_or(defaults.box_size),
            border: sm.get_setting("QR_BORDER")?.parse().unwrap_or(defaults.border),
            default_style: sm
                .get_setting("QR_DEFAULT_STYLE")?
                .parse()
                .unwrap_or(defaults.default_style),
            default_color_mask: sm
                .get_setting("QR_DEFAULT_COLOR_MASK")?
                .parse()
                .unwrap_or(defaults.default_color_mask),
            default_fill_color: sm.get_setting("QR_DEFAULT_FILL_COLOR")?,
            default_back_color: sm.get_setting("QR_DEFAULT_BACK_COLOR")?,
            default_error_correction: sm
                .get_setting("QR_DEFAULT_ERROR_CORRECTION")?
                .parse()
                .unwrap_or(defaults.default_error_correction),
            max_embedded_image_bytes: sm
                .get_setting("QR_MAX_EMBEDDED_IMAGE_BYTES")?
                .parse()
                .unwrap_or(defaults.max_embedded_image_bytes),
        })
    }

    pub fn renderer(&self) -> QrRenderer {
        QrRenderer::new(self.box_size, self.border)
    }

    /// Style applied to every request before its own overrides.
    pub fn style_defaults(&self) -> StyleOptions {
        StyleOptions {
            error_correction: self.default_error_correction,
            ..StyleOptions::default()
        }
        .with_style(self.default_style)
        .with_color_mask(self.default_color_mask)
        .with_colors(&self.default_fill_color, &self.default_back_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults() {
        let config = AppConfig::load(&SettingsManager::default()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_overrides() {
        let sm = SettingsManager::from_pairs([
            ("QR_BOX_SIZE", "4"),
            ("QR_BORDER", "1"),
            ("QR_DEFAULT_STYLE", "CIRCLE_MODULE"),
            ("QR_DEFAULT_ERROR_CORRECTION", "Q"),
            ("QR_DEFAULT_FILL_COLOR", "navy"),
            ("QR_MAX_EMBEDDED_IMAGE_BYTES", "1024"),
        ]);
        let config = AppConfig::load(&sm).unwrap();
        assert_eq!(config.box_size, 4);
        assert_eq!(config.border, 1);
        assert_eq!(config.default_style, ModuleStyle::Circle);
        assert_eq!(config.default_error_correction, ErrorCorrection::Quartile);
        assert_eq!(config.max_embedded_image_bytes, 1024);

        let style = config.style_defaults();
        assert_eq!(style.style, "CIRCLE_MODULE");
        assert_eq!(style.fill_color, "navy");
        assert_eq!(style.back_color, "white");
        assert_eq!(config.renderer(), QrRenderer::new(4, 1));
    }
}
