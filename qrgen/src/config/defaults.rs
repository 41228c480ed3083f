//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("QR_BOX_SIZE", "10", "Pixels per module (1-100)"),
    ("QR_BORDER", "4", "Quiet zone width in modules (0-20)"),
    ("QR_DEFAULT_STYLE", "SQUARE_MODULE", "Module style used when a request names none"),
    ("QR_DEFAULT_COLOR_MASK", "SOLID_FILL", "Color mask used when a request names none"),
    ("QR_DEFAULT_FILL_COLOR", "black", "Module color used when a request names none"),
    ("QR_DEFAULT_BACK_COLOR", "white", "Background color used when a request names none"),
    ("QR_DEFAULT_ERROR_CORRECTION", "L", "Error correction level (L, M, Q or H) without an embedded image"),
    ("QR_MAX_EMBEDDED_IMAGE_BYTES", "5242880", "Largest accepted embedded image after base64 decoding"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Setting definitions in declaration order.
pub fn definitions() -> impl Iterator<Item = &'static SettingDef> {
    DEFS.iter().filter_map(|(key, _, _)| DEFAULT_SETTINGS.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate_setting;

    #[test]
    fn every_default_is_valid() {
        for def in definitions() {
            assert!(
                validate_setting(def.key, def.default).is_ok(),
                "default for {} does not validate",
                def.key
            );
        }
    }

    #[test]
    fn lookup_by_key() {
        assert_eq!(get_default("QR_BOX_SIZE"), Some("10"));
        assert_eq!(get_default("QR_UNKNOWN"), None);
        assert_eq!(definitions().count(), DEFS.len());
    }
}
