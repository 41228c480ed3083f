//! Setting value validation.

use qr_render::parse_color;
use qr_types::{ColorMask, ModuleStyle};
use regex::Regex;
use std::sync::LazyLock;

static RE_EC_LEVEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[LMQH]$").unwrap());
static RE_BYTE_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{1,10}$").unwrap());

/// Upper bound for `QR_MAX_EMBEDDED_IMAGE_BYTES` (64 MiB).
const MAX_IMAGE_BYTES_LIMIT: u64 = 64 * 1024 * 1024;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "QR_BOX_SIZE" => validate_int_range(value, 1, 100)?,
        "QR_BORDER" => validate_int_range(value, 0, 20)?,
        "QR_DEFAULT_STYLE" => {
            value.parse::<ModuleStyle>().map_err(|e| e.to_string())?;
        }
        "QR_DEFAULT_COLOR_MASK" => {
            value.parse::<ColorMask>().map_err(|e| e.to_string())?;
        }
        "QR_DEFAULT_FILL_COLOR" | "QR_DEFAULT_BACK_COLOR" => {
            parse_color(value).map_err(|e| e.to_string())?;
        }
        "QR_DEFAULT_ERROR_CORRECTION" => {
            if !RE_EC_LEVEL.is_match(value) {
                return Err("must be one of L, M, Q, H".into());
            }
        }
        "QR_MAX_EMBEDDED_IMAGE_BYTES" => {
            if !RE_BYTE_COUNT.is_match(value) {
                return Err("must be a positive byte count".into());
            }
            let v: u64 = value.parse().map_err(|_| "must be an integer")?;
            if v == 0 || v > MAX_IMAGE_BYTES_LIMIT {
                return Err(format!("must be between 1 and {MAX_IMAGE_BYTES_LIMIT}"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
