//! Helpers shared by the formatters: present-only segment accumulation,
//! query strings and number rendering.

use qr_types::ErrorCode;

use crate::{PayloadError, Result};

/// Append `prefix` + value + `terminator` for every non-empty value, in order.
pub(crate) fn push_present(out: &mut String, segments: &[(&str, &str)], terminator: &str) {
    for (prefix, value) in segments {
        if value.is_empty() {
            continue;
        }
        out.push_str(prefix);
        out.push_str(value);
        out.push_str(terminator);
    }
}

/// Build `?k=v&k=v` from the non-empty parameters, or an empty string.
pub(crate) fn query_string(params: &[(&str, &str)]) -> String {
    let present: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}={value}"))
        .collect();

    if present.is_empty() {
        String::new()
    } else {
        format!("?{}", present.join("&"))
    }
}

pub(crate) fn require(value: &str, code: ErrorCode, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PayloadError::MissingField { code, field });
    }
    Ok(())
}

/// Render a float the way scanners have historically received it:
/// shortest round-trip digits, integral values keep a trailing `.0`.
/// Output is always positional; `geo:` and `bitcoin:` readers do not
/// accept exponent forms such as `1e-05`.
pub(crate) fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_present_skips_empty_values() {
        let mut out = String::from("X:");
        push_present(&mut out, &[("A:", "1"), ("B:", ""), ("C:", "3")], ";");
        assert_eq!(out, "X:A:1;C:3;");
    }

    #[test]
    fn query_string_cases() {
        assert_eq!(query_string(&[("a", ""), ("b", "")]), "");
        assert_eq!(query_string(&[("a", "1"), ("b", "")]), "?a=1");
        assert_eq!(query_string(&[("a", ""), ("b", "2")]), "?b=2");
        assert_eq!(query_string(&[("a", "1"), ("b", "2")]), "?a=1&b=2");
    }

    #[test]
    fn format_float_cases() {
        assert_eq!(format_float(127.0), "127.0");
        assert_eq!(format_float(-122.4194), "-122.4194");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(0.0), "0.0");
    }

    #[test]
    fn format_float_never_uses_exponents() {
        assert_eq!(format_float(0.00001), "0.00001");
        assert_eq!(format_float(-0.000123), "-0.000123");
        assert_eq!(format_float(1e16), "10000000000000000");
        assert_eq!(format_float(123456789.5), "123456789.5");
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require("x", ErrorCode::InvalidWifi, "ssid").is_ok());
        let err = require("  ", ErrorCode::InvalidWifi, "ssid").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidWifi);
        assert_eq!(err.field(), "ssid");
    }
}
