//! Stable error codes and the caller-facing error result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error codes consumed by callers and mapped to HTTP-like status classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidParameters,
    InvalidImage,
    GenerationFailed,
    InvalidUrl,
    InvalidEmail,
    InvalidPhone,
    InvalidWifi,
    InvalidVcard,
    InvalidEvent,
    InvalidGeo,
    InvalidBitcoin,
    InternalError,
    InvalidColor,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 13] = [
        ErrorCode::InvalidParameters,
        ErrorCode::InvalidImage,
        ErrorCode::GenerationFailed,
        ErrorCode::InvalidUrl,
        ErrorCode::InvalidEmail,
        ErrorCode::InvalidPhone,
        ErrorCode::InvalidWifi,
        ErrorCode::InvalidVcard,
        ErrorCode::InvalidEvent,
        ErrorCode::InvalidGeo,
        ErrorCode::InvalidBitcoin,
        ErrorCode::InternalError,
        ErrorCode::InvalidColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidParameters => "INVALID_PARAMETERS",
            ErrorCode::InvalidImage => "INVALID_IMAGE",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::InvalidUrl => "INVALID_URL",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidPhone => "INVALID_PHONE",
            ErrorCode::InvalidWifi => "INVALID_WIFI",
            ErrorCode::InvalidVcard => "INVALID_VCARD",
            ErrorCode::InvalidEvent => "INVALID_EVENT",
            ErrorCode::InvalidGeo => "INVALID_GEO",
            ErrorCode::InvalidBitcoin => "INVALID_BITCOIN",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::InvalidColor => "INVALID_COLOR",
        }
    }

    /// Fixed message shown to callers for this code.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::InvalidParameters => "Wrong parameters were passed.",
            ErrorCode::InvalidImage => "Wrong image format.",
            ErrorCode::GenerationFailed => "Failed to generate QR code.",
            ErrorCode::InvalidUrl => "Wrong URL format.",
            ErrorCode::InvalidEmail => "Wrong email format.",
            ErrorCode::InvalidPhone => "Wrong phone number format.",
            ErrorCode::InvalidWifi => "Wrong WiFi settings.",
            ErrorCode::InvalidVcard => "Wrong VCard information.",
            ErrorCode::InvalidEvent => "Wrong event information.",
            ErrorCode::InvalidGeo => "Wrong location information.",
            ErrorCode::InvalidBitcoin => "Wrong Bitcoin information.",
            ErrorCode::InternalError => "Internal server error occurred.",
            ErrorCode::InvalidColor => "Wrong color format.",
        }
    }

    /// `true` for failures the caller caused (400-equivalent).
    pub fn is_client_error(self) -> bool {
        !matches!(self, ErrorCode::GenerationFailed | ErrorCode::InternalError)
    }

    pub fn http_status(self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure returned across every public boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResult {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Result carrying only the fixed message for `code`.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} ({field}): {}", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ErrorResult {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_as_stable_identifiers() {
        for code in ErrorCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn status_classes() {
        assert_eq!(ErrorCode::InvalidUrl.http_status(), 400);
        assert_eq!(ErrorCode::InvalidColor.http_status(), 400);
        assert_eq!(ErrorCode::InvalidImage.http_status(), 400);
        assert_eq!(ErrorCode::GenerationFailed.http_status(), 500);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn field_is_omitted_when_absent() {
        let plain = ErrorResult::from_code(ErrorCode::GenerationFailed);
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("field").is_none());
        assert_eq!(json["code"], "GENERATION_FAILED");

        let tagged = ErrorResult::from_code(ErrorCode::InvalidParameters).with_field("style");
        let json = serde_json::to_value(&tagged).unwrap();
        assert_eq!(json["field"], "style");
    }
}
