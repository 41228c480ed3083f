//! Payload formatting for QR content types.
//!
//! Turns validated, structured fields into the exact text scanners expect:
//! `tel:`/`mailto:`/`SMSTO:` URIs, `WIFI:` strings, vCard 3.0 and
//! vCalendar 2.0 blocks, `MECARD:`, `geo:` and `bitcoin:` URIs and
//! `wa.me` links. Every formatter is pure and deterministic.

pub mod contact;
pub mod event;
mod fields;
pub mod location;
pub mod messaging;
pub mod network;

use std::fmt;

use qr_types::{ErrorCode, ErrorResult};
use serde::{Deserialize, Serialize};

// Re-exports for convenience
pub use contact::{MeCardPayload, VCardPayload, format_mecard, format_vcard};
pub use event::{EventPayload, format_event};
pub use location::{BitcoinPayload, GeoPayload, format_bitcoin, format_geo};
pub use messaging::{
    EmailPayload, PhonePayload, SmsPayload, WhatsAppPayload, format_email, format_phone,
    format_sms, format_whatsapp,
};
pub use network::{TextPayload, UrlPayload, WifiPayload, format_text, format_url, format_wifi};

/// Minimum symbol version for content types whose payloads run long.
pub const LONG_PAYLOAD_MIN_VERSION: i16 = 2;

/// Structured QR content, one variant per supported type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    Url(UrlPayload),
    Text(TextPayload),
    Email(EmailPayload),
    Phone(PhonePayload),
    Sms(SmsPayload),
    Wifi(WifiPayload),
    #[serde(rename = "vcard")]
    VCard(VCardPayload),
    Geo(GeoPayload),
    Event(EventPayload),
    #[serde(rename = "mecard")]
    MeCard(MeCardPayload),
    #[serde(rename = "whatsapp")]
    WhatsApp(WhatsAppPayload),
    Bitcoin(BitcoinPayload),
}

impl Payload {
    /// Short name of the content type, as used in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Url(_) => "url",
            Payload::Text(_) => "text",
            Payload::Email(_) => "email",
            Payload::Phone(_) => "phone",
            Payload::Sms(_) => "sms",
            Payload::Wifi(_) => "wifi",
            Payload::VCard(_) => "vcard",
            Payload::Geo(_) => "geo",
            Payload::Event(_) => "event",
            Payload::MeCard(_) => "mecard",
            Payload::WhatsApp(_) => "whatsapp",
            Payload::Bitcoin(_) => "bitcoin",
        }
    }

    /// Smallest symbol version worth trying for this content type.
    pub fn min_version(&self) -> Option<i16> {
        match self {
            Payload::Wifi(_) | Payload::VCard(_) => Some(LONG_PAYLOAD_MIN_VERSION),
            _ => None,
        }
    }

    /// Format the content into its encoding-ready string.
    pub fn format(&self) -> Result<QrPayload> {
        let text = match self {
            Payload::Url(p) => format_url(p)?,
            Payload::Text(p) => format_text(p),
            Payload::Email(p) => format_email(p)?,
            Payload::Phone(p) => format_phone(p)?,
            Payload::Sms(p) => format_sms(p)?,
            Payload::Wifi(p) => format_wifi(p)?,
            Payload::VCard(p) => format_vcard(p)?,
            Payload::Geo(p) => format_geo(p)?,
            Payload::Event(p) => format_event(p)?,
            Payload::MeCard(p) => format_mecard(p)?,
            Payload::WhatsApp(p) => format_whatsapp(p)?,
            Payload::Bitcoin(p) => format_bitcoin(p)?,
        };
        tracing::debug!(kind = self.kind(), len = text.len(), "Formatted QR payload");
        Ok(QrPayload {
            text,
            min_version: self.min_version(),
        })
    }
}

/// Encoding-ready payload text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    text: String,
    min_version: Option<i16>,
}

impl QrPayload {
    /// Wrap already-formatted text without a version hint.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            min_version: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn min_version(&self) -> Option<i16> {
        self.min_version
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for QrPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for QrPayload {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Errors raised while formatting a payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid URL format. Please provide a valid domain (e.g., example.com)")]
    InvalidUrl { value: String },

    #[error("{field} date must be in YYYYMMDD format, got '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("{field} is required")]
    MissingField { code: ErrorCode, field: &'static str },

    #[error("{field} {reason}")]
    OutOfRange {
        code: ErrorCode,
        field: &'static str,
        reason: String,
    },
}

impl PayloadError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PayloadError::InvalidUrl { .. } => ErrorCode::InvalidUrl,
            PayloadError::InvalidDate { .. } => ErrorCode::InvalidEvent,
            PayloadError::MissingField { code, .. } | PayloadError::OutOfRange { code, .. } => *code,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            PayloadError::InvalidUrl { .. } => "url",
            PayloadError::InvalidDate { field, .. }
            | PayloadError::MissingField { field, .. }
            | PayloadError::OutOfRange { field, .. } => field,
        }
    }
}

impl From<PayloadError> for ErrorResult {
    fn from(err: PayloadError) -> Self {
        ErrorResult::new(err.code(), err.to_string()).with_field(err.field())
    }
}

/// Result type alias for payload formatting.
pub type Result<T> = std::result::Result<T, PayloadError>;
