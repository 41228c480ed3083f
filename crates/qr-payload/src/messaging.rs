//! Email, phone call, SMS and WhatsApp payloads.
//!
//! Email parameters go into the `mailto:` URI as typed, while the WhatsApp
//! message is form-urlencoded. Scanners in the wild have been fed both forms,
//! so each is kept as is.

use qr_types::ErrorCode;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::Result;
use crate::fields::{query_string, require};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPayload {
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonePayload {
    /// Caller-normalized number, leading `+` optional.
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsPayload {
    pub phone_number: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppPayload {
    pub phone_number: String,
    #[serde(default)]
    pub message: String,
}

/// `mailto:<email>[?subject=..][&body=..]`, parameters unencoded.
pub fn format_email(payload: &EmailPayload) -> Result<String> {
    require(&payload.email, ErrorCode::InvalidEmail, "email")?;

    let params = query_string(&[
        ("subject", payload.subject.as_str()),
        ("body", payload.body.as_str()),
    ]);
    Ok(format!("mailto:{}{params}", payload.email))
}

pub fn format_phone(payload: &PhonePayload) -> Result<String> {
    require(&payload.phone_number, ErrorCode::InvalidPhone, "phone_number")?;
    Ok(format!("tel:{}", payload.phone_number))
}

/// `SMSTO:<number>[:<message>]`
pub fn format_sms(payload: &SmsPayload) -> Result<String> {
    require(&payload.phone_number, ErrorCode::InvalidPhone, "phone_number")?;

    let mut out = format!("SMSTO:{}", payload.phone_number);
    if !payload.message.is_empty() {
        out.push(':');
        out.push_str(&payload.message);
    }
    Ok(out)
}

/// `https://wa.me/<number>[?text=<urlencoded message>]`
pub fn format_whatsapp(payload: &WhatsAppPayload) -> Result<String> {
    require(&payload.phone_number, ErrorCode::InvalidPhone, "phone_number")?;

    let mut out = format!("https://wa.me/{}", payload.phone_number);
    if !payload.message.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("text", &payload.message)
            .finish();
        out.push('?');
        out.push_str(&query);
    }
    Ok(out)
}
