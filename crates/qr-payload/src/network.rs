//! URL, plain text and WiFi join payloads.

use qr_types::ErrorCode;
use serde::{Deserialize, Serialize};

use crate::fields::{push_present, require};
use crate::{PayloadError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPayload {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPayload {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiPayload {
    pub ssid: String,
    #[serde(default)]
    pub password: String,
    /// `WPA`, `WEP`, or `none`/`nopass` for open networks.
    #[serde(default = "default_encryption")]
    pub encryption: String,
    #[serde(default)]
    pub hidden: bool,
}

impl Default for WifiPayload {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            password: String::new(),
            encryption: default_encryption(),
            hidden: false,
        }
    }
}

fn default_encryption() -> String {
    "WPA".into()
}

/// Prefix `https://` when no scheme is given and check the domain shape.
///
/// The part after the scheme must split on `.` into at least two non-empty
/// labels (`example.com`, `a.b/path`).
pub fn format_url(payload: &UrlPayload) -> Result<String> {
    let value = payload.url.as_str();
    let url = if value.starts_with("http://") || value.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{value}")
    };

    let host = url.rsplit("://").next().unwrap_or_default();
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        tracing::warn!(url = %payload.url, "Rejected URL without a valid domain");
        return Err(PayloadError::InvalidUrl {
            value: payload.url.clone(),
        });
    }

    Ok(url)
}

pub fn format_text(payload: &TextPayload) -> String {
    payload.text.clone()
}

/// `WIFI:T:<enc>;S:<ssid>;[P:<password>;][H:true;];`
pub fn format_wifi(payload: &WifiPayload) -> Result<String> {
    require(&payload.ssid, ErrorCode::InvalidWifi, "ssid")?;

    let encryption = if is_open_network(&payload.encryption) {
        "nopass"
    } else {
        payload.encryption.as_str()
    };
    let hidden = if payload.hidden { "true" } else { "" };

    let mut out = String::from("WIFI:");
    out.push_str(&format!("T:{encryption};S:{};", payload.ssid));
    push_present(
        &mut out,
        &[("P:", payload.password.as_str()), ("H:", hidden)],
        ";",
    );
    out.push(';');

    tracing::debug!(ssid = %payload.ssid, encryption, "Built WiFi payload");
    Ok(out)
}

fn is_open_network(encryption: &str) -> bool {
    let encryption = encryption.trim();
    encryption.is_empty()
        || encryption.eq_ignore_ascii_case("none")
        || encryption.eq_ignore_ascii_case("nopass")
}
