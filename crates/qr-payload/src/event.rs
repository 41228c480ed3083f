//! Calendar event payload (vCalendar 2.0 with a single VEVENT).

use serde::{Deserialize, Serialize};

use crate::fields::push_present;
use crate::{PayloadError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    /// `YYYYMMDD`
    pub start: String,
    /// `YYYYMMDD`
    pub end: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

pub fn format_event(payload: &EventPayload) -> Result<String> {
    check_date("start", &payload.start)?;
    check_date("end", &payload.end)?;

    let mut out = String::from("BEGIN:VCALENDAR\nVERSION:2.0\nBEGIN:VEVENT\n");
    out.push_str(&format!("SUMMARY:{}\n", payload.title));
    out.push_str(&format!("DTSTART:{}\n", payload.start));
    out.push_str(&format!("DTEND:{}\n", payload.end));
    push_present(
        &mut out,
        &[
            ("LOCATION:", payload.location.as_str()),
            ("DESCRIPTION:", payload.description.as_str()),
        ],
        "\n",
    );
    out.push_str("END:VEVENT\nEND:VCALENDAR");
    Ok(out)
}

/// Exactly eight ASCII digits.
fn check_date(field: &'static str, value: &str) -> Result<()> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        tracing::warn!(field, value, "Rejected event date");
        return Err(PayloadError::InvalidDate {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
