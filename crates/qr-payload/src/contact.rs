//! Contact cards: vCard 3.0 and MECARD.

use qr_types::ErrorCode;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::fields::{push_present, require};

/// vCard fields. Only the names are required; every other line is emitted
/// when its value is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VCardPayload {
    pub first_name: String,
    pub last_name: String,
    pub birthday: String,
    #[serde(rename = "vcard_email", alias = "email")]
    pub email: String,
    #[serde(rename = "vcard_phone", alias = "phone")]
    pub phone: String,
    #[serde(rename = "vcard_mobile", alias = "mobile")]
    pub mobile: String,
    pub organization: String,
    pub job_title: String,
    pub address: String,
    pub label: String,
    #[serde(rename = "vcard_url", alias = "url")]
    pub url: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeCardPayload {
    pub name: String,
    /// Phonetic reading of the name (`SOUND:`).
    pub reading: String,
    pub tel: String,
    pub email: String,
    pub memo: String,
    pub birthday: String,
    pub address: String,
    pub url: String,
    pub nickname: String,
}

/// Build a `BEGIN:VCARD` ... `END:VCARD` block, lines separated by `\n`.
pub fn format_vcard(payload: &VCardPayload) -> Result<String> {
    require(&payload.first_name, ErrorCode::InvalidVcard, "first_name")?;
    require(&payload.last_name, ErrorCode::InvalidVcard, "last_name")?;

    let mut out = String::from("BEGIN:VCARD\nVERSION:3.0\n");
    out.push_str(&format!("N:{};{}\n", payload.last_name, payload.first_name));
    out.push_str(&format!("FN:{} {}\n", payload.first_name, payload.last_name));

    let address = if payload.address.is_empty() {
        String::new()
    } else {
        format!(";;{};;;;", payload.address)
    };
    push_present(
        &mut out,
        &[
            ("BDAY:", payload.birthday.as_str()),
            ("EMAIL:", payload.email.as_str()),
            ("TEL;TYPE=VOICE:", payload.phone.as_str()),
            ("TEL;TYPE=CELL:", payload.mobile.as_str()),
            ("ORG:", payload.organization.as_str()),
            ("TITLE:", payload.job_title.as_str()),
            ("ADR;TYPE=HOME:", address.as_str()),
            ("LABEL;TYPE=HOME:", payload.label.as_str()),
            ("URL:", payload.url.as_str()),
            ("NOTE:", payload.note.as_str()),
        ],
        "\n",
    );
    out.push_str("END:VCARD");
    Ok(out)
}

/// `MECARD:` + present-only `KEY:value;` segments + a closing `;`.
pub fn format_mecard(payload: &MeCardPayload) -> Result<String> {
    require(&payload.name, ErrorCode::InvalidParameters, "name")?;

    let mut out = String::from("MECARD:");
    push_present(
        &mut out,
        &[
            ("N:", payload.name.as_str()),
            ("SOUND:", payload.reading.as_str()),
            ("TEL:", payload.tel.as_str()),
            ("EMAIL:", payload.email.as_str()),
            ("NOTE:", payload.memo.as_str()),
            ("BDAY:", payload.birthday.as_str()),
            ("ADR:", payload.address.as_str()),
            ("URL:", payload.url.as_str()),
            ("NICKNAME:", payload.nickname.as_str()),
        ],
        ";",
    );
    out.push(';');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> VCardPayload {
        VCardPayload {
            first_name: "John".into(),
            last_name: "Doe".into(),
            mobile: "1234567890".into(),
            email: "john@example.com".into(),
            ..VCardPayload::default()
        }
    }

    #[test]
    fn vcard_minimal_contact() {
        let card = format_vcard(&john()).unwrap();
        assert_eq!(
            card,
            "BEGIN:VCARD\nVERSION:3.0\nN:Doe;John\nFN:John Doe\n\
             EMAIL:john@example.com\nTEL;TYPE=CELL:1234567890\nEND:VCARD"
        );
    }

    #[test]
    fn vcard_optional_lines_keep_their_order() {
        let payload = VCardPayload {
            birthday: "19900101".into(),
            phone: "555".into(),
            organization: "Acme".into(),
            job_title: "Engineer".into(),
            address: "1 Main St".into(),
            label: "Home".into(),
            url: "https://example.com".into(),
            note: "Hi".into(),
            ..john()
        };
        let card = format_vcard(&payload).unwrap();
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(
            lines,
            vec![
                "BEGIN:VCARD",
                "VERSION:3.0",
                "N:Doe;John",
                "FN:John Doe",
                "BDAY:19900101",
                "EMAIL:john@example.com",
                "TEL;TYPE=VOICE:555",
                "TEL;TYPE=CELL:1234567890",
                "ORG:Acme",
                "TITLE:Engineer",
                "ADR;TYPE=HOME:;;1 Main St;;;;",
                "LABEL;TYPE=HOME:Home",
                "URL:https://example.com",
                "NOTE:Hi",
                "END:VCARD",
            ]
        );
    }

    #[test]
    fn vcard_without_mobile_or_email_still_formats() {
        let payload = VCardPayload {
            first_name: "Jane".into(),
            last_name: "Roe".into(),
            ..VCardPayload::default()
        };
        let card = format_vcard(&payload).unwrap();
        assert!(!card.contains("EMAIL"));
        assert!(!card.contains("TEL"));
    }

    #[test]
    fn vcard_requires_both_names() {
        let err = format_vcard(&VCardPayload {
            first_name: "John".into(),
            ..VCardPayload::default()
        })
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidVcard);
        assert_eq!(err.field(), "last_name");
    }

    #[test]
    fn vcard_deserializes_prefixed_field_names() {
        let payload: VCardPayload = serde_json::from_str(
            r#"{"first_name":"John","last_name":"Doe","vcard_mobile":"1","vcard_email":"j@x.io"}"#,
        )
        .unwrap();
        assert_eq!(payload.mobile, "1");
        assert_eq!(payload.email, "j@x.io");
    }

    #[test]
    fn mecard_present_fields_only() {
        let payload = MeCardPayload {
            name: "Doe,John".into(),
            tel: "1234".into(),
            email: "john@example.com".into(),
            nickname: "JD".into(),
            ..MeCardPayload::default()
        };
        assert_eq!(
            format_mecard(&payload).unwrap(),
            "MECARD:N:Doe,John;TEL:1234;EMAIL:john@example.com;NICKNAME:JD;;"
        );
    }

    #[test]
    fn mecard_full_order() {
        let payload = MeCardPayload {
            name: "N".into(),
            reading: "S".into(),
            tel: "T".into(),
            email: "E".into(),
            memo: "M".into(),
            birthday: "B".into(),
            address: "A".into(),
            url: "U".into(),
            nickname: "K".into(),
        };
        assert_eq!(
            format_mecard(&payload).unwrap(),
            "MECARD:N:N;SOUND:S;TEL:T;EMAIL:E;NOTE:M;BDAY:B;ADR:A;URL:U;NICKNAME:K;;"
        );
    }
}
