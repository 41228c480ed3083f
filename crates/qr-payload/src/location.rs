//! Geo URIs and Bitcoin payment URIs.

use qr_types::ErrorCode;
use serde::{Deserialize, Serialize};

use crate::fields::{format_float, query_string, require};
use crate::{PayloadError, Result};

/// Highest zoom level map apps accept in a `geo:` URI.
pub const MAX_ZOOM: u8 = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPayload {
    pub latitude: f64,
    pub longitude: f64,
    /// `0` leaves the zoom to the map app.
    #[serde(default)]
    pub zoom: u8,
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BitcoinPayload {
    pub address: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub message: String,
}

/// `geo:<lat>,<lon>[?z=<zoom>][&q=<query>]`
pub fn format_geo(payload: &GeoPayload) -> Result<String> {
    check_coordinate("latitude", payload.latitude, 90.0)?;
    check_coordinate("longitude", payload.longitude, 180.0)?;
    if payload.zoom > MAX_ZOOM {
        return Err(PayloadError::OutOfRange {
            code: ErrorCode::InvalidGeo,
            field: "zoom",
            reason: format!("must be between 0 and {MAX_ZOOM}"),
        });
    }

    let zoom = if payload.zoom > 0 {
        payload.zoom.to_string()
    } else {
        String::new()
    };
    let params = query_string(&[("z", zoom.as_str()), ("q", payload.query.as_str())]);

    Ok(format!(
        "geo:{},{}{params}",
        format_float(payload.latitude),
        format_float(payload.longitude)
    ))
}

/// `bitcoin:<address>[?amount=..][&label=..][&message=..]`
pub fn format_bitcoin(payload: &BitcoinPayload) -> Result<String> {
    require(&payload.address, ErrorCode::InvalidBitcoin, "address")?;

    let amount = match payload.amount {
        Some(amount) if !amount.is_finite() || amount < 0.0 => {
            return Err(PayloadError::OutOfRange {
                code: ErrorCode::InvalidBitcoin,
                field: "amount",
                reason: "must be a non-negative number".into(),
            });
        }
        Some(amount) => format_float(amount),
        None => String::new(),
    };
    let params = query_string(&[
        ("amount", amount.as_str()),
        ("label", payload.label.as_str()),
        ("message", payload.message.as_str()),
    ]);

    Ok(format!("bitcoin:{}{params}", payload.address))
}

fn check_coordinate(field: &'static str, value: f64, limit: f64) -> Result<()> {
    if !value.is_finite() || value.abs() > limit {
        tracing::warn!(field, value, "Rejected coordinate");
        return Err(PayloadError::OutOfRange {
            code: ErrorCode::InvalidGeo,
            field,
            reason: format!("must be between -{limit} and {limit}"),
        });
    }
    Ok(())
}
