//! QR matrix construction and module lookups.

use qr_types::ErrorCorrection;
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};
use tracing::debug;

use crate::Result;

/// Size of a finder pattern in modules.
pub const FINDER_SIZE: usize = 7;

const MAX_VERSION: i16 = 40;

pub fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

/// Encode `data` into the smallest symbol that fits, starting at
/// `min_version` when given.
pub fn build_code(data: &str, level: ErrorCorrection, min_version: Option<i16>) -> Result<QrCode> {
    let ec = ec_level(level);
    let Some(start) = min_version else {
        return Ok(QrCode::with_error_correction_level(data.as_bytes(), ec)?);
    };

    for version in start..=MAX_VERSION {
        match QrCode::with_version(data.as_bytes(), Version::Normal(version), ec) {
            Ok(code) => {
                debug!(version, requested = start, "Fitted QR version");
                return Ok(code);
            }
            Err(QrError::DataTooLong) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(QrError::DataTooLong.into())
}

/// Dark/light lookup over a square symbol, without the quiet zone.
#[derive(Debug, Clone)]
pub struct ModuleGrid {
    width: usize,
    dark: Vec<bool>,
}

impl ModuleGrid {
    pub fn from_code(code: &QrCode) -> Self {
        let dark = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        Self {
            width: code.width(),
            dark,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Out-of-range coordinates read as light.
    pub fn is_dark(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    pub fn neighbors(&self, x: usize, y: usize) -> Neighbors {
        let (x, y) = (x as isize, y as isize);
        Neighbors {
            north: self.is_dark(x, y - 1),
            south: self.is_dark(x, y + 1),
            east: self.is_dark(x + 1, y),
            west: self.is_dark(x - 1, y),
        }
    }

    /// Whether the module belongs to one of the three finder patterns.
    pub fn is_finder_module(&self, x: usize, y: usize) -> bool {
        let w = self.width;
        (x < FINDER_SIZE && y < FINDER_SIZE)
            || (x + FINDER_SIZE >= w && y < FINDER_SIZE)
            || (x < FINDER_SIZE && y + FINDER_SIZE >= w)
    }

    /// Dark modules in row-major order.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.dark
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(|(i, _)| (i % self.width, i / self.width))
    }
}

/// Orthogonal neighbours of a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

/// Symbol version number of a built code.
pub fn version_number(code: &QrCode) -> i16 {
    match code.version() {
        Version::Normal(v) | Version::Micro(v) => v,
    }
}
