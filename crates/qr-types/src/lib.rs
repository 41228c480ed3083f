//! Shared vocabulary for QR payload formatting and rendering.
//!
//! Holds the style enumerations accepted by the renderer and the error
//! taxonomy every public entry point reports through.

pub mod error;
pub mod style;

// Re-exports for convenience
pub use error::{ErrorCode, ErrorResult};
pub use style::{ColorMask, ErrorCorrection, EyeStyle, ModuleStyle, UnknownVariant};
