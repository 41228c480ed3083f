//! Style enumerations accepted by the renderer.
//!
//! The string forms are an external contract and are matched exactly,
//! including the `GRADIANT` spelling of the gradient masks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A string that names none of the variants of `kind`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} '{value}'. Valid options are: {options}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub options: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str, options: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            options: options.join(", "),
        }
    }
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownVariant::new($kind, s, &Self::names())),
                }
            }
        }
    };
}

string_enum! {
    /// Shape drawn for every dark module.
    ModuleStyle, "style" {
        #[default]
        Square => "SQUARE_MODULE",
        GappedSquare => "GAPPED_SQUARE_MODULE",
        Circle => "CIRCLE_MODULE",
        Rounded => "ROUNDED_MODULE",
        HorizontalBars => "HORIZONTAL_BARS",
        VerticalBars => "VERTICAL_BARS",
    }
}

string_enum! {
    /// How foreground pixels are colored.
    ColorMask, "color mask" {
        #[default]
        SolidFill => "SOLID_FILL",
        RadialGradiant => "RADIAL_GRADIANT",
        SquareGradiant => "SQUARE_GRADIANT",
        HorizontalGradiant => "HORIZONTAL_GRADIANT",
        VerticalGradiant => "VERTICAL_GRADIANT",
    }
}

string_enum! {
    /// Shape used for the three finder patterns.
    EyeStyle, "eye style" {
        #[default]
        Square => "SQUARE",
        Circle => "CIRCLE",
        Rounded => "ROUNDED",
    }
}

string_enum! {
    /// QR redundancy tier.
    ErrorCorrection, "error correction" {
        #[default]
        Low => "L",
        Medium => "M",
        Quartile => "Q",
        High => "H",
    }
}
