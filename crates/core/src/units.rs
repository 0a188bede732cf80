//! Length and volume unit conversions.
//!
//! The engine works in feet internally. Volumes are reported in cubic metres
//! (CBM), rounded to six decimals so that independent implementations agree
//! on capacity comparisons.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cubic feet in one cubic metre.
pub const CUBIC_FEET_PER_CUBIC_METER: f64 = 35.3147;

/// Decimal places kept for CBM values.
pub const CBM_DECIMALS: i32 = 6;

/// Rounds `value` to `decimals` places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Converts a box given in feet to cubic metres.
///
/// Returns `0.0` if any dimension is zero.
pub fn cubic_feet_to_cbm(length: f64, width: f64, height: f64) -> f64 {
    if length == 0.0 || width == 0.0 || height == 0.0 {
        return 0.0;
    }
    round_to(
        length * width * height / CUBIC_FEET_PER_CUBIC_METER,
        CBM_DECIMALS,
    )
}

/// Unit in which package dimensions are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LengthUnit {
    /// Centimetres (catalog id 1).
    #[cfg_attr(feature = "serde", serde(alias = "cm"))]
    Centimeter,
    /// Inches (catalog id 2).
    #[cfg_attr(feature = "serde", serde(alias = "in"))]
    Inch,
    /// Feet (catalog id 3).
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "ft"))]
    Foot,
    /// Metres (catalog id 4).
    #[cfg_attr(feature = "serde", serde(alias = "m"))]
    Meter,
    /// Millimetres (catalog id 5).
    #[cfg_attr(feature = "serde", serde(alias = "mm"))]
    Millimeter,
}

impl LengthUnit {
    /// Maps a calculation-unit id from the enquiry catalog.
    ///
    /// Unknown ids are treated as feet, i.e. values pass through unchanged.
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Self::Centimeter,
            2 => Self::Inch,
            4 => Self::Meter,
            5 => Self::Millimeter,
            _ => Self::Foot,
        }
    }

    /// Converts a length in this unit to feet.
    pub fn to_feet(self, value: f64) -> f64 {
        match self {
            Self::Centimeter => value / 30.48,
            Self::Inch => value / 12.0,
            Self::Foot => value,
            Self::Meter => value * 3.28084,
            Self::Millimeter => value / 304.8,
        }
    }
}
