//! Measurement units and DPI-aware conversion
//!
//! Layout parameters are configured in whatever unit the user prefers but
//! are always stored in millimetres. Converting from device pixels is a
//! per-page affair: the same pixel count corresponds to different physical
//! distances depending on the page's scan resolution, so the converter is
//! built around a concrete [`Dpi`] rather than a global factor table.

use crate::geometry::SizeF;
use serde::{Deserialize, Serialize};

const MM_PER_INCH: f64 = 25.4;
const MM_PER_CM: f64 = 10.0;

/// Measurement unit for user-configured distances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Pixels,
    #[default]
    Millimetres,
    Centimetres,
    Inches,
}

impl std::fmt::Display for Unit {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pixels => "px",
            Self::Millimetres => "mm",
            Self::Centimetres => "cm",
            Self::Inches => "in",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "px" | "pixels" => Ok(Self::Pixels),
            "mm" | "millimetres" | "millimeters" => Ok(Self::Millimetres),
            "cm" | "centimetres" | "centimeters" => Ok(Self::Centimetres),
            "in" | "inch" | "inches" => Ok(Self::Inches),
            _ => Err(format!("unknown unit: '{s}'")),
        }
    }
}

/// Scan resolution in dots per inch, per axis
///
/// Scanners routinely produce different horizontal and vertical
/// resolutions, so the two axes are kept separate throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dpi {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Dpi {
    #[inline]
    #[must_use]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Same resolution on both axes
    #[inline]
    #[must_use]
    pub const fn square(dpi: f64) -> Self {
        Self::new(dpi, dpi)
    }
}

/// Converts (x, y) distance pairs between units for one specific page
///
/// Pixel conversions divide or multiply by the page's own DPI per axis;
/// all other conversions are resolution-independent factor conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitsConverter {
    dpi: Dpi,
}

impl UnitsConverter {
    #[must_use]
    pub fn new(dpi: Dpi) -> Self {
        if dpi.horizontal <= 0.0 || dpi.vertical <= 0.0 {
            log::warn!(
                "non-positive dpi {:?}; pixel conversions degrade to identity on the bad axis",
                dpi
            );
        }
        Self { dpi }
    }

    /// Convert a horizontal/vertical distance pair from one unit to another
    #[must_use]
    pub fn convert(&self, (x, y): (f64, f64), from: Unit, to: Unit) -> (f64, f64) {
        if from == to {
            return (x, y);
        }
        let mm = (to_mm(x, from, self.dpi.horizontal), to_mm(y, from, self.dpi.vertical));
        (
            from_mm(mm.0, to, self.dpi.horizontal),
            from_mm(mm.1, to, self.dpi.vertical),
        )
    }

    /// Convert a size from one unit to another
    #[inline]
    #[must_use]
    pub fn convert_size(&self, size: SizeF, from: Unit, to: Unit) -> SizeF {
        let (width, height) = self.convert((size.width, size.height), from, to);
        SizeF::new(width, height)
    }
}

fn to_mm(value: f64, from: Unit, axis_dpi: f64) -> f64 {
    match from {
        Unit::Millimetres => value,
        Unit::Centimetres => value * MM_PER_CM,
        Unit::Inches => value * MM_PER_INCH,
        Unit::Pixels => {
            if axis_dpi <= 0.0 {
                value
            } else {
                value * MM_PER_INCH / axis_dpi
            }
        }
    }
}

fn from_mm(value: f64, to: Unit, axis_dpi: f64) -> f64 {
    match to {
        Unit::Millimetres => value,
        Unit::Centimetres => value / MM_PER_CM,
        Unit::Inches => value / MM_PER_INCH,
        Unit::Pixels => {
            if axis_dpi <= 0.0 {
                value
            } else {
                value * axis_dpi / MM_PER_INCH
            }
        }
    }
}
