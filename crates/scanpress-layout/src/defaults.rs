//! Global default layout parameters
//!
//! Defaults are configured once per project, in whatever unit the user
//! prefers. The millimetre values installed into the store are still
//! page-specific: when the configured unit is device pixels, the same
//! pixel count means a different physical margin on every page, so the
//! conversion runs through each page's own DPI.

use crate::alignment::Alignment;
use crate::params::Params;
use scanpress_core::geometry::MarginsF;
use scanpress_core::units::{Dpi, Unit, UnitsConverter};
use serde::{Deserialize, Serialize};

/// Project-wide default margins and alignment for new pages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultLayoutParams {
    units: Unit,
    hard_margins: MarginsF,
    alignment: Alignment,
    auto_margins: bool,
}

impl Default for DefaultLayoutParams {
    fn default() -> Self {
        Self {
            units: Unit::Millimetres,
            hard_margins: MarginsF::uniform(10.0),
            alignment: Alignment::default(),
            auto_margins: false,
        }
    }
}

impl DefaultLayoutParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit the configured margins are expressed in
    #[inline]
    #[must_use]
    pub const fn units(&self) -> Unit {
        self.units
    }

    #[inline]
    #[must_use]
    pub const fn hard_margins(&self) -> MarginsF {
        self.hard_margins
    }

    #[inline]
    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[inline]
    #[must_use]
    pub const fn auto_margins(&self) -> bool {
        self.auto_margins
    }

    /// Configure margins in the given unit
    #[inline]
    #[must_use]
    pub const fn with_hard_margins(mut self, margins: MarginsF, units: Unit) -> Self {
        self.hard_margins = margins;
        self.units = units;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_auto_margins(mut self, auto_margins: bool) -> Self {
        self.auto_margins = auto_margins;
        self
    }

    /// Build the initial record for a page scanned at the given resolution
    ///
    /// Margins are converted from the configured unit into millimetres
    /// through the page's DPI; content and page rectangles start empty.
    #[must_use]
    pub fn params_for(&self, dpi: Dpi) -> Params {
        let converter = UnitsConverter::new(dpi);
        let (left, top) = converter.convert(
            (self.hard_margins.left, self.hard_margins.top),
            self.units,
            Unit::Millimetres,
        );
        let (right, bottom) = converter.convert(
            (self.hard_margins.right, self.hard_margins.bottom),
            self.units,
            Unit::Millimetres,
        );

        Params::new(
            MarginsF::new(left, top, right, bottom),
            self.alignment,
            self.auto_margins,
        )
    }
}
