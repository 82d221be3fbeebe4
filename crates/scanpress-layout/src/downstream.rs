//! Boundary to the next pipeline stage
//!
//! The layout stage never renders anything itself. It hands a
//! [`LayoutOutput`] to whichever stage comes next and lets that stage
//! decide what to do with it: perform real work, or merely judge whether
//! its own cached output is still valid for these parameters.

use crate::alignment::Alignment;
use crate::params::Params;
use scanpress_core::geometry::{MarginsF, RectF, SizeF};
use scanpress_core::page::PageInfo;
use scanpress_core::pipeline::{TaskStatus, Validity};
use scanpress_core::units::{Unit, UnitsConverter};
use serde::{Deserialize, Serialize};

/// Everything the layout stage passes downstream for one page
///
/// The content rectangle is always concrete: pages whose content box has
/// not been detected yet get the full page substituted, so downstream
/// never has to interpret an undefined box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOutput {
    pub hard_margins_mm: MarginsF,
    /// Content rectangle grown by the hard margins, in page-local pixels
    pub page_rect: RectF,
    /// Content rectangle in page-local pixels (full page when undetected)
    pub content_rect: RectF,
    /// Physical content size, when a content box has been detected
    pub content_size_mm: Option<SizeF>,
    pub alignment: Alignment,
    pub auto_margins: bool,
}

impl LayoutOutput {
    /// Derive the stage output from a stored record and page metadata
    ///
    /// This is the one code path both task kinds share. The interactive
    /// task persists what it derives; the cache-driven task only compares.
    /// Keeping the derivation in one place is what makes the two
    /// decision-equivalent.
    #[must_use]
    pub fn from_params(params: &Params, page: &PageInfo) -> Self {
        let content_rect = params.content_rect().unwrap_or_else(|| page.full_rect());

        let margins = params.hard_margins_mm();
        let converter = UnitsConverter::new(page.dpi);
        let (left_px, top_px) =
            converter.convert((margins.left, margins.top), Unit::Millimetres, Unit::Pixels);
        let (right_px, bottom_px) =
            converter.convert((margins.right, margins.bottom), Unit::Millimetres, Unit::Pixels);
        let page_rect = content_rect.adjusted(left_px, top_px, right_px, bottom_px);

        Self {
            hard_margins_mm: margins,
            page_rect,
            content_rect,
            content_size_mm: params.content_size_mm(),
            alignment: params.alignment(),
            auto_margins: params.auto_margins(),
        }
    }
}

/// Capability set exposed by the next pipeline stage
///
/// Both task kinds of the next stage, behind one object: `process` does
/// that stage's real work, `check_cached` only answers whether its cached
/// output is still valid given this layout. A stage further down the
/// pipeline is reached the same way, from inside the next stage's own
/// implementations.
pub trait DownstreamStage: Send + Sync {
    /// Run the next stage's interactive task for this page
    fn process(&self, page: &PageInfo, layout: &LayoutOutput, debug: bool) -> TaskStatus;

    /// Run the next stage's cache-driven validity check for this page
    fn check_cached(&self, page: &PageInfo, layout: &LayoutOutput) -> Validity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanpress_core::geometry::MarginsF;
    use scanpress_core::page::PageId;
    use scanpress_core::units::Dpi;

    fn page() -> PageInfo {
        PageInfo::new(
            PageId::single("page.tif"),
            Dpi::square(254.0),
            SizeF::new(2540.0, 2540.0),
        )
    }

    #[test]
    fn undetected_content_box_falls_back_to_full_page() {
        let params = Params::new(MarginsF::default(), Alignment::default(), false);
        let output = LayoutOutput::from_params(&params, &page());
        assert_eq!(output.content_rect, RectF::new(0.0, 0.0, 2540.0, 2540.0));
        assert!(output.content_size_mm.is_none());
    }

    #[test]
    fn page_rect_grows_content_by_margins_in_pixels() {
        // 25.4 mm at 254 dpi is 254 px on each side.
        let params = Params::new(MarginsF::uniform(25.4), Alignment::default(), false)
            .with_content_box(RectF::new(254.0, 254.0, 1000.0, 1000.0), SizeF::new(100.0, 100.0));
        let output = LayoutOutput::from_params(&params, &page());
        assert_eq!(output.page_rect, RectF::new(0.0, 0.0, 1508.0, 1508.0));
    }
}
