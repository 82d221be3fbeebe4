//! Page identity and per-page metadata
//!
//! A [`PageId`] is the durable key a project uses to refer to one logical
//! page. It survives across sessions; it only changes when the project is
//! relinked (source files moved or renamed), and after relinking no key is
//! ever reused for a different physical page.

use crate::geometry::{RectF, SizeF};
use crate::units::{Dpi, Unit, UnitsConverter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identity of one source image within the project
///
/// `frame` distinguishes pages inside multi-frame containers (e.g. a
/// multi-page TIFF); plain single-image files use frame 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId {
    pub path: PathBuf,
    pub frame: u32,
}

impl ImageId {
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, frame: u32) -> Self {
        Self {
            path: path.into(),
            frame,
        }
    }
}

/// Which half of a split scan a page refers to
///
/// A two-page spread scanned as one image yields a `Left` and a `Right`
/// page sharing the same [`ImageId`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SubPage {
    #[default]
    Single,
    Left,
    Right,
}

/// Durable identity of one logical page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId {
    pub image: ImageId,
    pub sub_page: SubPage,
}

impl PageId {
    #[inline]
    #[must_use]
    pub fn new(image: ImageId, sub_page: SubPage) -> Self {
        Self { image, sub_page }
    }

    /// Single-page identity for a plain one-image file
    #[inline]
    #[must_use]
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::new(ImageId::new(path, 0), SubPage::Single)
    }
}

/// What a pipeline stage knows about a page before doing any work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub id: PageId,
    pub dpi: Dpi,
    /// Page image dimensions in pixels
    pub size_px: SizeF,
}

impl PageInfo {
    #[inline]
    #[must_use]
    pub fn new(id: PageId, dpi: Dpi, size_px: SizeF) -> Self {
        Self { id, dpi, size_px }
    }

    /// Full-page rectangle in page-local coordinates
    #[inline]
    #[must_use]
    pub fn full_rect(&self) -> RectF {
        RectF::from_size(self.size_px)
    }
}

/// Ordered snapshot of the project's pages, in reading order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSequence {
    pages: Vec<PageInfo>,
}

impl PageSequence {
    #[inline]
    #[must_use]
    pub fn new(pages: Vec<PageInfo>) -> Self {
        Self { pages }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PageInfo> {
        self.pages.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: &PageId) -> bool {
        self.pages.iter().any(|p| &p.id == id)
    }
}

impl<'a> IntoIterator for &'a PageSequence {
    type Item = &'a PageInfo;
    type IntoIter = std::slice::Iter<'a, PageInfo>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Mapping from page-local coordinates back to physical distances
///
/// Earlier pipeline stages may have scaled the page image; the transform
/// records the per-axis scale from page-local pixels back to original
/// pixels, and the original scan resolution. Together these turn a
/// page-local rectangle into a physical size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageTransform {
    dpi: Dpi,
    x_scale: f64,
    y_scale: f64,
}

impl PageTransform {
    #[inline]
    #[must_use]
    pub const fn new(dpi: Dpi, x_scale: f64, y_scale: f64) -> Self {
        Self {
            dpi,
            x_scale,
            y_scale,
        }
    }

    /// Transform for a page whose coordinates are original pixels
    #[inline]
    #[must_use]
    pub const fn identity(dpi: Dpi) -> Self {
        Self::new(dpi, 1.0, 1.0)
    }

    #[inline]
    #[must_use]
    pub const fn dpi(&self) -> Dpi {
        self.dpi
    }

    /// Physical size in millimetres of a page-local rectangle
    #[must_use]
    pub fn rect_size_mm(&self, rect: &RectF) -> SizeF {
        let original_px = SizeF::new(rect.width * self.x_scale, rect.height * self.y_scale);
        UnitsConverter::new(self.dpi).convert_size(original_px, Unit::Pixels, Unit::Millimetres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_uses_dpi_only() {
        let xform = PageTransform::identity(Dpi::square(254.0));
        // 254 px at 254 dpi is one inch on each axis.
        let size = xform.rect_size_mm(&RectF::new(0.0, 0.0, 254.0, 254.0));
        assert!((size.width - 25.4).abs() < 1e-9);
        assert!((size.height - 25.4).abs() < 1e-9);
    }

    #[test]
    fn scaled_transform_maps_back_to_original_pixels() {
        // Page-local coordinates are half-size: 2x scale back to original.
        let xform = PageTransform::new(Dpi::square(300.0), 2.0, 2.0);
        let half = xform.rect_size_mm(&RectF::new(0.0, 0.0, 150.0, 150.0));
        let full = PageTransform::identity(Dpi::square(300.0))
            .rect_size_mm(&RectF::new(0.0, 0.0, 300.0, 300.0));
        assert_eq!(half, full);
    }

    #[test]
    fn page_id_ordering_is_stable() {
        let a = PageId::new(ImageId::new("a.tif", 0), SubPage::Left);
        let b = PageId::new(ImageId::new("a.tif", 0), SubPage::Right);
        let c = PageId::new(ImageId::new("b.tif", 0), SubPage::Single);
        assert!(a < b && b < c);
    }

    #[test]
    fn page_id_survives_json() {
        let id = PageId::new(ImageId::new("scans/spread.tif", 3), SubPage::Right);
        let json = serde_json::to_string(&id).unwrap();
        let restored: PageId = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, id);
    }
}
