//! Core vocabulary for the scanpress page-processing pipeline
//!
//! Every pipeline stage builds on the same small set of types: page
//! identities and metadata, page-local geometry, DPI-aware unit
//! conversion, the interfaces the hosting project implements, and the
//! interactive/cache-driven task vocabulary.
//!
//! ## Examples
//!
//! Convert a pixel distance to millimetres for a specific page:
//!
//! ```rust
//! use scanpress_core::units::{Dpi, Unit, UnitsConverter};
//!
//! let converter = UnitsConverter::new(Dpi::square(300.0));
//! let (x_mm, y_mm) = converter.convert((300.0, 600.0), Unit::Pixels, Unit::Millimetres);
//! assert!((x_mm - 25.4).abs() < 1e-9);
//! assert!((y_mm - 50.8).abs() < 1e-9);
//! ```

pub mod geometry;
pub mod page;
pub mod pipeline;
pub mod project;
pub mod units;

// Re-export main types
pub use geometry::{MarginsF, RectF, SizeF};
pub use page::{ImageId, PageId, PageInfo, PageSequence, PageTransform, SubPage};
pub use pipeline::{TaskStatus, Validity};
pub use project::{ProjectPages, ProjectReader, ProjectWriter, Relinker};
pub use units::{Dpi, Unit, UnitsConverter};
