//! Page-layout (margins) stage for the scanpress pipeline
//!
//! This stage decides how much blank space surrounds the detected content
//! of every scanned page and where the content sits inside the resulting
//! output page. It keeps one parameter record per page in a shared store,
//! populates records lazily from unit-aware project defaults, persists
//! everything into the project file, and survives relinking when source
//! images move.
//!
//! Downstream stages never recompute layout to find out whether their own
//! cached output is still good: the stage exposes an interactive task
//! that does real work and a cache-driven task that only verifies, both
//! guaranteed to reach the same conclusion from the same store state.
//!
//! ## Examples
//!
//! ```rust
//! use scanpress_core::geometry::MarginsF;
//! use scanpress_core::units::Unit;
//! use scanpress_layout::{DefaultLayoutParams, LayoutStage};
//!
//! let defaults = DefaultLayoutParams::new()
//!     .with_hard_margins(MarginsF::uniform(0.5), Unit::Inches);
//! let stage = LayoutStage::new(defaults);
//! assert_eq!(stage.name(), "margins");
//! ```

pub mod alignment;
pub mod cache_task;
pub mod defaults;
pub mod downstream;
pub mod error;
pub mod guide;
pub mod ordering;
pub mod params;
pub mod settings;
pub mod stage;
pub mod task;

// Re-export main types
pub use alignment::{Alignment, HAlign, VAlign};
pub use cache_task::LayoutCacheDrivenTask;
pub use defaults::DefaultLayoutParams;
pub use downstream::{DownstreamStage, LayoutOutput};
pub use error::{LayoutError, Result};
pub use guide::{Guide, Orientation};
pub use ordering::{PageOrderOption, PageOrderProvider};
pub use params::Params;
pub use settings::Settings;
pub use stage::LayoutStage;
pub use task::{LayoutTask, TaskOutcome};

/// Pipeline identifier of this stage, as reported in staleness verdicts
pub const STAGE_NAME: &str = "page-layout";
