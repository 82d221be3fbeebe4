//! Interfaces implemented by the hosting project
//!
//! Pipeline stages never own the page list. The project supplies ordered
//! snapshots, assigns small numeric IDs during save, resolves them back to
//! durable identities during load, and drives relinking when source files
//! move. Stages depend only on these traits.

use crate::page::{PageId, PageSequence};

/// Source of ordered page snapshots
pub trait ProjectPages {
    /// Authoritative, ordered view of the project's current pages
    fn to_page_sequence(&self) -> PageSequence;
}

/// Save-time services: stable small numeric IDs for every page
///
/// Numeric IDs are a serialization detail. They are only meaningful within
/// one saved document and are re-resolved to [`PageId`]s on load.
pub trait ProjectWriter {
    /// Invoke `f` once per page, in project order, with its numeric ID
    fn enum_pages(&self, f: &mut dyn FnMut(&PageId, i32));
}

/// Load-time services: numeric-ID resolution
pub trait ProjectReader {
    /// Resolve a saved numeric ID back to a durable identity
    ///
    /// Returns `None` for IDs that do not correspond to any current page;
    /// callers drop the associated data.
    fn page_id(&self, numeric_id: i32) -> Option<PageId>;
}

/// Bulk identity remapping when page identities are reassigned
///
/// A relinker is a pure function over the key space. `None` means the old
/// identity has no successor (the page no longer exists) and anything keyed
/// by it should be dropped.
pub trait Relinker {
    fn remap(&self, old: &PageId) -> Option<PageId>;
}

impl<F> Relinker for F
where
    F: Fn(&PageId) -> Option<PageId>,
{
    #[inline]
    fn remap(&self, old: &PageId) -> Option<PageId> {
        self(old)
    }
}
