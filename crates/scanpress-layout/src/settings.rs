//! The per-project layout parameter store
//!
//! [`Settings`] is the single source of truth for the layout stage: a map
//! from durable page identity to [`Params`], plus the project-wide guides
//! and the middle-rectangle display flag. It is shared as `Arc<Settings>`
//! between the stage facade, every task built for a page, and the editing
//! widget, so all state lives behind one coarse lock.
//!
//! Records are replaced whole, never patched in place. Combined with the
//! lock this means a reader either sees the previous record or the next
//! one, and an abandoned task chain cannot leave a half-written record
//! behind.

use crate::alignment::Alignment;
use crate::guide::Guide;
use crate::params::Params;
use scanpress_core::geometry::{MarginsF, RectF, SizeF};
use scanpress_core::page::{PageId, PageSequence};
use scanpress_core::project::Relinker;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    per_page: HashMap<PageId, Params>,
    guides: Vec<Guide>,
    show_middle_rect: bool,
}

/// Keyed store of per-page layout parameters plus project-wide state
#[derive(Debug, Default)]
pub struct Settings {
    state: Mutex<State>,
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, State> {
        // Every mutation leaves the state consistent, so a poisoned lock
        // still guards valid data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current record for a page, if one has been assigned
    #[must_use]
    pub fn page_params(&self, page_id: &PageId) -> Option<Params> {
        self.locked().per_page.get(page_id).cloned()
    }

    /// Whether a page has no record yet and needs default population
    #[must_use]
    pub fn is_params_null(&self, page_id: &PageId) -> bool {
        !self.locked().per_page.contains_key(page_id)
    }

    /// Install or replace a page's record wholesale
    pub fn set_page_params(&self, page_id: PageId, params: Params) {
        log::debug!("layout params set for {page_id:?}");
        self.locked().per_page.insert(page_id, params);
    }

    /// Record the detected content box and its derived millimetre size
    ///
    /// No-op when the page has no base record yet: a content box is
    /// meaningless without margins and alignment, and the page will pick
    /// one up after default population runs.
    pub fn set_content_size_mm(&self, page_id: &PageId, content_rect: RectF, size_mm: SizeF) {
        let mut state = self.locked();
        if let Some(params) = state.per_page.get(page_id) {
            let updated = params.clone().with_content_box(content_rect, size_mm);
            state.per_page.insert(page_id.clone(), updated);
        } else {
            log::debug!("content box for {page_id:?} ignored: no base record");
        }
    }

    /// Drop a page's derived content size after upstream re-detection
    ///
    /// The content rectangle is cleared along with the size: the stored
    /// rect is exactly the value that can no longer be trusted. Margins
    /// and alignment survive.
    pub fn invalidate_content_size(&self, page_id: &PageId) {
        let mut state = self.locked();
        if let Some(params) = state.per_page.get(page_id) {
            log::debug!("content size invalidated for {page_id:?}");
            let updated = params.clone().without_content_box();
            state.per_page.insert(page_id.clone(), updated);
        }
    }

    /// Hard margins for a page, if a record exists
    #[must_use]
    pub fn hard_margins_mm(&self, page_id: &PageId) -> Option<MarginsF> {
        self.locked().per_page.get(page_id).map(Params::hard_margins_mm)
    }

    /// Replace a page's hard margins; no-op without a base record
    pub fn set_hard_margins_mm(&self, page_id: &PageId, margins: MarginsF) {
        let mut state = self.locked();
        if let Some(params) = state.per_page.get(page_id) {
            let updated = params.clone().with_hard_margins_mm(margins);
            state.per_page.insert(page_id.clone(), updated);
        }
    }

    /// Alignment for a page, if a record exists
    #[must_use]
    pub fn page_alignment(&self, page_id: &PageId) -> Option<Alignment> {
        self.locked().per_page.get(page_id).map(Params::alignment)
    }

    /// Replace a page's alignment; no-op without a base record
    pub fn set_page_alignment(&self, page_id: &PageId, alignment: Alignment) {
        let mut state = self.locked();
        if let Some(params) = state.per_page.get(page_id) {
            let updated = params.clone().with_alignment(alignment);
            state.per_page.insert(page_id.clone(), updated);
        }
    }

    /// Prune records whose pages are no longer in the project
    ///
    /// Called when the stage becomes active, to reconcile against project
    /// changes made while it was not watching.
    pub fn remove_pages_missing_from(&self, pages: &PageSequence) {
        let mut state = self.locked();
        let before = state.per_page.len();
        state.per_page.retain(|id, _| pages.contains(id));
        let dropped = before - state.per_page.len();
        if dropped > 0 {
            log::debug!("pruned {dropped} layout record(s) for removed pages");
        }
    }

    /// The readiness gate: does every page have its parameters?
    ///
    /// A record's presence implies hard margins and alignment are defined.
    /// The content size is deliberately not required: the output stage
    /// falls back to the full page when no content box exists.
    #[must_use]
    pub fn check_everything_defined(
        &self,
        pages: &PageSequence,
        ignore: Option<&PageId>,
    ) -> bool {
        let state = self.locked();
        pages
            .iter()
            .filter(|info| Some(&info.id) != ignore)
            .all(|info| state.per_page.contains_key(&info.id))
    }

    /// Rewrite every record's key through an identity remapping
    ///
    /// Values are never touched. Keys the relinker does not map are
    /// dropped: those pages no longer exist. The replacement map is built
    /// completely before it is swapped in, so a panicking relinker cannot
    /// leave the store half-remapped. Guides and the middle-rect flag are
    /// not keyed by page and stay as they are.
    pub fn perform_relinking(&self, relinker: &dyn Relinker) {
        let mut state = self.locked();
        let remapped: HashMap<PageId, Params> = state
            .per_page
            .iter()
            .filter_map(|(old, params)| {
                relinker.remap(old).map(|new| (new, params.clone()))
            })
            .collect();
        log::debug!(
            "relinked layout store: {} -> {} record(s)",
            state.per_page.len(),
            remapped.len()
        );
        state.per_page = remapped;
    }

    /// Remove all per-page records and project-wide state
    pub fn clear(&self) {
        let mut state = self.locked();
        state.per_page.clear();
        state.guides.clear();
        state.show_middle_rect = false;
    }

    /// Snapshot of the project-wide guides, in order
    #[must_use]
    pub fn guides(&self) -> Vec<Guide> {
        self.locked().guides.clone()
    }

    /// Replace the guide list wholesale
    pub fn set_guides(&self, guides: Vec<Guide>) {
        self.locked().guides = guides;
    }

    /// Append one guide
    pub fn add_guide(&self, guide: Guide) {
        self.locked().guides.push(guide);
    }

    #[must_use]
    pub fn is_showing_middle_rect_enabled(&self) -> bool {
        self.locked().show_middle_rect
    }

    pub fn enable_showing_middle_rect(&self, enabled: bool) {
        self.locked().show_middle_rect = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanpress_core::page::PageId;

    fn record() -> Params {
        Params::new(MarginsF::uniform(10.0), Alignment::default(), false)
    }

    #[test]
    fn content_box_without_base_record_is_a_no_op() {
        let settings = Settings::new();
        let id = PageId::single("orphan.tif");
        settings.set_content_size_mm(&id, RectF::new(0.0, 0.0, 10.0, 10.0), SizeF::new(1.0, 1.0));
        assert!(settings.page_params(&id).is_none());
    }

    #[test]
    fn invalidation_clears_only_the_content_box() {
        let settings = Settings::new();
        let id = PageId::single("page.tif");
        settings.set_page_params(id.clone(), record());
        settings.set_content_size_mm(&id, RectF::new(5.0, 5.0, 90.0, 90.0), SizeF::new(20.0, 20.0));

        settings.invalidate_content_size(&id);

        let params = settings.page_params(&id).unwrap();
        assert!(params.content_size_mm().is_none());
        assert!(params.content_rect().is_none());
        assert_eq!(params.hard_margins_mm(), MarginsF::uniform(10.0));
        assert_eq!(params.alignment(), Alignment::default());
    }

    #[test]
    fn per_field_setters_require_a_base_record() {
        let settings = Settings::new();
        let id = PageId::single("late.tif");
        settings.set_hard_margins_mm(&id, MarginsF::uniform(3.0));
        settings.set_page_alignment(&id, Alignment::default());
        assert!(settings.page_params(&id).is_none());

        settings.set_page_params(id.clone(), record());
        settings.set_hard_margins_mm(&id, MarginsF::uniform(3.0));
        assert_eq!(
            settings.hard_margins_mm(&id),
            Some(MarginsF::uniform(3.0))
        );
    }
}
