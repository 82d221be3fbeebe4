//! Interactive layout task
//!
//! The work unit built by [`LayoutStage::create_task`]. Executing it does
//! the real per-page layout work: make sure the page has parameters,
//! ingest the content box detected upstream, derive the stage output, and
//! hand control to the next stage.
//!
//! [`LayoutStage::create_task`]: crate::stage::LayoutStage::create_task

use crate::defaults::DefaultLayoutParams;
use crate::downstream::{DownstreamStage, LayoutOutput};
use crate::params::Params;
use crate::settings::Settings;
use scanpress_core::geometry::RectF;
use scanpress_core::page::{PageId, PageInfo, PageTransform};
use scanpress_core::pipeline::{TaskStatus, Validity};
use std::sync::Arc;

/// What executing a [`LayoutTask`] produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Batch chain: the downstream interactive task ran to completion
    Completed,
    /// Batch chain: the downstream interactive task was abandoned
    Cancelled,
    /// Interactive chain: downstream only verified its cached output
    Verified(Validity),
}

/// Interactive work unit for one page
pub struct LayoutTask {
    settings: Arc<Settings>,
    defaults: DefaultLayoutParams,
    page_id: PageId,
    next: Arc<dyn DownstreamStage>,
    batch: bool,
    debug: bool,
}

impl LayoutTask {
    pub(crate) fn new(
        settings: Arc<Settings>,
        defaults: DefaultLayoutParams,
        page_id: PageId,
        next: Arc<dyn DownstreamStage>,
        batch: bool,
        debug: bool,
    ) -> Self {
        Self {
            settings,
            defaults,
            page_id,
            next,
            batch,
            debug,
        }
    }

    /// The page this task was built for
    #[inline]
    #[must_use]
    pub fn page_id(&self) -> &PageId {
        &self.page_id
    }

    /// Perform the layout work for this page and chain downstream
    ///
    /// `content_rect` is the content box the detection stage produced for
    /// this run, if any; it is recorded in the store together with its
    /// millimetre size derived through `xform`. In batch mode control
    /// passes to the downstream interactive task; in an editing session
    /// the downstream stage only re-checks its cached output.
    pub fn execute(
        &self,
        page: &PageInfo,
        xform: &PageTransform,
        content_rect: Option<RectF>,
    ) -> TaskOutcome {
        debug_assert_eq!(page.id, self.page_id);

        if let Some(rect) = content_rect {
            let size_mm = xform.rect_size_mm(&rect);
            // Populate before recording: a content box cannot attach to a
            // page that has no base record.
            self.ensure_params(page);
            self.settings.set_content_size_mm(&self.page_id, rect, size_mm);
        }

        let params = self.ensure_params(page);
        let output = LayoutOutput::from_params(&params, page);

        if self.debug {
            log::debug!(
                "layout for {:?}: content {:?} -> page {:?}, margins {:?}",
                self.page_id,
                output.content_rect,
                output.page_rect,
                output.hard_margins_mm
            );
        }

        if self.batch {
            match self.next.process(page, &output, self.debug) {
                TaskStatus::Completed => TaskOutcome::Completed,
                TaskStatus::Cancelled => TaskOutcome::Cancelled,
            }
        } else {
            // The user is editing this stage; keep the derived page
            // rectangle in the store for the widget and the thumbnails.
            self.settings
                .set_page_params(self.page_id.clone(), params.with_page_rect(output.page_rect));
            TaskOutcome::Verified(self.next.check_cached(page, &output))
        }
    }

    /// Fetch the page's record, populating defaults first if absent
    fn ensure_params(&self, page: &PageInfo) -> Params {
        if let Some(params) = self.settings.page_params(&self.page_id) {
            return params;
        }
        let params = self.defaults.params_for(page.dpi);
        log::debug!("populated default layout params for {:?}", self.page_id);
        self.settings.set_page_params(self.page_id.clone(), params.clone());
        params
    }
}
