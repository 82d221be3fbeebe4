//! Cache-driven layout task
//!
//! The lightweight counterpart of [`LayoutTask`]: it never computes
//! layout, it only decides from the store whether the page's layout
//! output is already trustworthy, and forwards that question down the
//! pipeline. A whole chain of these answers "is everything still valid?"
//! for a page in time proportional to the number of stages.
//!
//! The contract with [`LayoutTask`] is decision-equivalence: whenever the
//! interactive task would leave output unchanged, this check must report
//! valid, and vice versa. Both derive their [`LayoutOutput`] from the
//! same store state through [`LayoutOutput::from_params`], so the two
//! cannot drift apart.
//!
//! [`LayoutTask`]: crate::task::LayoutTask

use crate::downstream::{DownstreamStage, LayoutOutput};
use crate::settings::Settings;
use crate::STAGE_NAME;
use scanpress_core::page::PageInfo;
use scanpress_core::pipeline::Validity;
use std::sync::Arc;

/// Validity-check unit shared by every page of the project
pub struct LayoutCacheDrivenTask {
    settings: Arc<Settings>,
    next: Arc<dyn DownstreamStage>,
}

impl LayoutCacheDrivenTask {
    pub(crate) fn new(settings: Arc<Settings>, next: Arc<dyn DownstreamStage>) -> Self {
        Self { settings, next }
    }

    /// Judge whether this page's layout output is still valid
    ///
    /// A page with no record needs interactive work before anything
    /// downstream can be judged, so the chain short-circuits here and the
    /// verdict names this stage. Otherwise the stored parameters are
    /// turned into the stage output and the next stage compares them
    /// against whatever it has cached.
    #[must_use]
    pub fn check(&self, page: &PageInfo) -> Validity {
        match self.settings.page_params(&page.id) {
            None => {
                log::debug!("no layout params for {:?}; page needs work", page.id);
                Validity::stale(STAGE_NAME)
            }
            Some(params) => {
                let output = LayoutOutput::from_params(&params, page);
                self.next.check_cached(page, &output)
            }
        }
    }
}
