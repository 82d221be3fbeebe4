//! Shared fixtures: an in-memory project and a recording downstream stage

#![allow(dead_code)]

use scanpress_core::geometry::SizeF;
use scanpress_core::page::{PageId, PageInfo, PageSequence};
use scanpress_core::pipeline::{TaskStatus, Validity};
use scanpress_core::project::{ProjectPages, ProjectReader, ProjectWriter};
use scanpress_core::units::Dpi;
use scanpress_layout::{DownstreamStage, LayoutOutput};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory stand-in for the hosting project
///
/// Pages are numbered in order; the numeric save IDs are simply the page
/// indexes, mirroring how a real project assigns them.
pub struct TestProject {
    pages: Vec<PageInfo>,
}

impl TestProject {
    pub fn new(page_count: usize) -> Self {
        let pages = (0..page_count)
            .map(|i| {
                PageInfo::new(
                    PageId::single(format!("page-{i:03}.tif")),
                    Dpi::square(300.0),
                    SizeF::new(2480.0, 3508.0),
                )
            })
            .collect();
        Self { pages }
    }

    pub fn page(&self, index: usize) -> &PageInfo {
        &self.pages[index]
    }

    pub fn remove_page(&mut self, index: usize) -> PageInfo {
        self.pages.remove(index)
    }
}

impl ProjectPages for TestProject {
    fn to_page_sequence(&self) -> PageSequence {
        PageSequence::new(self.pages.clone())
    }
}

impl ProjectWriter for TestProject {
    fn enum_pages(&self, f: &mut dyn FnMut(&PageId, i32)) {
        for (i, page) in self.pages.iter().enumerate() {
            f(&page.id, i as i32);
        }
    }
}

impl ProjectReader for TestProject {
    fn page_id(&self, numeric_id: i32) -> Option<PageId> {
        usize::try_from(numeric_id)
            .ok()
            .and_then(|i| self.pages.get(i))
            .map(|page| page.id.clone())
    }
}

/// Downstream stage double that behaves like a real output stage cache
///
/// `process` records the layout it was given as its "produced output";
/// `check_cached` compares the incoming layout against that record, which
/// is exactly how the real output stage detects stale parameters.
#[derive(Default)]
pub struct RecordingDownstream {
    pub processed: Mutex<Vec<(PageId, LayoutOutput, bool)>>,
    pub checked: Mutex<Vec<(PageId, LayoutOutput)>>,
    cache: Mutex<HashMap<PageId, LayoutOutput>>,
}

impl RecordingDownstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the output stage already produced output for this layout
    pub fn prime_cache(&self, page_id: PageId, layout: LayoutOutput) {
        self.cache.lock().unwrap().insert(page_id, layout);
    }

    pub fn processed_count(&self) -> usize {
        self.processed.lock().unwrap().len()
    }

    pub fn checked_count(&self) -> usize {
        self.checked.lock().unwrap().len()
    }
}

impl DownstreamStage for RecordingDownstream {
    fn process(&self, page: &PageInfo, layout: &LayoutOutput, debug: bool) -> TaskStatus {
        self.processed
            .lock()
            .unwrap()
            .push((page.id.clone(), layout.clone(), debug));
        self.cache
            .lock()
            .unwrap()
            .insert(page.id.clone(), layout.clone());
        TaskStatus::Completed
    }

    fn check_cached(&self, page: &PageInfo, layout: &LayoutOutput) -> Validity {
        self.checked
            .lock()
            .unwrap()
            .push((page.id.clone(), layout.clone()));
        match self.cache.lock().unwrap().get(&page.id) {
            Some(cached) if cached == layout => Validity::Valid,
            _ => Validity::stale("output"),
        }
    }
}
