//! The page-layout stage facade
//!
//! [`LayoutStage`] owns the parameter store and wires everything the
//! hosting application needs from this stage: lifecycle hooks, content-box
//! updates from the detection stage, the readiness gate, project-file
//! persistence, and construction of the two task kinds.

use crate::cache_task::LayoutCacheDrivenTask;
use crate::defaults::DefaultLayoutParams;
use crate::downstream::DownstreamStage;
use crate::error::Result;
use crate::guide::Guide;
use crate::ordering::PageOrderOption;
use crate::params::Params;
use crate::settings::Settings;
use crate::task::LayoutTask;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use scanpress_core::geometry::RectF;
use scanpress_core::page::{PageId, PageInfo, PageTransform};
use scanpress_core::project::{ProjectPages, ProjectReader, ProjectWriter, Relinker};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const FILTER_TAG: &str = "page-layout";
const PAGE_TAG: &str = "page";
const PARAMS_TAG: &str = "params";

/// Orchestration facade for the page-layout stage
pub struct LayoutStage {
    settings: Arc<Settings>,
    defaults: DefaultLayoutParams,
    page_order_options: Vec<PageOrderOption>,
    selected_page_order: AtomicUsize,
}

impl LayoutStage {
    #[must_use]
    pub fn new(defaults: DefaultLayoutParams) -> Self {
        Self {
            settings: Arc::new(Settings::new()),
            defaults,
            page_order_options: vec![PageOrderOption::new("Natural order", None)],
            selected_page_order: AtomicUsize::new(0),
        }
    }

    /// User-facing stage name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        "margins"
    }

    /// Shared parameter store, for the editing-widget boundary
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Hook: this stage became the active one
    ///
    /// Reconciles the store against project changes made while another
    /// stage was active: records for removed pages are pruned.
    pub fn selected(&self, pages: &dyn ProjectPages) {
        self.settings
            .remove_pages_missing_from(&pages.to_page_sequence());
    }

    /// Hook: a page needs parameters before it can be shown or processed
    ///
    /// Idempotent; pages that already have a record are left alone.
    pub fn populate_default_params(&self, page: &PageInfo) {
        if !self.settings.is_params_null(&page.id) {
            return;
        }
        log::debug!("assigning default layout params to {:?}", page.id);
        self.settings
            .set_page_params(page.id.clone(), self.defaults.params_for(page.dpi));
    }

    /// Rewrite store keys after project page identities changed
    pub fn perform_relinking(&self, relinker: &dyn Relinker) {
        self.settings.perform_relinking(relinker);
    }

    /// Record the content box the detection stage produced for a page
    pub fn set_content_box(&self, page_id: &PageId, xform: &PageTransform, content_rect: RectF) {
        let size_mm = xform.rect_size_mm(&content_rect);
        self.settings
            .set_content_size_mm(page_id, content_rect, size_mm);
    }

    /// Drop a page's content box after the detection stage re-detected
    pub fn invalidate_content_box(&self, page_id: &PageId) {
        self.settings.invalidate_content_size(page_id);
    }

    /// The readiness gate: may the pipeline produce final output?
    ///
    /// `ignore` exempts one page, typically the page currently being
    /// edited, whose parameters are about to change anyway.
    #[must_use]
    pub fn check_ready_for_output(
        &self,
        pages: &dyn ProjectPages,
        ignore: Option<&PageId>,
    ) -> bool {
        let snapshot = pages.to_page_sequence();
        self.settings.check_everything_defined(&snapshot, ignore)
    }

    /// Page-ordering menu entries, natural order first
    #[inline]
    #[must_use]
    pub fn page_order_options(&self) -> &[PageOrderOption] {
        &self.page_order_options
    }

    /// Register an additional page ordering
    pub fn add_page_order_option(&mut self, option: PageOrderOption) {
        self.page_order_options.push(option);
    }

    #[inline]
    #[must_use]
    pub fn selected_page_order(&self) -> usize {
        self.selected_page_order.load(Ordering::Relaxed)
    }

    pub fn select_page_order(&self, option: usize) {
        assert!(option < self.page_order_options.len());
        self.selected_page_order.store(option, Ordering::Relaxed);
    }

    /// Build the interactive task for one page
    #[must_use]
    pub fn create_task(
        &self,
        page_id: PageId,
        next: Arc<dyn DownstreamStage>,
        batch: bool,
        debug: bool,
    ) -> LayoutTask {
        LayoutTask::new(
            Arc::clone(&self.settings),
            self.defaults,
            page_id,
            next,
            batch,
            debug,
        )
    }

    /// Build the cache-driven validity-check task
    #[must_use]
    pub fn create_cache_driven_task(
        &self,
        next: Arc<dyn DownstreamStage>,
    ) -> LayoutCacheDrivenTask {
        LayoutCacheDrivenTask::new(Arc::clone(&self.settings), next)
    }

    /// Serialize the store into this stage's project-file element
    ///
    /// Pages are emitted in the project's own enumeration order, keyed by
    /// the small numeric IDs the writer assigns; pages without a record
    /// are simply absent.
    pub fn save_settings(&self, writer: &dyn ProjectWriter) -> Result<String> {
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

        let mut root = BytesStart::new(FILTER_TAG);
        root.push_attribute((
            "showMiddleRect",
            if self.settings.is_showing_middle_rect_enabled() {
                "1"
            } else {
                "0"
            },
        ));
        xml.write_event(Event::Start(root))?;

        let guides = self.settings.guides();
        if !guides.is_empty() {
            xml.write_event(Event::Start(BytesStart::new("guides")))?;
            for guide in &guides {
                guide.write_xml(&mut xml)?;
            }
            xml.write_event(Event::End(BytesEnd::new("guides")))?;
        }

        let mut write_error: Option<quick_xml::Error> = None;
        writer.enum_pages(&mut |page_id, numeric_id| {
            if write_error.is_some() {
                return;
            }
            if let Some(params) = self.settings.page_params(page_id) {
                if let Err(e) = write_page(&mut xml, numeric_id, &params) {
                    write_error = Some(e);
                }
            }
        });
        if let Some(e) = write_error {
            return Err(e.into());
        }

        xml.write_event(Event::End(BytesEnd::new(FILTER_TAG)))?;
        Ok(String::from_utf8(xml.into_inner())?)
    }

    /// Rebuild the store from this stage's project-file element
    ///
    /// `filters_node` is either the `<page-layout>` element itself or its
    /// parent `<filters>` element. Loading is destructive-replace: the
    /// store is cleared first, then repopulated with whatever survives
    /// the tolerant parse. Malformed entries are skipped, never fatal; an
    /// affected page just falls back to default population on next visit.
    pub fn load_settings(&self, reader: &dyn ProjectReader, filters_node: roxmltree::Node<'_, '_>) {
        self.settings.clear();

        let filter_el = if filters_node.has_tag_name(FILTER_TAG) {
            Some(filters_node)
        } else {
            child_element(filters_node, FILTER_TAG)
        };
        let Some(filter_el) = filter_el else {
            return;
        };

        self.settings
            .enable_showing_middle_rect(filter_el.attribute("showMiddleRect") == Some("1"));

        if let Some(guides_el) = child_element(filter_el, "guides") {
            let guides: Vec<Guide> = guides_el
                .children()
                .filter(|n| n.is_element() && n.has_tag_name("guide"))
                .filter_map(|n| {
                    let guide = Guide::from_node(n);
                    if guide.is_none() {
                        log::warn!("dropping malformed guide element");
                    }
                    guide
                })
                .collect();
            self.settings.set_guides(guides);
        }

        for page_el in filter_el
            .children()
            .filter(|n| n.is_element() && n.has_tag_name(PAGE_TAG))
        {
            let Some(numeric_id) = page_el.attribute("id").and_then(|v| v.parse::<i32>().ok())
            else {
                log::warn!("skipping page element with unparsable id");
                continue;
            };
            let Some(page_id) = reader.page_id(numeric_id) else {
                log::warn!("skipping page element with unknown id {numeric_id}");
                continue;
            };
            let Some(params_el) = child_element(page_el, PARAMS_TAG) else {
                log::warn!("skipping page {numeric_id}: no params payload");
                continue;
            };
            self.settings
                .set_page_params(page_id, Params::from_node(params_el));
        }
    }

    /// Parse a project-file fragment and load it
    ///
    /// The only way loading can fail is the XML itself being unparsable;
    /// everything below the document level degrades per [`load_settings`].
    ///
    /// [`load_settings`]: Self::load_settings
    pub fn load_settings_from_str(&self, reader: &dyn ProjectReader, xml: &str) -> Result<()> {
        let doc = roxmltree::Document::parse(xml)?;
        self.load_settings(reader, doc.root_element());
        Ok(())
    }
}

fn write_page<W: std::io::Write>(
    xml: &mut Writer<W>,
    numeric_id: i32,
    params: &Params,
) -> std::result::Result<(), quick_xml::Error> {
    let mut page_el = BytesStart::new(PAGE_TAG);
    page_el.push_attribute(("id", numeric_id.to_string().as_str()));
    xml.write_event(Event::Start(page_el))?;
    params.write_xml(xml, PARAMS_TAG)?;
    xml.write_event(Event::End(BytesEnd::new(PAGE_TAG)))
}

fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    tag: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.has_tag_name(tag))
}
