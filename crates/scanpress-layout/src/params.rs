//! Per-page layout parameters
//!
//! A [`Params`] value is the complete layout state for one page. Records
//! are constructed whole and replaced whole: the store never mutates a
//! record field-by-field, so a concurrent reader can never observe a
//! half-written record.

use crate::alignment::Alignment;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use scanpress_core::geometry::{MarginsF, RectF, SizeF};
use serde::{Deserialize, Serialize};

/// Layout parameters for one page
///
/// `hard_margins_mm` and `alignment` are always defined once a record
/// exists. The content box (`content_rect` + `content_size_mm`) arrives
/// later, from the content-detection stage, and is cleared again whenever
/// that stage re-detects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    hard_margins_mm: MarginsF,
    page_rect: RectF,
    content_rect: Option<RectF>,
    content_size_mm: Option<SizeF>,
    alignment: Alignment,
    auto_margins: bool,
}

impl Params {
    /// New record with no content box and an empty page rectangle
    #[must_use]
    pub fn new(hard_margins_mm: MarginsF, alignment: Alignment, auto_margins: bool) -> Self {
        Self {
            hard_margins_mm,
            page_rect: RectF::default(),
            content_rect: None,
            content_size_mm: None,
            alignment,
            auto_margins,
        }
    }

    #[inline]
    #[must_use]
    pub const fn hard_margins_mm(&self) -> MarginsF {
        self.hard_margins_mm
    }

    #[inline]
    #[must_use]
    pub const fn page_rect(&self) -> RectF {
        self.page_rect
    }

    #[inline]
    #[must_use]
    pub const fn content_rect(&self) -> Option<RectF> {
        self.content_rect
    }

    #[inline]
    #[must_use]
    pub const fn content_size_mm(&self) -> Option<SizeF> {
        self.content_size_mm
    }

    #[inline]
    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[inline]
    #[must_use]
    pub const fn auto_margins(&self) -> bool {
        self.auto_margins
    }

    /// Copy with different hard margins
    #[inline]
    #[must_use]
    pub fn with_hard_margins_mm(mut self, margins: MarginsF) -> Self {
        self.hard_margins_mm = margins;
        self
    }

    /// Copy with a different alignment
    #[inline]
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Copy with a different auto-margins setting
    #[inline]
    #[must_use]
    pub fn with_auto_margins(mut self, auto_margins: bool) -> Self {
        self.auto_margins = auto_margins;
        self
    }

    /// Copy with a different page rectangle
    #[inline]
    #[must_use]
    pub fn with_page_rect(mut self, page_rect: RectF) -> Self {
        self.page_rect = page_rect;
        self
    }

    /// Copy with the content box set
    #[inline]
    #[must_use]
    pub fn with_content_box(mut self, content_rect: RectF, content_size_mm: SizeF) -> Self {
        self.content_rect = Some(content_rect);
        self.content_size_mm = Some(content_size_mm);
        self
    }

    /// Copy with the content box cleared
    #[inline]
    #[must_use]
    pub fn without_content_box(mut self) -> Self {
        self.content_rect = None;
        self.content_size_mm = None;
        self
    }

    /// Rebuild a record from its `<params>` payload element
    ///
    /// Never fails: missing or unreadable pieces fall back to defaults,
    /// matching the tolerant load policy of the whole codec.
    #[must_use]
    pub(crate) fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let auto_margins = node.attribute("autoMargins") == Some("1");

        let hard_margins_mm = child(node, "hardMarginsMM")
            .map(|el| {
                MarginsF::new(
                    attr_f64(el, "left"),
                    attr_f64(el, "top"),
                    attr_f64(el, "right"),
                    attr_f64(el, "bottom"),
                )
            })
            .unwrap_or_default();

        let page_rect = child(node, "pageRect").map(rect_from_node).unwrap_or_default();
        let content_rect = child(node, "contentRect").map(rect_from_node);
        let content_size_mm = child(node, "contentSizeMM").and_then(|el| {
            Some(SizeF::new(
                attr_f64_opt(el, "width")?,
                attr_f64_opt(el, "height")?,
            ))
        });

        let alignment = child(node, "alignment")
            .map(|el| {
                Alignment::new(
                    el.attribute("hor")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or_default(),
                    el.attribute("vert")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        Self {
            hard_margins_mm,
            page_rect,
            content_rect,
            content_size_mm,
            alignment,
            auto_margins,
        }
    }

    pub(crate) fn write_xml<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        tag: &str,
    ) -> Result<(), quick_xml::Error> {
        let mut root = BytesStart::new(tag);
        root.push_attribute(("autoMargins", if self.auto_margins { "1" } else { "0" }));
        writer.write_event(Event::Start(root))?;

        let mut margins = BytesStart::new("hardMarginsMM");
        margins.push_attribute(("left", self.hard_margins_mm.left.to_string().as_str()));
        margins.push_attribute(("top", self.hard_margins_mm.top.to_string().as_str()));
        margins.push_attribute(("right", self.hard_margins_mm.right.to_string().as_str()));
        margins.push_attribute(("bottom", self.hard_margins_mm.bottom.to_string().as_str()));
        writer.write_event(Event::Empty(margins))?;

        write_rect(writer, "pageRect", &self.page_rect)?;
        if let Some(rect) = &self.content_rect {
            write_rect(writer, "contentRect", rect)?;
        }
        if let Some(size) = &self.content_size_mm {
            let mut el = BytesStart::new("contentSizeMM");
            el.push_attribute(("width", size.width.to_string().as_str()));
            el.push_attribute(("height", size.height.to_string().as_str()));
            writer.write_event(Event::Empty(el))?;
        }

        let mut alignment = BytesStart::new("alignment");
        alignment.push_attribute(("hor", self.alignment.horizontal.to_string().as_str()));
        alignment.push_attribute(("vert", self.alignment.vertical.to_string().as_str()));
        writer.write_event(Event::Empty(alignment))?;

        writer.write_event(Event::End(BytesEnd::new(tag)))
    }
}

fn child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    tag: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.has_tag_name(tag))
}

fn attr_f64(node: roxmltree::Node<'_, '_>, name: &str) -> f64 {
    attr_f64_opt(node, name).unwrap_or(0.0)
}

fn attr_f64_opt(node: roxmltree::Node<'_, '_>, name: &str) -> Option<f64> {
    node.attribute(name).and_then(|v| v.parse().ok())
}

fn rect_from_node(node: roxmltree::Node<'_, '_>) -> RectF {
    RectF::new(
        attr_f64(node, "x"),
        attr_f64(node, "y"),
        attr_f64(node, "width"),
        attr_f64(node, "height"),
    )
}

fn write_rect<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    rect: &RectF,
) -> Result<(), quick_xml::Error> {
    let mut el = BytesStart::new(tag);
    el.push_attribute(("x", rect.x.to_string().as_str()));
    el.push_attribute(("y", rect.y.to_string().as_str()));
    el.push_attribute(("width", rect.width.to_string().as_str()));
    el.push_attribute(("height", rect.height.to_string().as_str()));
    writer.write_event(Event::Empty(el))
}
