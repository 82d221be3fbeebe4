//! Project-wide alignment guide lines
//!
//! Guides are visual aids the editing widget draws across every page. They
//! are project-wide state, not keyed by page, and take no part in layout
//! computation.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

/// Guide line orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Orientation {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(format!("unknown guide orientation: '{s}'")),
        }
    }
}

/// One guide line, positioned in output millimetres from the page origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub orientation: Orientation,
    pub position: f64,
}

impl Guide {
    #[inline]
    #[must_use]
    pub const fn new(orientation: Orientation, position: f64) -> Self {
        Self {
            orientation,
            position,
        }
    }

    /// Rebuild a guide from its `<guide>` element
    ///
    /// Malformed guides yield `None` and are dropped by the loader.
    #[must_use]
    pub(crate) fn from_node(node: roxmltree::Node<'_, '_>) -> Option<Self> {
        let orientation = node.attribute("orientation")?.parse().ok()?;
        let position = node.attribute("position")?.parse().ok()?;
        Some(Self {
            orientation,
            position,
        })
    }

    pub(crate) fn write_xml<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
    ) -> Result<(), quick_xml::Error> {
        let mut el = BytesStart::new("guide");
        el.push_attribute(("orientation", self.orientation.to_string().as_str()));
        el.push_attribute(("position", self.position.to_string().as_str()));
        writer.write_event(Event::Empty(el))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_guides_are_rejected() {
        let doc = roxmltree::Document::parse(
            r#"<guides>
                 <guide orientation="horizontal" position="12.5"/>
                 <guide orientation="diagonal" position="1"/>
                 <guide orientation="vertical"/>
                 <guide position="3"/>
               </guides>"#,
        )
        .unwrap();

        let guides: Vec<Guide> = doc
            .root_element()
            .children()
            .filter(|n| n.is_element())
            .filter_map(Guide::from_node)
            .collect();

        assert_eq!(guides, vec![Guide::new(Orientation::Horizontal, 12.5)]);
    }
}
