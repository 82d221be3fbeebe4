//! Layout stage error types

use thiserror::Error;

/// Errors from the layout stage's persistence boundary
///
/// Loading malformed content is not an error: unreadable entries are
/// skipped and the affected pages fall back to default population. Only
/// producing XML, or failing to parse the document itself, can fail.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML emission error
    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    /// The project document itself is not parseable XML
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Emitted XML is not valid UTF-8
    #[error("produced XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for layout stage operations
pub type Result<T> = std::result::Result<T, LayoutError>;
