//! Page ordering capability interface
//!
//! The stage offers alternative page orderings to the hosting UI (natural
//! order, by width, by height, ...). The comparators themselves live with
//! the host; this module only defines the capability and the option list
//! the stage advertises.

use scanpress_core::page::PageInfo;
use std::sync::Arc;

/// Strict-weak-ordering comparator over pages
pub trait PageOrderProvider: Send + Sync {
    /// Whether `lhs` sorts before `rhs`
    ///
    /// The incomplete flags mark pages that still lack layout parameters,
    /// letting a provider group unfinished pages together.
    fn precedes(
        &self,
        lhs: &PageInfo,
        lhs_incomplete: bool,
        rhs: &PageInfo,
        rhs_incomplete: bool,
    ) -> bool;
}

/// One entry in the stage's page-ordering menu
#[derive(Clone)]
pub struct PageOrderOption {
    name: String,
    provider: Option<Arc<dyn PageOrderProvider>>,
}

impl PageOrderOption {
    #[must_use]
    pub fn new(name: impl Into<String>, provider: Option<Arc<dyn PageOrderProvider>>) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }

    /// User-facing option label
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` means the project's natural order
    #[inline]
    #[must_use]
    pub fn provider(&self) -> Option<&Arc<dyn PageOrderProvider>> {
        self.provider.as_ref()
    }
}

impl std::fmt::Debug for PageOrderOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageOrderOption")
            .field("name", &self.name)
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}
