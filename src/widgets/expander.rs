//! Expander widget: a header that shows or hides its content.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::convert::ValueKind;
use crate::descriptors::ViewDescriptor;
use crate::view::ViewRef;

/// Children without an outlet become the content; `*outlet="header"` targets
/// the header.
pub struct Expander {
    core: WidgetCore,
}

impl Expander {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }

    pub fn header(&self) -> Option<ViewRef> {
        self.core.content("header")
    }

    pub fn content(&self) -> Option<ViewRef> {
        self.core.content("content")
    }

    pub fn is_expanded(&self) -> bool {
        self.core.flag("is-expanded")
    }
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for Expander {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("Expander")
            .property("is-expanded", ValueKind::Bool)
            .content_slot(None, "content")
            .content_slot(Some("header"), "header")
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
