//! Frame widget: a single content view with a background.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::convert::ValueKind;
use crate::descriptors::ViewDescriptor;
use crate::view::ViewRef;

pub struct Frame {
    core: WidgetCore,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }

    pub fn content(&self) -> Option<ViewRef> {
        self.core.content("content")
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for Frame {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("Frame")
            .property("background", ValueKind::Any)
            .content_slot(None, "content")
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
