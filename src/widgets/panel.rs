//! Panel widget: overlapping children plus floating elements.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::descriptors::ViewDescriptor;
use crate::view::{FloatingElement, ViewRef};

pub struct Panel {
    core: WidgetCore,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }

    pub fn children(&self) -> Vec<ViewRef> {
        self.core.children("children")
    }

    pub fn floating(&self) -> &[FloatingElement] {
        self.core.floating()
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for Panel {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("Panel")
            .children_slot(None, "children")
            .floating()
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
