//! Lane widget: children in a row or column.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::convert::ValueKind;
use crate::descriptors::ViewDescriptor;
use crate::view::ViewRef;

pub struct Lane {
    core: WidgetCore,
}

impl Lane {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }

    pub fn children(&self) -> Vec<ViewRef> {
        self.core.children("children")
    }

    /// `"horizontal"` or `"vertical"`; empty means horizontal.
    pub fn orientation(&self) -> String {
        self.core.text("orientation")
    }
}

impl Default for Lane {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for Lane {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("Lane")
            .property("orientation", ValueKind::String)
            .children_slot(None, "children")
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
