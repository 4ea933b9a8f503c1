//! Button widget: a clickable text button.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::convert::ValueKind;
use crate::descriptors::ViewDescriptor;

/// A clickable button with a text label. Clicks arrive through the `click`
/// event every widget exposes.
pub struct Button {
    core: WidgetCore,
}

impl Button {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }

    pub fn text(&self) -> String {
        self.core.text("text")
    }

    pub fn is_disabled(&self) -> bool {
        self.core.flag("disabled")
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for Button {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("Button")
            .property("text", ValueKind::String)
            .property("disabled", ValueKind::Bool)
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
