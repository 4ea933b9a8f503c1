//! CheckBox widget.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::convert::ValueKind;
use crate::descriptors::ViewDescriptor;
use crate::model::Value;

/// A toggle with an optional label. `is-checked` is usually bound two-way.
pub struct CheckBox {
    core: WidgetCore,
}

impl CheckBox {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }

    pub fn is_checked(&self) -> bool {
        self.core.flag("is-checked")
    }

    /// Simulates the user toggling the box.
    pub fn set_checked(&mut self, checked: bool) {
        let _ = self.core.set("is-checked", Value::Bool(checked));
    }

    pub fn label_text(&self) -> String {
        self.core.text("label-text")
    }
}

impl Default for CheckBox {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for CheckBox {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("CheckBox")
            .property("is-checked", ValueKind::Bool)
            .property("label-text", ValueKind::String)
            .event("change")
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
