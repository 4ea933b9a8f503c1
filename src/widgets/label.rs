//! Label widget: a run of text.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::convert::ValueKind;
use crate::descriptors::ViewDescriptor;
use crate::model::Value;

/// Read-only text.
pub struct Label {
    core: WidgetCore,
}

impl Label {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }

    pub fn text(&self) -> String {
        self.core.text("text")
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let _ = self.core.set("text", Value::String(text.into()));
    }

    pub fn max_lines(&self) -> i64 {
        self.core.int("max-lines")
    }

    /// Whatever the `color` binding last delivered.
    pub fn color(&self) -> Value {
        self.core.value("color").cloned().unwrap_or_default()
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for Label {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("Label")
            .property("text", ValueKind::String)
            .property("max-lines", ValueKind::Int)
            .property("color", ValueKind::Any)
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
