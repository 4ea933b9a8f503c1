//! Image widget.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::convert::ValueKind;
use crate::descriptors::ViewDescriptor;
use crate::model::Value;

/// Displays a sprite. The sprite is opaque to the binding core.
pub struct Image {
    core: WidgetCore,
}

impl Image {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }

    pub fn sprite(&self) -> Value {
        self.core.value("sprite").cloned().unwrap_or_default()
    }

    pub fn scale(&self) -> f64 {
        self.core.float("scale")
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for Image {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("Image")
            .property("sprite", ValueKind::Any)
            .property("scale", ValueKind::Float)
            .property("tint", ValueKind::Any)
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
