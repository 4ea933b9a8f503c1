//! Spacer widget: takes up room, shows nothing.

use super::core::{base_descriptor, StandardWidget, WidgetCore};
use crate::descriptors::ViewDescriptor;

pub struct Spacer {
    core: WidgetCore,
}

impl Spacer {
    pub fn new() -> Self {
        Self {
            core: WidgetCore::new(&Self::descriptor()),
        }
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardWidget for Spacer {
    fn descriptor() -> ViewDescriptor {
        base_descriptor("Spacer")
    }

    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }
}
