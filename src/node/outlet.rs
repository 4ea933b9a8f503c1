use std::rc::Rc;
use std::time::Duration;

use super::ViewNode;
use crate::context::BindingContext;
use crate::error::BindingError;
use crate::view::{FloatingElement, ViewRef};

/// `*outlet="name"`: sends the inner node's views to a named children slot
/// of the parent view.
pub struct OutletNode {
    inner: Box<dyn ViewNode>,
    name: String,
}

impl OutletNode {
    pub fn new(inner: Box<dyn ViewNode>, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }
}

impl ViewNode for OutletNode {
    fn context(&self) -> Option<Rc<BindingContext>> {
        self.inner.context()
    }

    fn set_context(&mut self, context: Option<Rc<BindingContext>>) {
        self.inner.set_context(context);
    }

    fn views(&self) -> Vec<ViewRef> {
        self.inner.views()
    }

    fn floating_elements(&self) -> Vec<FloatingElement> {
        self.inner.floating_elements()
    }

    fn outlet(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        self.inner.update(elapsed)
    }

    fn print(&self, out: &mut String, depth: usize) {
        self.inner.print(out, depth);
    }
}
