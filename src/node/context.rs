use std::rc::Rc;
use std::time::Duration;

use super::ViewNode;
use crate::content::ResolutionScope;
use crate::context::{same_context, BindingContext};
use crate::dom::SAttribute;
use crate::error::BindingError;
use crate::sources::{ValueSource, ValueSourceFactory};
use crate::view::{FloatingElement, ViewRef};

/// `*context={...}`: binds its inner node to a value read from the outer
/// context. A `Null` value leaves the inner node without a context.
pub struct ContextNode {
    inner: Box<dyn ViewNode>,
    attribute: SAttribute,
    sources: Rc<ValueSourceFactory>,
    scope: Rc<dyn ResolutionScope>,
    source: Option<Box<dyn ValueSource>>,
    context: Option<Rc<BindingContext>>,
    context_changed: bool,
}

impl ContextNode {
    pub fn new(
        inner: Box<dyn ViewNode>,
        attribute: SAttribute,
        sources: Rc<ValueSourceFactory>,
        scope: Rc<dyn ResolutionScope>,
    ) -> Self {
        Self {
            inner,
            attribute,
            sources,
            scope,
            source: None,
            context: None,
            context_changed: true,
        }
    }

    fn inner_context(&self) -> Option<Rc<BindingContext>> {
        let value = self.source.as_ref()?.value();
        if value.is_null() {
            return None;
        }
        Some(BindingContext::new(value, self.context.clone()))
    }
}

impl ViewNode for ContextNode {
    fn context(&self) -> Option<Rc<BindingContext>> {
        self.context.clone()
    }

    fn set_context(&mut self, context: Option<Rc<BindingContext>>) {
        if same_context(self.context.as_ref(), context.as_ref()) {
            return;
        }
        self.context = context;
        self.context_changed = true;
    }

    fn views(&self) -> Vec<ViewRef> {
        self.inner.views()
    }

    fn floating_elements(&self) -> Vec<FloatingElement> {
        self.inner.floating_elements()
    }

    fn outlet(&self) -> Option<&str> {
        self.inner.outlet()
    }

    fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        let rebuilt = if self.context_changed || self.source.is_none() {
            let mut source =
                self.sources
                    .create_for_attribute(&self.attribute, self.context.as_ref(), &self.scope)?;
            source.update(true);
            self.source = Some(source);
            self.context_changed = false;
            true
        } else {
            self.source.as_mut().is_some_and(|s| s.update(false))
        };
        if rebuilt {
            let context = self.inner_context();
            self.inner.set_context(context);
        }
        self.inner.update(elapsed)
    }

    fn print(&self, out: &mut String, depth: usize) {
        self.inner.print(out, depth);
    }
}
