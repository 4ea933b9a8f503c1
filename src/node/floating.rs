use std::rc::Rc;
use std::time::Duration;

use super::ViewNode;
use crate::content::ResolutionScope;
use crate::context::{same_context, BindingContext};
use crate::dom::SAttribute;
use crate::error::BindingError;
use crate::model::Value;
use crate::sources::{ValueSource, ValueSourceFactory};
use crate::view::{FloatingAnchor, FloatingElement, FloatingPosition, PositionFn, ViewRef};

/// `*float`: turns the inner node's views into floating elements.
///
/// The position is either literal markup (`"before; -10, 4"`) or a bound
/// value holding a position string, a [`FloatingPosition`] or a
/// [`PositionFn`].
pub struct FloatingNode {
    inner: Box<dyn ViewNode>,
    attribute: SAttribute,
    sources: Rc<ValueSourceFactory>,
    scope: Rc<dyn ResolutionScope>,
    source: Option<Box<dyn ValueSource>>,
    position: FloatingPosition,
    context: Option<Rc<BindingContext>>,
    context_changed: bool,
}

impl FloatingNode {
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
            position: FloatingPosition::default(),
            context: None,
            context_changed: true,
        }
    }

    pub fn position(&self) -> &FloatingPosition {
        &self.position
    }

    fn to_position(&self, value: &Value) -> Result<FloatingPosition, BindingError> {
        if value.is_null() {
            return Ok(FloatingPosition::default());
        }
        if let Some(text) = value.as_str() {
            return FloatingPosition::parse(text).ok_or_else(|| self.invalid(text));
        }
        if let Some(position) = value.downcast_ref::<FloatingPosition>() {
            return Ok(position.clone());
        }
        if let Some(function) = value.downcast_ref::<PositionFn>() {
            return Ok(FloatingPosition::new(FloatingAnchor::Custom(function.clone())));
        }
        Err(self.invalid(&format!("{value:?}")))
    }

    fn invalid(&self, text: &str) -> BindingError {
        BindingError::InvalidDirective {
            directive: "float".into(),
            message: format!("'{text}' is not a floating position"),
        }
    }
}

impl ViewNode for FloatingNode {
    fn context(&self) -> Option<Rc<BindingContext>> {
        self.context.clone()
    }

    fn set_context(&mut self, context: Option<Rc<BindingContext>>) {
        if same_context(self.context.as_ref(), context.as_ref()) {
            return;
        }
        self.inner.set_context(context.clone());
        self.context = context;
        self.context_changed = true;
    }

    fn views(&self) -> Vec<ViewRef> {
        Vec::new()
    }

    fn floating_elements(&self) -> Vec<FloatingElement> {
        self.inner
            .views()
            .into_iter()
            .map(|view| FloatingElement::new(view, self.position.clone()))
            .collect()
    }

    fn outlet(&self) -> Option<&str> {
        self.inner.outlet()
    }

    fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        let mut changed = false;
        let refresh = if self.context_changed || self.source.is_none() {
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
        if refresh {
            let value = self.source.as_ref().map(|s| s.value()).unwrap_or_default();
            let position = self.to_position(&value)?;
            if position != self.position {
                self.position = position;
                changed = true;
            }
        }
        changed |= self.inner.update(elapsed)?;
        Ok(changed)
    }

    fn print(&self, out: &mut String, depth: usize) {
        self.inner.print(out, depth);
    }
}
