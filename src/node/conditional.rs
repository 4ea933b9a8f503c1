use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::ViewNode;
use crate::content::ResolutionScope;
use crate::context::BindingContext;
use crate::convert::ValueKind;
use crate::dom::SAttribute;
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::model::Value;
use crate::sources::{ValueSource, ValueSourceFactory};
use crate::view::{FloatingElement, ViewRef};

/// The current `*switch` value of the nearest enclosing element that has one.
#[derive(Debug, Default)]
pub struct SwitchScope {
    value: RefCell<Value>,
}

impl SwitchScope {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    pub fn set_value(&self, value: Value) {
        *self.value.borrow_mut() = value;
    }
}

/// What a [`ConditionalNode`] tests.
pub enum Condition {
    /// `*if` (or `*!if` when `negated`).
    If { negated: bool },
    /// `*case`, compared against the enclosing `*switch`.
    Case(Rc<SwitchScope>),
}

/// Shows its inner node only while the condition holds. A hidden inner node
/// is not updated, so it is not realized until it first becomes visible.
pub struct ConditionalNode {
    inner: Box<dyn ViewNode>,
    condition: Condition,
    attribute: SAttribute,
    sources: Rc<ValueSourceFactory>,
    scope: Rc<dyn ResolutionScope>,
    source: Option<Box<dyn ValueSource>>,
    context: Option<Rc<BindingContext>>,
    context_changed: bool,
    visible: bool,
}

impl ConditionalNode {
    pub fn new(
        inner: Box<dyn ViewNode>,
        condition: Condition,
        attribute: SAttribute,
        sources: Rc<ValueSourceFactory>,
        scope: Rc<dyn ResolutionScope>,
    ) -> Self {
        Self {
            inner,
            condition,
            attribute,
            sources,
            scope,
            source: None,
            context: None,
            context_changed: true,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn evaluate(&self, value: Value) -> bool {
        match &self.condition {
            Condition::If { negated } => {
                let passed = match ValueKind::Bool.convert(value) {
                    Ok(converted) => converted.as_bool().unwrap_or(false),
                    Err(err) => {
                        warn_once(&format!("if:{}", self.attribute), || {
                            format!("condition {} is not a boolean: {err}", self.attribute)
                        });
                        false
                    }
                };
                passed != *negated
            }
            Condition::Case(switch) => {
                let expected = switch.value();
                match ValueKind::of(&expected).convert(value) {
                    Ok(case) => case == expected,
                    Err(_) => false,
                }
            }
        }
    }
}

impl ViewNode for ConditionalNode {
    fn context(&self) -> Option<Rc<BindingContext>> {
        self.context.clone()
    }

    fn set_context(&mut self, context: Option<Rc<BindingContext>>) {
        if crate::context::same_context(self.context.as_ref(), context.as_ref()) {
            return;
        }
        self.inner.set_context(context.clone());
        self.context = context;
        self.context_changed = true;
    }

    fn views(&self) -> Vec<ViewRef> {
        if self.visible {
            self.inner.views()
        } else {
            Vec::new()
        }
    }

    fn floating_elements(&self) -> Vec<FloatingElement> {
        if self.visible {
            self.inner.floating_elements()
        } else {
            Vec::new()
        }
    }

    fn outlet(&self) -> Option<&str> {
        self.inner.outlet()
    }

    fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        if self.context_changed || self.source.is_none() {
            let mut source =
                self.sources
                    .create_for_attribute(&self.attribute, self.context.as_ref(), &self.scope)?;
            source.update(true);
            self.source = Some(source);
            self.context_changed = false;
        } else if let Some(source) = self.source.as_mut() {
            source.update(false);
        }
        let value = self.source.as_ref().map(|s| s.value()).unwrap_or_default();

        let was_visible = self.visible;
        self.visible = self.evaluate(value);
        let mut changed = was_visible != self.visible;
        if self.visible {
            changed |= self.inner.update(elapsed)?;
        }
        Ok(changed)
    }

    fn print(&self, out: &mut String, depth: usize) {
        if self.visible {
            self.inner.print(out, depth);
        }
    }
}
