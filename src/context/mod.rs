//! Binding contexts: the data a node binds against, plus its ancestry.

mod tracker;

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

pub use crate::dom::ContextRedirect;
use crate::model::{ModelRef, Value};
pub use tracker::ContextUpdateTracker;

/// Data for a node and the chain of contexts above it.
///
/// Two contexts are equal when their data is the same instance and their
/// parents are equal, so rebuilding an identical chain does not count as a
/// context change.
pub struct BindingContext {
    data: Value,
    parent: Option<Rc<BindingContext>>,
    tickable: bool,
}

impl BindingContext {
    pub fn new(data: impl Into<Value>, parent: Option<Rc<BindingContext>>) -> Rc<Self> {
        let data = data.into();
        let tickable = data
            .as_model()
            .is_some_and(|model| model.tickable().is_some());
        Rc::new(Self {
            data,
            parent,
            tickable,
        })
    }

    /// A context with no parent.
    pub fn root(data: impl Into<Value>) -> Rc<Self> {
        Self::new(data, None)
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn model(&self) -> Option<&ModelRef> {
        self.data.as_model()
    }

    pub fn parent(&self) -> Option<&Rc<BindingContext>> {
        self.parent.as_ref()
    }

    pub fn is_tickable(&self) -> bool {
        self.tickable
    }

    /// Resolve `redirect` starting from this context.
    ///
    /// `^` steps walk parents; running off the top yields `None`. A type
    /// redirect returns the nearest context, this one included, whose model
    /// reports that type name.
    pub fn redirect(self: &Rc<Self>, redirect: Option<&ContextRedirect>) -> Option<Rc<Self>> {
        match redirect {
            None => Some(self.clone()),
            Some(ContextRedirect::Distance(steps)) => {
                let mut current = self.clone();
                for _ in 0..*steps {
                    current = current.parent.clone()?;
                }
                Some(current)
            }
            Some(ContextRedirect::Type(type_name)) => {
                let mut current = Some(self.clone());
                while let Some(context) = current {
                    if context
                        .model()
                        .is_some_and(|model| model.type_name() == type_name)
                    {
                        return Some(context);
                    }
                    current = context.parent.clone();
                }
                None
            }
        }
    }

    /// Run the model's per-frame tick unless it already ran this frame.
    /// Returns whether the tick ran.
    pub fn tick(&self, elapsed: Duration) -> bool {
        if !self.tickable {
            return false;
        }
        let Some(model) = self.model() else {
            return false;
        };
        if !ContextUpdateTracker::try_begin_update(model) {
            return false;
        }
        if let Some(tickable) = model.tickable() {
            tickable.tick(elapsed);
        }
        true
    }
}

/// Resolve an optional context through an optional redirect.
pub fn resolve(
    context: Option<&Rc<BindingContext>>,
    redirect: Option<&ContextRedirect>,
) -> Option<Rc<BindingContext>> {
    context?.redirect(redirect)
}

/// Context equality for `Option`s, treating two `None`s as equal.
pub fn same_context(a: Option<&Rc<BindingContext>>, b: Option<&Rc<BindingContext>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b) || **a == **b,
        _ => false,
    }
}

impl PartialEq for BindingContext {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && same_context(self.parent.as_ref(), other.parent.as_ref())
    }
}

impl fmt::Debug for BindingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingContext")
            .field("data", &self.data)
            .field("depth", &self.parent.as_ref().map_or(0, |p| depth(p) + 1))
            .finish()
    }
}

fn depth(context: &BindingContext) -> usize {
    context.parent.as_ref().map_or(0, |p| depth(p) + 1)
}
