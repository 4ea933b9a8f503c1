//! Behaviors: reusable per-view logic attached with `+name` attributes.
//!
//! A behavior is attached once per bound view, receives new data whenever
//! its attribute value changes and runs every tick. Names may carry an
//! argument after a colon (`+hover:tint`); the part before the colon selects
//! the registered constructor and the rest is passed to it.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::model::Value;
use crate::view::{View, ViewRef};

/// Logic attached to one view.
pub trait ViewBehavior {
    /// Whether this behavior works with `view`. Incompatible behaviors are
    /// skipped.
    fn can_attach(&self, view: &dyn View) -> bool {
        let _ = view;
        true
    }

    fn attach(&mut self, view: ViewRef);

    /// Deliver the current attribute value.
    fn set_data(&mut self, data: Value);

    fn update(&mut self, elapsed: Duration);

    fn detach(&mut self);
}

/// Builds a behavior from the argument after the colon (empty if none).
pub type BehaviorConstructor = Rc<dyn Fn(&str) -> Box<dyn ViewBehavior>>;

/// Registry of behaviors by name.
#[derive(Default)]
pub struct BehaviorFactory {
    constructors: HashMap<String, BehaviorConstructor>,
}

impl BehaviorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: impl Fn(&str) -> Box<dyn ViewBehavior> + 'static,
    ) {
        self.constructors.insert(name.into(), Rc::new(constructor));
    }

    pub fn supports(&self, name: &str) -> bool {
        self.constructors.contains_key(split_name(name).0)
    }

    /// Create the behavior for a `+name` attribute.
    pub fn create(&self, name: &str) -> Option<Box<dyn ViewBehavior>> {
        let (key, argument) = split_name(name);
        let constructor = self.constructors.get(key)?;
        Some(constructor(argument))
    }
}

fn split_name(name: &str) -> (&str, &str) {
    name.split_once(':').unwrap_or((name, ""))
}
