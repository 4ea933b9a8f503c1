//! View events.

use std::rc::Rc;

use super::ViewRef;
use crate::model::Value;

/// Named fields carried by an event, read by `$Field` handler arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventArgs {
    fields: Vec<(String, Value)>,
}

impl EventArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Returns `true` when the event was handled.
pub type EventHandler = Rc<dyn Fn(&EventArgs) -> bool>;

/// Invoke the handler for `event` on `view`, if any.
///
/// The handler is cloned out before it runs, so it may freely borrow the view
/// or replace its own handler.
pub fn raise_event(view: &ViewRef, event: &str, args: &EventArgs) -> bool {
    let handler = view.borrow().event_handler(event);
    match handler {
        Some(handler) => handler(args),
        None => false,
    }
}
