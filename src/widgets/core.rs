//! Shared storage and the blanket [`View`] implementation for the standard
//! widgets.

use std::any::Any;
use std::collections::HashMap;

use crate::convert::ValueKind;
use crate::descriptors::ViewDescriptor;
use crate::error::BindingError;
use crate::model::Value;
use crate::view::{EventHandler, FloatingElement, View, ViewRef};

/// Properties, events and children shared by every standard widget.
pub fn base_descriptor(type_name: &str) -> ViewDescriptor {
    ViewDescriptor::new(type_name)
        .property("layout", ValueKind::String)
        .property("margin", ValueKind::String)
        .property("padding", ValueKind::String)
        .property("tooltip", ValueKind::String)
        .event("click")
        .event("right-click")
        .event("hover")
}

// ---------------------------------------------------------------------------
// WidgetCore
// ---------------------------------------------------------------------------

/// Name-addressed state of a widget, laid out from its descriptor.
pub struct WidgetCore {
    type_name: String,
    values: Vec<(String, Value)>,
    events: Vec<String>,
    handlers: HashMap<String, EventHandler>,
    slots: Vec<(String, bool, Vec<ViewRef>)>,
    supports_floating: bool,
    floating: Vec<FloatingElement>,
}

impl WidgetCore {
    pub fn new(descriptor: &ViewDescriptor) -> Self {
        Self {
            type_name: descriptor.type_name.clone(),
            values: descriptor
                .properties
                .iter()
                .map(|p| {
                    let initial = p.kind.convert(Value::Null).unwrap_or_default();
                    (p.name.clone(), initial)
                })
                .collect(),
            events: descriptor.events.clone(),
            handlers: HashMap::new(),
            slots: descriptor
                .children
                .iter()
                .map(|slot| (slot.property.clone(), slot.multiple, Vec::new()))
                .collect(),
            supports_floating: descriptor.supports_floating,
            floating: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> String {
        self.value(name).map(ToString::to_string).unwrap_or_default()
    }

    pub fn int(&self, name: &str) -> i64 {
        self.value(name).and_then(Value::as_i64).unwrap_or_default()
    }

    pub fn float(&self, name: &str) -> f64 {
        self.value(name).and_then(Value::as_f64).unwrap_or_default()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.value(name).and_then(Value::as_bool).unwrap_or_default()
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<(), BindingError> {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(BindingError::UnknownViewProperty {
                view_type: self.type_name.clone(),
                property: name.to_owned(),
            }),
        }
    }

    pub fn handler(&self, event: &str) -> Option<EventHandler> {
        self.handlers.get(event).cloned()
    }

    pub fn set_handler(
        &mut self,
        event: &str,
        handler: Option<EventHandler>,
    ) -> Result<(), BindingError> {
        if !self.events.iter().any(|e| e == event) {
            return Err(BindingError::UnknownEvent {
                view_type: self.type_name.clone(),
                event: event.to_owned(),
            });
        }
        match handler {
            Some(handler) => {
                self.handlers.insert(event.to_owned(), handler);
            }
            None => {
                self.handlers.remove(event);
            }
        }
        Ok(())
    }

    pub fn children(&self, property: &str) -> Vec<ViewRef> {
        self.slots
            .iter()
            .find(|(name, _, _)| name == property)
            .map(|(_, _, views)| views.clone())
            .unwrap_or_default()
    }

    /// The single view in a content slot.
    pub fn content(&self, property: &str) -> Option<ViewRef> {
        self.children(property).into_iter().next()
    }

    pub fn set_children(
        &mut self,
        property: &str,
        children: Vec<ViewRef>,
    ) -> Result<(), BindingError> {
        let Some((_, multiple, views)) = self.slots.iter_mut().find(|(name, _, _)| name == property)
        else {
            return Err(BindingError::UnknownViewProperty {
                view_type: self.type_name.clone(),
                property: property.to_owned(),
            });
        };
        if !*multiple && children.len() > 1 {
            return Err(BindingError::TooManyChildren {
                view_type: self.type_name.clone(),
                count: children.len(),
            });
        }
        *views = children;
        Ok(())
    }

    pub fn floating(&self) -> &[FloatingElement] {
        &self.floating
    }

    pub fn set_floating(&mut self, elements: Vec<FloatingElement>) -> Result<(), BindingError> {
        if !self.supports_floating && !elements.is_empty() {
            return Err(BindingError::FloatingNotSupported {
                view_type: self.type_name.clone(),
            });
        }
        self.floating = elements;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// StandardWidget
// ---------------------------------------------------------------------------

/// A widget whose whole bindable surface lives in a [`WidgetCore`].
pub trait StandardWidget: Any {
    fn descriptor() -> ViewDescriptor
    where
        Self: Sized;

    fn core(&self) -> &WidgetCore;

    fn core_mut(&mut self) -> &mut WidgetCore;
}

impl<T: StandardWidget> View for T {
    fn type_name(&self) -> &str {
        self.core().type_name()
    }

    fn describe(&self) -> ViewDescriptor {
        T::descriptor()
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        self.core().value(name).cloned()
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), BindingError> {
        self.core_mut().set(name, value)
    }

    fn event_handler(&self, event: &str) -> Option<EventHandler> {
        self.core().handler(event)
    }

    fn set_event_handler(
        &mut self,
        event: &str,
        handler: Option<EventHandler>,
    ) -> Result<(), BindingError> {
        self.core_mut().set_handler(event, handler)
    }

    fn children(&self, property: &str) -> Vec<ViewRef> {
        self.core().children(property)
    }

    fn set_children(&mut self, property: &str, children: Vec<ViewRef>) -> Result<(), BindingError> {
        self.core_mut().set_children(property, children)
    }

    fn floating_elements(&self) -> Vec<FloatingElement> {
        self.core().floating().to_vec()
    }

    fn set_floating_elements(&mut self, elements: Vec<FloatingElement>) -> Result<(), BindingError> {
        self.core_mut().set_floating(elements)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
