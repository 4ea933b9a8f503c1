//! Static descriptions of view types: bindable properties, events, child
//! slots. Looked up once per concrete type and cached.

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::convert::ValueKind;
use crate::model::PropertyAccess;
use crate::view::View;

/// One bindable view property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub kind: ValueKind,
    pub access: PropertyAccess,
}

/// A place where child views go.
///
/// `outlet == None` is the default slot that receives children without an
/// `*outlet` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildrenSlot {
    pub outlet: Option<String>,
    pub property: String,
    /// `true` for a list of children, `false` for a single content view.
    pub multiple: bool,
}

/// Everything the binding layer needs to know about a view type.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDescriptor {
    pub type_name: String,
    pub properties: Vec<PropertyDescriptor>,
    pub events: Vec<String>,
    pub children: Vec<ChildrenSlot>,
    pub supports_floating: bool,
}

impl ViewDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Vec::new(),
            events: Vec::new(),
            children: Vec::new(),
            supports_floating: false,
        }
    }

    /// Add a read-write property.
    pub fn property(self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.property_with_access(name, kind, PropertyAccess::READ_WRITE)
    }

    pub fn property_with_access(
        mut self,
        name: impl Into<String>,
        kind: ValueKind,
        access: PropertyAccess,
    ) -> Self {
        self.properties.push(PropertyDescriptor {
            name: name.into(),
            kind,
            access,
        });
        self
    }

    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.events.push(name.into());
        self
    }

    /// Add a multi-child slot stored in `property`.
    pub fn children_slot(mut self, outlet: Option<&str>, property: impl Into<String>) -> Self {
        self.children.push(ChildrenSlot {
            outlet: outlet.map(str::to_owned),
            property: property.into(),
            multiple: true,
        });
        self
    }

    /// Add a single-child slot stored in `property`.
    pub fn content_slot(mut self, outlet: Option<&str>, property: impl Into<String>) -> Self {
        self.children.push(ChildrenSlot {
            outlet: outlet.map(str::to_owned),
            property: property.into(),
            multiple: false,
        });
        self
    }

    pub fn floating(mut self) -> Self {
        self.supports_floating = true;
        self
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|e| e == name)
    }
}

/// Append-only cache of descriptors keyed by concrete view type.
#[derive(Default)]
pub struct DescriptorCache {
    entries: RefCell<HashMap<TypeId, Rc<ViewDescriptor>>>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, view: &dyn View) -> Rc<ViewDescriptor> {
        let key = view.as_any().type_id();
        if let Some(descriptor) = self.entries.borrow().get(&key) {
            return descriptor.clone();
        }
        let descriptor = Rc::new(view.describe());
        tracing::trace!(view_type = %descriptor.type_name, "cached view descriptor");
        self.entries.borrow_mut().insert(key, descriptor.clone());
        descriptor
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Frame, Label};

    #[test]
    fn builder_and_lookups() {
        let descriptor = ViewDescriptor::new("Thing")
            .property("text", ValueKind::String)
            .property_with_access("size", ValueKind::Any, PropertyAccess::READ_ONLY)
            .event("click")
            .content_slot(None, "content")
            .floating();
        assert_eq!(descriptor.find_property("text").map(|p| p.kind), Some(ValueKind::String));
        assert!(!descriptor.find_property("size").unwrap().access.writable);
        assert!(descriptor.has_event("click"));
        assert!(!descriptor.children[0].multiple);
        assert!(descriptor.supports_floating);
    }

    #[test]
    fn cache_is_per_type() {
        let cache = DescriptorCache::new();
        let a = Label::new();
        let b = Label::new();
        let first = cache.get(&a);
        let second = cache.get(&b);
        assert!(Rc::ptr_eq(&first, &second));
        cache.get(&Frame::new());
        assert_eq!(cache.len(), 2);
    }
}
