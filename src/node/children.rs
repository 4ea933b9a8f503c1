use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::descriptors::{ChildrenSlot, ViewDescriptor};
use crate::error::BindingError;
use crate::view::{FloatingElement, ViewRef};

/// Attaches child views to a view of one concrete type.
///
/// Multi-child slots receive their list verbatim. Single-content slots take
/// the sole child, or none, and reject more.
#[derive(Debug)]
pub struct ChildrenBinder {
    view_type: String,
    slots: Vec<ChildrenSlot>,
    supports_floating: bool,
}

impl ChildrenBinder {
    pub fn from_descriptor(descriptor: &ViewDescriptor) -> Self {
        Self {
            view_type: descriptor.type_name.clone(),
            slots: descriptor.children.clone(),
            supports_floating: descriptor.supports_floating,
        }
    }

    pub fn supports_children(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Hand `children` to the slot for `outlet` (`None` is the default slot).
    pub fn set_children(
        &self,
        view: &ViewRef,
        outlet: Option<&str>,
        children: Vec<ViewRef>,
    ) -> Result<(), BindingError> {
        let Some(slot) = self.slots.iter().find(|s| s.outlet.as_deref() == outlet) else {
            return match outlet {
                Some(outlet) => Err(BindingError::UnknownOutlet {
                    view_type: self.view_type.clone(),
                    outlet: outlet.to_owned(),
                }),
                None if children.is_empty() => Ok(()),
                None => Err(BindingError::ChildrenNotSupported {
                    view_type: self.view_type.clone(),
                    count: children.len(),
                }),
            };
        };
        if !slot.multiple && children.len() > 1 {
            return Err(BindingError::TooManyChildren {
                view_type: self.view_type.clone(),
                count: children.len(),
            });
        }
        view.borrow_mut().set_children(&slot.property, children)
    }

    pub fn set_floating(
        &self,
        view: &ViewRef,
        elements: Vec<FloatingElement>,
    ) -> Result<(), BindingError> {
        if !self.supports_floating && !elements.is_empty() {
            return Err(BindingError::FloatingNotSupported {
                view_type: self.view_type.clone(),
            });
        }
        view.borrow_mut().set_floating_elements(elements)
    }
}

/// Children binders by concrete view type. Entries are never removed.
#[derive(Default)]
pub struct ChildrenBinderCache {
    entries: RefCell<HashMap<TypeId, Rc<ChildrenBinder>>>,
}

impl ChildrenBinderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, view: &ViewRef, descriptor: &ViewDescriptor) -> Rc<ChildrenBinder> {
        let key = view.borrow().as_any().type_id();
        self.entries
            .borrow_mut()
            .entry(key)
            .or_insert_with(|| Rc::new(ChildrenBinder::from_descriptor(descriptor)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
