//! View trait and shared handles.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::{EventHandler, FloatingElement};
use crate::descriptors::ViewDescriptor;
use crate::error::BindingError;
use crate::model::Value;

/// Shared, mutable handle to a view. Parents and nodes hold clones.
pub type ViewRef = Rc<RefCell<dyn View>>;

// ---------------------------------------------------------------------------
// View trait
// ---------------------------------------------------------------------------

/// A retained-mode view as seen by the binding layer.
///
/// Properties, events and children are addressed by name; the
/// [`ViewDescriptor`] returned by [`describe`](Self::describe) declares which
/// names exist. Layout, drawing and input are out of scope here.
pub trait View: Any {
    /// Display name of the concrete type, e.g. `"Label"`.
    fn type_name(&self) -> &str;

    /// Describe the bindable surface of this type. Called once per type;
    /// results are cached by [`DescriptorCache`](crate::descriptors::DescriptorCache).
    fn describe(&self) -> ViewDescriptor;

    fn get_property(&self, name: &str) -> Option<Value>;

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), BindingError>;

    fn event_handler(&self, event: &str) -> Option<EventHandler>;

    /// Install (`Some`) or remove (`None`) the handler for `event`.
    fn set_event_handler(
        &mut self,
        event: &str,
        handler: Option<EventHandler>,
    ) -> Result<(), BindingError>;

    /// Children currently stored in a child slot property.
    fn children(&self, property: &str) -> Vec<ViewRef>;

    /// Replace the contents of a child slot property. Single-content slots
    /// receive zero or one view.
    fn set_children(&mut self, property: &str, children: Vec<ViewRef>) -> Result<(), BindingError>;

    fn floating_elements(&self) -> Vec<FloatingElement> {
        Vec::new()
    }

    fn set_floating_elements(&mut self, elements: Vec<FloatingElement>) -> Result<(), BindingError> {
        if elements.is_empty() {
            return Ok(());
        }
        Err(BindingError::FloatingNotSupported {
            view_type: self.type_name().to_owned(),
        })
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Borrow `view` as a concrete type.
pub fn view_as<T: View>(view: &ViewRef) -> Option<Ref<'_, T>> {
    Ref::filter_map(view.borrow(), |v| v.as_any().downcast_ref::<T>()).ok()
}

/// Mutably borrow `view` as a concrete type.
pub fn view_as_mut<T: View>(view: &ViewRef) -> Option<RefMut<'_, T>> {
    RefMut::filter_map(view.borrow_mut(), |v| v.as_any_mut().downcast_mut::<T>()).ok()
}

/// Identity comparison for view handles.
pub fn same_view(a: &ViewRef, b: &ViewRef) -> bool {
    crate::model::same_instance(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Frame, Label};

    fn label() -> ViewRef {
        Rc::new(RefCell::new(Label::new()))
    }

    #[test]
    fn downcasts_to_concrete_type() {
        let view = label();
        assert!(view_as::<Label>(&view).is_some());
        assert!(view_as::<Frame>(&view).is_none());
        view_as_mut::<Label>(&view).unwrap().set_text("hi");
        assert_eq!(view_as::<Label>(&view).unwrap().text(), "hi");
    }

    #[test]
    fn identity() {
        let a = label();
        let b = a.clone();
        assert!(same_view(&a, &b));
        assert!(!same_view(&a, &label()));
    }

    #[test]
    fn floating_rejected_by_default() {
        let view = label();
        let floating = FloatingElement::new(label(), Default::default());
        let result = view.borrow_mut().set_floating_elements(vec![floating]);
        assert!(matches!(result, Err(BindingError::FloatingNotSupported { .. })));
        assert!(view.borrow_mut().set_floating_elements(Vec::new()).is_ok());
    }
}
