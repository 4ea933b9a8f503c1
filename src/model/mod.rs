//! Context data: dynamic values and the model capability traits.
//!
//! Anything that can be bound to sits behind [`Model`]. Change notification
//! and per-frame ticking are optional capabilities, queried through
//! [`Model::observable`] and [`Model::tickable`] instead of being discovered by
//! reflection.

mod dynamic;
mod list;
mod notify;
mod value;

use std::any::Any;
use std::rc::Rc;
use std::time::Duration;

use crate::error::BindingError;

pub use dynamic::{DynamicModel, ModelMethod, TickHandler};
pub use list::ValueList;
pub use notify::{ChangeHandler, PropertyChangeNotifier, Subscription, SubscriptionId};
pub use value::Value;

/// Shared handle to a model object.
pub type ModelRef = Rc<dyn Model>;

/// Read/write capability of a single model property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyAccess {
    pub readable: bool,
    pub writable: bool,
}

impl PropertyAccess {
    pub const READ_ONLY: PropertyAccess = PropertyAccess {
        readable: true,
        writable: false,
    };
    pub const READ_WRITE: PropertyAccess = PropertyAccess {
        readable: true,
        writable: true,
    };
    pub const WRITE_ONLY: PropertyAccess = PropertyAccess {
        readable: false,
        writable: true,
    };
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// An object that bindings can read from, write to and invoke methods on.
pub trait Model: Any {
    /// Name used for `~Type` context redirects and diagnostics.
    fn type_name(&self) -> &str;

    /// Access flags for `name`, or `None` if the property does not exist.
    fn property_access(&self, name: &str) -> Option<PropertyAccess>;

    /// Current value of `name`, or `None` if it does not exist or is write-only.
    fn get(&self, name: &str) -> Option<Value>;

    /// Write `value` to `name`.
    fn set(&self, name: &str, value: Value) -> Result<(), BindingError>;

    /// Invoke a method by name. Used by event bindings.
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, BindingError> {
        let _ = args;
        Err(BindingError::UnknownMethod {
            type_name: self.type_name().to_owned(),
            method: method.to_owned(),
        })
    }

    /// Property-change notification capability.
    fn observable(&self) -> Option<&dyn Observable> {
        None
    }

    /// Per-frame tick capability.
    fn tickable(&self) -> Option<&dyn Tickable> {
        None
    }
}

/// Push-based change notification. Handlers receive the changed property name.
pub trait Observable {
    fn subscribe(&self, handler: ChangeHandler) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

/// A model that wants to run once per frame while it is bound.
pub trait Tickable {
    fn tick(&self, elapsed: Duration);
}

/// Reference identity for possibly-unsized `Rc`s, ignoring vtable pointers.
#[inline]
pub fn same_instance<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Model for Fixed {
        fn type_name(&self) -> &str {
            "Fixed"
        }
        fn property_access(&self, name: &str) -> Option<PropertyAccess> {
            (name == "Answer").then_some(PropertyAccess::READ_ONLY)
        }
        fn get(&self, name: &str) -> Option<Value> {
            (name == "Answer").then_some(Value::Int(42))
        }
        fn set(&self, name: &str, _value: Value) -> Result<(), BindingError> {
            Err(BindingError::NotSupported(format!("{name} is read-only")))
        }
    }

    #[test]
    fn default_capabilities_are_absent() {
        let model: ModelRef = Rc::new(Fixed);
        assert!(model.observable().is_none());
        assert!(model.tickable().is_none());
        assert!(matches!(
            model.invoke("Run", &[]),
            Err(BindingError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn identity_ignores_clones_of_same_rc() {
        let a: ModelRef = Rc::new(Fixed);
        let b = a.clone();
        let c: ModelRef = Rc::new(Fixed);
        assert!(same_instance(&a, &b));
        assert!(!same_instance(&a, &c));
    }
}
