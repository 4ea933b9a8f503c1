use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::{
    Model, Observable, PropertyAccess, PropertyChangeNotifier, Tickable, Value,
};
use crate::error::BindingError;

/// Method body for a [`DynamicModel`]. Receives the model itself so it can
/// update its own properties.
pub type ModelMethod = Rc<dyn Fn(&DynamicModel, &[Value]) -> Value>;

/// Per-frame callback for a [`DynamicModel`].
pub type TickHandler = Rc<dyn Fn(&DynamicModel, Duration)>;

struct Property {
    name: String,
    value: Value,
    access: PropertyAccess,
}

/// A property bag implementing [`Model`], built with a fluent API.
///
/// ```
/// use stardewui::model::{DynamicModel, Value};
///
/// let model = DynamicModel::observable("Greeting")
///     .with_property("Text", "Hello")
///     .with_method("Shout", |m, _| {
///         let text = m.value("Text").to_string().to_uppercase();
///         m.set_value("Text", text);
///         Value::Null
///     })
///     .into_ref();
/// assert_eq!(model.value("Text"), Value::from("Hello"));
/// ```
pub struct DynamicModel {
    type_name: String,
    properties: RefCell<Vec<Property>>,
    methods: HashMap<String, ModelMethod>,
    ticker: Option<TickHandler>,
    notifier: Option<PropertyChangeNotifier>,
}

impl DynamicModel {
    /// A model that raises change notifications.
    pub fn observable(type_name: impl Into<String>) -> Self {
        Self::new(type_name.into(), Some(PropertyChangeNotifier::new()))
    }

    /// A model without change notifications; bindings to it poll.
    pub fn plain(type_name: impl Into<String>) -> Self {
        Self::new(type_name.into(), None)
    }

    fn new(type_name: String, notifier: Option<PropertyChangeNotifier>) -> Self {
        Self {
            type_name,
            properties: RefCell::new(Vec::new()),
            methods: HashMap::new(),
            ticker: None,
            notifier,
        }
    }

    pub fn with_property(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_access(name, value, PropertyAccess::READ_WRITE)
    }

    pub fn with_readonly_property(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_access(name, value, PropertyAccess::READ_ONLY)
    }

    pub fn with_access(
        self,
        name: impl Into<String>,
        value: impl Into<Value>,
        access: PropertyAccess,
    ) -> Self {
        self.properties.borrow_mut().push(Property {
            name: name.into(),
            value: value.into(),
            access,
        });
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&DynamicModel, &[Value]) -> Value + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Rc::new(method));
        self
    }

    pub fn with_ticker(mut self, ticker: impl Fn(&DynamicModel, Duration) + 'static) -> Self {
        self.ticker = Some(Rc::new(ticker));
        self
    }

    pub fn into_ref(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn is_observable(&self) -> bool {
        self.notifier.is_some()
    }

    /// Current value of `name`, or `Null` if it does not exist.
    pub fn value(&self, name: &str) -> Value {
        self.properties
            .borrow()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.clone())
            .unwrap_or_default()
    }

    /// Store `value` under `name`, creating a read-write property if needed.
    /// Notifies subscribers when the value actually changed.
    pub fn set_value(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let changed = {
            let mut properties = self.properties.borrow_mut();
            match properties.iter_mut().find(|p| p.name == name) {
                Some(property) if property.value == value => false,
                Some(property) => {
                    property.value = value;
                    true
                }
                None => {
                    properties.push(Property {
                        name: name.to_owned(),
                        value,
                        access: PropertyAccess::READ_WRITE,
                    });
                    true
                }
            }
        };
        if changed {
            if let Some(notifier) = &self.notifier {
                notifier.notify(name);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier
            .as_ref()
            .map_or(0, PropertyChangeNotifier::subscriber_count)
    }
}

impl Model for DynamicModel {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property_access(&self, name: &str) -> Option<PropertyAccess> {
        self.properties
            .borrow()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.access)
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.properties
            .borrow()
            .iter()
            .find(|p| p.name == name && p.access.readable)
            .map(|p| p.value.clone())
    }

    fn set(&self, name: &str, value: Value) -> Result<(), BindingError> {
        match self.property_access(name) {
            None => Err(BindingError::UnknownModelProperty {
                type_name: self.type_name.clone(),
                property: name.to_owned(),
            }),
            Some(access) if !access.writable => Err(BindingError::NotSupported(format!(
                "property {name} of {} is read-only",
                self.type_name
            ))),
            Some(_) => {
                self.set_value(name, value);
                Ok(())
            }
        }
    }

    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, BindingError> {
        let body = self
            .methods
            .get(method)
            .cloned()
            .ok_or_else(|| BindingError::UnknownMethod {
                type_name: self.type_name.clone(),
                method: method.to_owned(),
            })?;
        Ok(body(self, args))
    }

    fn observable(&self) -> Option<&dyn Observable> {
        self.notifier.as_ref().map(|n| n as &dyn Observable)
    }

    fn tickable(&self) -> Option<&dyn Tickable> {
        self.ticker.as_ref().map(|_| self as &dyn Tickable)
    }
}

impl Tickable for DynamicModel {
    fn tick(&self, elapsed: Duration) {
        if let Some(ticker) = self.ticker.clone() {
            ticker(self, elapsed);
        }
    }
}

impl fmt::Debug for DynamicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.type_name);
        for property in self.properties.borrow().iter() {
            s.field(&property.name, &property.value);
        }
        s.finish()
    }
}
