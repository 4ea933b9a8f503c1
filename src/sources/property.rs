use std::cell::Cell;
use std::rc::Rc;

use super::ValueSource;
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::model::{ModelRef, Subscription, Value};

/// One property of a model.
///
/// Observable models push a dirty flag through a subscription. Other models
/// are re-read and compared on every update.
pub struct ContextPropertySource {
    model: ModelRef,
    property: String,
    value: Value,
    allow_updates: bool,
    dirty: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl ContextPropertySource {
    /// Bind to `property` of `model`. With `allow_updates == false` the value
    /// is only re-read on forced updates.
    pub fn new(
        model: ModelRef,
        property: impl Into<String>,
        allow_updates: bool,
        warn_unobservable: bool,
    ) -> Self {
        let property = property.into();
        if model.property_access(&property).is_none() {
            warn_once(&format!("missing:{}.{property}", model.type_name()), || {
                format!(
                    "type {} has no property named '{property}'; the binding will read Null",
                    model.type_name()
                )
            });
        }

        let dirty = Rc::new(Cell::new(false));
        let subscription = if allow_updates {
            let flag = dirty.clone();
            let name = property.clone();
            let subscription = Subscription::listen(
                &model,
                Rc::new(move |changed: &str| {
                    if changed == name {
                        flag.set(true);
                    }
                }),
            );
            if subscription.is_none() && warn_unobservable {
                warn_once(&format!("unobservable:{}", model.type_name()), || {
                    format!(
                        "bindings to {} are polled every frame because it does not raise change \
                         notifications; use a one-time binding ({{:{property}}}) if the value is constant",
                        model.type_name()
                    )
                });
            }
            subscription
        } else {
            None
        };

        let value = model.get(&property).unwrap_or_default();
        Self {
            model,
            property,
            value,
            allow_updates,
            dirty,
            subscription,
        }
    }

    fn read(&self) -> Value {
        self.model.get(&self.property).unwrap_or_default()
    }
}

impl ValueSource for ContextPropertySource {
    fn can_read(&self) -> bool {
        self.model
            .property_access(&self.property)
            .is_some_and(|access| access.readable)
    }

    fn can_write(&self) -> bool {
        self.model
            .property_access(&self.property)
            .is_some_and(|access| access.writable)
    }

    fn display_name(&self) -> String {
        format!("{}.{}", self.model.type_name(), self.property)
    }

    fn value(&self) -> Value {
        self.value.clone()
    }

    fn set_value(&mut self, value: Value) -> Result<(), BindingError> {
        self.model.set(&self.property, value.clone())?;
        self.value = value;
        Ok(())
    }

    fn update(&mut self, force: bool) -> bool {
        if force {
            self.dirty.set(false);
            self.value = self.read();
            return true;
        }
        if !self.allow_updates {
            return false;
        }
        if self.subscription.is_some() {
            if !self.dirty.replace(false) {
                return false;
            }
            self.value = self.read();
            return true;
        }
        let current = self.read();
        if current == self.value {
            return false;
        }
        self.value = current;
        true
    }
}
