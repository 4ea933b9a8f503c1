use crate::convert::ValueKind;
use crate::descriptors::PropertyDescriptor;
use crate::dom::BindingDirection;
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::model::Value;
use crate::sources::ValueSource;
use crate::view::ViewRef;

/// Wires one value source to one view property.
///
/// Inbound values are converted to the property's kind before they reach the
/// view. Outbound changes are detected by comparing the view property with the
/// value last seen, and are written back through the source.
pub struct AttributeBinding {
    view: ViewRef,
    property: String,
    kind: ValueKind,
    direction: BindingDirection,
    source: Box<dyn ValueSource>,
    last_seen: Value,
}

impl AttributeBinding {
    /// Bind and perform the forced first update. The initial bind never
    /// pushes the view's value outward.
    pub fn new(
        view: ViewRef,
        property: &PropertyDescriptor,
        direction: BindingDirection,
        mut source: Box<dyn ValueSource>,
    ) -> Result<Self, BindingError> {
        let view_type = view.borrow().type_name().to_owned();
        if direction.is_in() && !property.access.writable {
            return Err(BindingError::InvalidBinding {
                view_type,
                property: property.name.clone(),
                message: "property is read-only".into(),
            });
        }
        if direction.is_out() && !property.access.readable {
            return Err(BindingError::InvalidBinding {
                view_type,
                property: property.name.clone(),
                message: "property is write-only".into(),
            });
        }

        if direction.is_in() {
            source.update(true);
        }
        let mut binding = Self {
            view,
            property: property.name.clone(),
            kind: property.kind,
            direction,
            source,
            last_seen: Value::Null,
        };
        if direction.is_in() {
            binding.push_in()?;
        }
        binding.last_seen = binding.read_view();
        Ok(binding)
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn direction(&self) -> BindingDirection {
        self.direction
    }

    pub fn source(&self) -> &dyn ValueSource {
        self.source.as_ref()
    }

    /// Sync in whichever directions this binding covers. Returns whether a
    /// value moved.
    pub fn update(&mut self) -> Result<bool, BindingError> {
        let mut changed = false;
        if self.direction.is_in() && self.source.update(false) {
            self.push_in()?;
            self.last_seen = self.read_view();
            changed = true;
        }
        if self.direction.is_out() {
            let current = self.read_view();
            if current != self.last_seen {
                self.last_seen = current.clone();
                self.push_out(current)?;
                changed = true;
            }
        }
        Ok(changed)
    }

    fn read_view(&self) -> Value {
        self.view
            .borrow()
            .get_property(&self.property)
            .unwrap_or_default()
    }

    fn push_in(&mut self) -> Result<(), BindingError> {
        let value = self.kind.convert(self.source.value())?;
        self.view.borrow_mut().set_property(&self.property, value)
    }

    fn push_out(&mut self, value: Value) -> Result<(), BindingError> {
        if !self.source.can_write() {
            warn_once(&format!("readonly-out:{}", self.source.display_name()), || {
                format!(
                    "'{}' cannot receive the value of view property '{}'",
                    self.source.display_name(),
                    self.property
                )
            });
            return Ok(());
        }
        self.source.set_value(value)
    }
}
