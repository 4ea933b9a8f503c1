use super::{read_only, ValueSource};
use crate::error::BindingError;
use crate::model::Value;

/// A literal that never changes.
#[derive(Debug, Clone)]
pub struct ConstantSource {
    value: Value,
}

impl ConstantSource {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ValueSource for ConstantSource {
    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        false
    }

    fn display_name(&self) -> String {
        format!("{:?}", self.value)
    }

    fn value(&self) -> Value {
        self.value.clone()
    }

    fn set_value(&mut self, _value: Value) -> Result<(), BindingError> {
        Err(read_only("a constant"))
    }

    fn update(&mut self, _force: bool) -> bool {
        false
    }
}

/// Stands in for a binding whose context is missing. Always `Null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSource;

impl ValueSource for NullSource {
    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        false
    }

    fn display_name(&self) -> String {
        "(none)".to_owned()
    }

    fn value(&self) -> Value {
        Value::Null
    }

    fn set_value(&mut self, _value: Value) -> Result<(), BindingError> {
        Err(read_only("a null source"))
    }

    fn update(&mut self, _force: bool) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_never_changes() {
        let mut source = ConstantSource::new("x");
        assert!(!source.update(true));
        assert_eq!(source.value(), Value::from("x"));
        assert!(matches!(
            source.set_value(Value::Null),
            Err(BindingError::NotSupported(_))
        ));
    }

    #[test]
    fn null_is_null() {
        let mut source = NullSource;
        assert!(!source.update(true));
        assert!(source.value().is_null());
        assert!(!source.can_write());
        assert!(source.set_value(Value::Int(1)).is_err());
    }
}
