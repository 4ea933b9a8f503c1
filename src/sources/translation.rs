use std::rc::Rc;

use super::{read_only, ValueSource};
use crate::content::ResolutionScope;
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::model::Value;

/// Localized text for `{#Key}`.
pub struct TranslationSource {
    scope: Rc<dyn ResolutionScope>,
    key: String,
    allow_updates: bool,
    value: Value,
    loaded: bool,
}

impl TranslationSource {
    /// With `allow_updates == false` the text is read once; otherwise it is
    /// re-read and compared every update.
    pub fn new(scope: Rc<dyn ResolutionScope>, key: impl Into<String>, allow_updates: bool) -> Self {
        Self {
            scope,
            key: key.into(),
            allow_updates,
            value: Value::Null,
            loaded: false,
        }
    }

    fn read(&self) -> Value {
        match self.scope.translation(&self.key) {
            Some(text) => Value::String(text),
            None => {
                warn_once(&format!("translation:{}", self.key), || {
                    format!("no translation found for key '{}'", self.key)
                });
                Value::Null
            }
        }
    }
}

impl ValueSource for TranslationSource {
    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        false
    }

    fn display_name(&self) -> String {
        format!("Translation#{}", self.key)
    }

    fn value(&self) -> Value {
        self.value.clone()
    }

    fn set_value(&mut self, _value: Value) -> Result<(), BindingError> {
        Err(read_only("a translation"))
    }

    fn update(&mut self, force: bool) -> bool {
        if force || !self.loaded {
            self.value = self.read();
            self.loaded = true;
            return true;
        }
        if !self.allow_updates {
            return false;
        }
        let current = self.read();
        if current == self.value {
            return false;
        }
        self.value = current;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::TranslationScope;

    #[test]
    fn one_time_by_default() {
        let scope = Rc::new(TranslationScope::new().with_translation("Hi", "Hello"));
        let mut source = TranslationSource::new(scope.clone(), "Hi", false);
        assert!(source.update(false));
        assert_eq!(source.value(), Value::from("Hello"));
        scope.add_translation("Hi", "Howdy");
        assert!(!source.update(false));
        assert_eq!(source.value(), Value::from("Hello"));
    }

    #[test]
    fn updating_translation_is_re_read() {
        let scope = Rc::new(TranslationScope::new().with_translation("Hi", "Hello"));
        let mut source = TranslationSource::new(scope.clone(), "Hi", true);
        source.update(true);
        assert!(!source.update(false));
        scope.add_translation("Hi", "Howdy");
        assert!(source.update(false));
        assert_eq!(source.value(), Value::from("Howdy"));
    }

    #[test]
    fn missing_key_reads_null() {
        let scope = Rc::new(TranslationScope::new());
        let mut source = TranslationSource::new(scope, "Nope", false);
        source.update(true);
        assert!(source.value().is_null());
        assert!(source.set_value(Value::Null).is_err());
    }
}
