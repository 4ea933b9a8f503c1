use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::Document;

/// Per-document context for resolving `{#Key}` translations.
pub trait ResolutionScope {
    fn translation(&self, key: &str) -> Option<String>;
}

/// Produces the scope a document's bindings resolve against.
pub trait ResolutionScopeFactory {
    fn create_for_document(&self, document: &Rc<Document>) -> Rc<dyn ResolutionScope>;
}

/// A scope that resolves nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolutionScope;

impl ResolutionScope for NullResolutionScope {
    fn translation(&self, _key: &str) -> Option<String> {
        None
    }
}

/// A mutable key/text table. Changing a translation is picked up by bindings
/// that allow updates.
#[derive(Debug, Default)]
pub struct TranslationScope {
    translations: RefCell<HashMap<String, String>>,
}

impl TranslationScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_translation(key, text);
        self
    }

    pub fn add_translation(&self, key: impl Into<String>, text: impl Into<String>) {
        self.translations.borrow_mut().insert(key.into(), text.into());
    }
}

impl ResolutionScope for TranslationScope {
    fn translation(&self, key: &str) -> Option<String> {
        self.translations.borrow().get(key).cloned()
    }
}

/// Hands out a default scope, with per-document overrides for documents that
/// come from somewhere else (for example, an included view from another
/// source).
pub struct DocumentScopeFactory {
    default: Rc<dyn ResolutionScope>,
    overrides: RefCell<Vec<(Rc<Document>, Rc<dyn ResolutionScope>)>>,
}

impl DocumentScopeFactory {
    pub fn new(default: Rc<dyn ResolutionScope>) -> Self {
        Self {
            default,
            overrides: RefCell::new(Vec::new()),
        }
    }

    pub fn register(&self, document: &Rc<Document>, scope: Rc<dyn ResolutionScope>) {
        let mut overrides = self.overrides.borrow_mut();
        overrides.retain(|(doc, _)| !Rc::ptr_eq(doc, document));
        overrides.push((document.clone(), scope));
    }
}

impl Default for DocumentScopeFactory {
    fn default() -> Self {
        Self::new(Rc::new(NullResolutionScope))
    }
}

impl ResolutionScopeFactory for DocumentScopeFactory {
    fn create_for_document(&self, document: &Rc<Document>) -> Rc<dyn ResolutionScope> {
        self.overrides
            .borrow()
            .iter()
            .find(|(doc, _)| Rc::ptr_eq(doc, document))
            .map_or_else(|| self.default.clone(), |(_, scope)| scope.clone())
    }
}
