use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::markup::{self, ParseError};
use crate::model::Value;

/// A borrowed handle to one loaded asset.
///
/// Entries go stale when the asset is reloaded; holders check
/// [`is_valid`](Self::is_valid) each tick and look the name up again.
pub trait AssetCacheEntry {
    fn value(&self) -> Value;
    fn is_valid(&self) -> bool;
}

/// Lookup of named assets (sprites, documents, anything else a view consumes).
pub trait AssetCache {
    fn get(&self, name: &str) -> Option<Rc<dyn AssetCacheEntry>>;
}

struct MemoryEntry {
    value: Value,
    valid: Cell<bool>,
}

impl AssetCacheEntry for MemoryEntry {
    fn value(&self) -> Value {
        self.value.clone()
    }

    fn is_valid(&self) -> bool {
        self.valid.get()
    }
}

/// In-memory [`AssetCache`]. Replacing or removing an asset invalidates the
/// entry previously handed out for it.
#[derive(Default)]
pub struct MemoryAssetCache {
    entries: RefCell<HashMap<String, Rc<MemoryEntry>>>,
}

impl MemoryAssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, name: impl Into<String>, value: impl Into<Value>) {
        let entry = Rc::new(MemoryEntry {
            value: value.into(),
            valid: Cell::new(true),
        });
        if let Some(old) = self.entries.borrow_mut().insert(name.into(), entry) {
            old.valid.set(false);
        }
    }

    /// Parse `markup` and store the resulting document under `name`.
    pub fn put_markup(&self, name: impl Into<String>, markup: &str) -> Result<(), ParseError> {
        let document = markup::parse(markup)?;
        self.put(name, Value::Document(Rc::new(document)));
        Ok(())
    }

    pub fn remove(&self, name: &str) -> bool {
        match self.entries.borrow_mut().remove(name) {
            Some(old) => {
                old.valid.set(false);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl AssetCache for MemoryAssetCache {
    fn get(&self, name: &str) -> Option<Rc<dyn AssetCacheEntry>> {
        let entry: Rc<dyn AssetCacheEntry> = self.entries.borrow().get(name).cloned()?;
        Some(entry)
    }
}

impl fmt::Debug for MemoryAssetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.borrow();
        let mut names: Vec<&String> = entries.keys().collect();
        names.sort();
        f.debug_struct("MemoryAssetCache")
            .field("assets", &names)
            .finish()
    }
}
