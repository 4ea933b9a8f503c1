use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use super::Value;

/// A shared, mutable list of values with a change counter.
///
/// Repeaters hold the list by reference and compare [`version`](Self::version)
/// each tick, so in-place edits are picked up without replacing the list.
#[derive(Default)]
pub struct ValueList {
    items: RefCell<Vec<Value>>,
    version: Cell<u64>,
}

impl ValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            items: RefCell::new(values.into_iter().collect()),
            version: Cell::new(0),
        }
    }

    /// Convenience for `Rc::new(ValueList::from_values(..))`.
    pub fn shared(values: impl IntoIterator<Item = Value>) -> Rc<Self> {
        Rc::new(Self::from_values(values))
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.items.borrow()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    /// Incremented on every mutation.
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.items.borrow_mut().push(value.into());
        self.touch();
    }

    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&self, index: usize, value: impl Into<Value>) {
        self.items.borrow_mut().insert(index, value.into());
        self.touch();
    }

    /// Returns `None` if `index` is out of range.
    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut items = self.items.borrow_mut();
        if index >= items.len() {
            return None;
        }
        let removed = items.remove(index);
        drop(items);
        self.touch();
        Some(removed)
    }

    /// Returns `false` if `index` is out of range.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> bool {
        let mut items = self.items.borrow_mut();
        let Some(slot) = items.get_mut(index) else {
            return false;
        };
        *slot = value.into();
        drop(items);
        self.touch();
        true
    }

    /// Move the item at `from` so that it ends up at `to`.
    pub fn move_item(&self, from: usize, to: usize) -> bool {
        let mut items = self.items.borrow_mut();
        if from >= items.len() || to >= items.len() {
            return false;
        }
        let item = items.remove(from);
        items.insert(to, item);
        drop(items);
        self.touch();
        true
    }

    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.touch();
    }

    pub fn replace_all(&self, values: impl IntoIterator<Item = Value>) {
        *self.items.borrow_mut() = values.into_iter().collect();
        self.touch();
    }

    fn touch(&self) {
        self.version.set(self.version.get().wrapping_add(1));
    }
}

impl fmt::Debug for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.borrow().iter()).finish()
    }
}
