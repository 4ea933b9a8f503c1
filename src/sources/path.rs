use std::cell::Cell;
use std::rc::Rc;

use super::{ContextPropertySource, ValueSource};
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::model::{ModelRef, Subscription, Value};

/// One intermediate hop: `data.property` is expected to yield the next model.
struct PathNode {
    data: ModelRef,
    property: String,
    _subscription: Option<Subscription>,
}

impl PathNode {
    fn new(data: ModelRef, property: &str, index: isize, dirty: Option<&Rc<Cell<isize>>>) -> Self {
        let subscription = dirty.and_then(|dirty| {
            let dirty = dirty.clone();
            let name = property.to_owned();
            Subscription::listen(
                &data,
                Rc::new(move |changed: &str| {
                    if changed == name {
                        dirty.set(dirty.get().max(index));
                    }
                }),
            )
        });
        Self {
            data,
            property: property.to_owned(),
            _subscription: subscription,
        }
    }

    fn value(&self) -> Value {
        self.data.get(&self.property).unwrap_or_default()
    }
}

/// A dotted property path such as `Middle.Inner.Text`.
///
/// For `N` properties the source keeps `N - 1` path nodes, each subscribed
/// to the property it reads. The last property is read by a terminal
/// [`ContextPropertySource`] on the final intermediate object. A change at
/// node `i` only rebuilds nodes after `i`; an unresolved path reads `Null`
/// and drops writes.
pub struct ContextPathSource {
    root: ModelRef,
    properties: Vec<String>,
    path: Vec<Option<PathNode>>,
    /// Lowest node index that needs rebuilding, or -1 when clean.
    dirty: Rc<Cell<isize>>,
    allow_updates: bool,
    warn_unobservable: bool,
    terminal: Option<ContextPropertySource>,
}

impl ContextPathSource {
    pub fn new(
        root: ModelRef,
        properties: Vec<String>,
        allow_updates: bool,
        warn_unobservable: bool,
    ) -> Self {
        let dirty = Rc::new(Cell::new(0));
        let mut path: Vec<Option<PathNode>> = (1..properties.len()).map(|_| None).collect();
        if let (Some(slot), Some(first)) = (path.first_mut(), properties.first()) {
            if allow_updates && warn_unobservable && root.observable().is_none() {
                warn_once(&format!("unobservable-path:{}", root.type_name()), || {
                    format!(
                        "binding to path '{}.{}' may receive no updates because {} does not raise \
                         change notifications",
                        root.type_name(),
                        properties.join("."),
                        root.type_name()
                    )
                });
            }
            *slot = Some(PathNode::new(
                root.clone(),
                first,
                0,
                allow_updates.then_some(&dirty),
            ));
        }
        Self {
            root,
            properties,
            path,
            dirty,
            allow_updates,
            warn_unobservable,
            terminal: None,
        }
    }

    /// Whether every intermediate object was found on the last update.
    pub fn is_resolved(&self) -> bool {
        self.terminal.is_some()
    }

    fn rebuild(&mut self) {
        self.terminal = None;
        let start = (self.dirty.get() + 1) as usize;
        for slot in self.path.iter_mut().skip(start) {
            *slot = None;
        }

        let mut index = start;
        let mut current = match index.checked_sub(1) {
            Some(prev) => self.path.get(prev).and_then(Option::as_ref).map(PathNode::value),
            None => Some(Value::Object(self.root.clone())),
        };
        while index < self.path.len() {
            let Some(model) = current.as_ref().and_then(Value::as_model).cloned() else {
                break;
            };
            let node = PathNode::new(
                model,
                &self.properties[index],
                index as isize,
                self.allow_updates.then_some(&self.dirty),
            );
            current = Some(node.value());
            self.path[index] = Some(node);
            index += 1;
        }

        let target = match self.path.last() {
            Some(last) => last.as_ref().map(PathNode::value),
            None => Some(Value::Object(self.root.clone())),
        };
        if let (Some(model), Some(property)) = (
            target.as_ref().and_then(Value::as_model),
            self.properties.last(),
        ) {
            let mut terminal = ContextPropertySource::new(
                model.clone(),
                property.as_str(),
                self.allow_updates,
                self.warn_unobservable,
            );
            terminal.update(true);
            self.terminal = Some(terminal);
        }
    }
}

impl ValueSource for ContextPathSource {
    fn can_read(&self) -> bool {
        self.terminal.as_ref().map_or(true, ValueSource::can_read)
    }

    fn can_write(&self) -> bool {
        self.terminal.as_ref().map_or(true, ValueSource::can_write)
    }

    fn display_name(&self) -> String {
        format!("{}.{}", self.root.type_name(), self.properties.join("."))
    }

    fn value(&self) -> Value {
        self.terminal
            .as_ref()
            .map(ValueSource::value)
            .unwrap_or_default()
    }

    fn set_value(&mut self, value: Value) -> Result<(), BindingError> {
        if self.terminal.is_none() && self.dirty.get() >= 0 {
            self.update(false);
        }
        match &mut self.terminal {
            Some(terminal) => terminal.set_value(value),
            None => Ok(()),
        }
    }

    fn update(&mut self, force: bool) -> bool {
        if force {
            self.dirty.set(0);
        }
        if self.dirty.get() < 0 {
            return self
                .terminal
                .as_mut()
                .is_some_and(|terminal| terminal.update(false));
        }
        self.rebuild();
        self.dirty.set(-1);
        true
    }
}
