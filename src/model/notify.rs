use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::SlotMap;

use super::{ModelRef, Observable};

slotmap::new_key_type! {
    /// Handle returned by [`Observable::subscribe`].
    pub struct SubscriptionId;
}

/// Callback invoked with the name of the property that changed.
pub type ChangeHandler = Rc<dyn Fn(&str)>;

/// Subscriber list for property-change notifications.
///
/// Embed one in a model and return it from
/// [`Model::observable`](super::Model::observable).
#[derive(Default)]
pub struct PropertyChangeNotifier {
    handlers: RefCell<SlotMap<SubscriptionId, ChangeHandler>>,
}

impl PropertyChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call every subscriber with `property`.
    ///
    /// Handlers are snapshotted first, so a handler may subscribe or
    /// unsubscribe without tripping the borrow.
    pub fn notify(&self, property: &str) {
        let handlers: Vec<ChangeHandler> = self.handlers.borrow().values().cloned().collect();
        for handler in handlers {
            handler(property);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl Observable for PropertyChangeNotifier {
    fn subscribe(&self, handler: ChangeHandler) -> SubscriptionId {
        self.handlers.borrow_mut().insert(handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers.borrow_mut().remove(id);
    }
}

impl fmt::Debug for PropertyChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Subscription guard
// ---------------------------------------------------------------------------

/// Keeps a handler subscribed to a model until dropped.
pub struct Subscription {
    model: ModelRef,
    id: SubscriptionId,
}

impl Subscription {
    /// Subscribe `handler` to `model`. Returns `None` if the model is not
    /// observable.
    pub fn listen(model: &ModelRef, handler: ChangeHandler) -> Option<Self> {
        let id = model.observable()?.subscribe(handler);
        Some(Self {
            model: model.clone(),
            id,
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(observable) = self.model.observable() {
            observable.unsubscribe(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("model", &self.model.type_name())
            .field("id", &self.id)
            .finish()
    }
}
