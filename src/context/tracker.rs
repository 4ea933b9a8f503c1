//! Per-frame deduplication of model ticks.
//!
//! The same model can be reachable from many nodes (a repeated item that is
//! also the `*context` of a sibling, for example). The tracker is a
//! thread-local set of model identities that have already ticked this frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::model::ModelRef;

struct Tracker {
    /// Keyed by data address. Holding the `Rc` keeps the address from being
    /// reused by a new model within the same frame.
    updated: HashMap<*const (), ModelRef>,
}

thread_local! {
    static TRACKER: RefCell<Tracker> = RefCell::new(Tracker {
        updated: HashMap::new(),
    });
}

/// Handle to the thread-local tracker.
pub struct ContextUpdateTracker;

impl ContextUpdateTracker {
    /// Forget every model recorded this frame. Call once per frame, before
    /// the tree update.
    pub fn reset() {
        TRACKER.with(|tracker| tracker.borrow_mut().updated.clear());
    }

    /// Record `model` as updated. Returns `false` if it was already recorded
    /// since the last [`reset`](Self::reset).
    pub fn try_begin_update(model: &ModelRef) -> bool {
        let key = Rc::as_ptr(model) as *const ();
        TRACKER.with(|tracker| {
            let mut tracker = tracker.borrow_mut();
            if tracker.updated.contains_key(&key) {
                return false;
            }
            tracker.updated.insert(key, model.clone());
            true
        })
    }

    /// Number of models recorded this frame.
    pub fn updated_count() -> usize {
        TRACKER.with(|tracker| tracker.borrow().updated.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DynamicModel;

    #[test]
    fn second_update_in_frame_is_rejected() {
        ContextUpdateTracker::reset();
        let a: ModelRef = DynamicModel::plain("A").into_ref();
        let b: ModelRef = DynamicModel::plain("B").into_ref();
        assert!(ContextUpdateTracker::try_begin_update(&a));
        assert!(!ContextUpdateTracker::try_begin_update(&a.clone()));
        assert!(ContextUpdateTracker::try_begin_update(&b));
        assert_eq!(ContextUpdateTracker::updated_count(), 2);

        ContextUpdateTracker::reset();
        assert_eq!(ContextUpdateTracker::updated_count(), 0);
        assert!(ContextUpdateTracker::try_begin_update(&a));
    }
}
