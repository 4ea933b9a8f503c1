use std::time::Duration;

use crate::behaviors::ViewBehavior;
use crate::sources::ValueSource;
use crate::view::ViewRef;

/// A behavior attached to a view, fed by the source of its `+name` attribute.
pub struct BehaviorBinding {
    name: String,
    behavior: Box<dyn ViewBehavior>,
    source: Box<dyn ValueSource>,
}

impl BehaviorBinding {
    /// Attach `behavior`, deliver the initial data and run a zero-length
    /// update.
    pub fn new(
        name: impl Into<String>,
        view: &ViewRef,
        mut behavior: Box<dyn ViewBehavior>,
        mut source: Box<dyn ValueSource>,
    ) -> Self {
        behavior.attach(view.clone());
        source.update(true);
        behavior.set_data(source.value());
        behavior.update(Duration::ZERO);
        Self {
            name: name.into(),
            behavior,
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &dyn ValueSource {
        self.source.as_ref()
    }

    /// Returns whether new data was delivered.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        let changed = self.source.update(false);
        if changed {
            self.behavior.set_data(self.source.value());
        }
        self.behavior.update(elapsed);
        changed
    }
}

impl Drop for BehaviorBinding {
    fn drop(&mut self) {
        self.behavior.detach();
    }
}
