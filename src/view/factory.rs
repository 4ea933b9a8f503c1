//! Tag-to-view construction.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{View, ViewRef};
use crate::error::BindingError;
use crate::widgets::{Button, CheckBox, Expander, Frame, Image, Label, Lane, Panel, Spacer};

/// Creates views from markup tags.
pub trait ViewFactory {
    fn create_view(&self, tag: &str) -> Result<ViewRef, BindingError>;
}

/// Constructor registered for a tag.
pub type ViewConstructor = Rc<dyn Fn() -> ViewRef>;

/// Registry of view constructors keyed by lowercase tag.
#[derive(Default)]
pub struct RootViewFactory {
    constructors: HashMap<String, ViewConstructor>,
}

fn shared<V: View>(view: V) -> ViewRef {
    Rc::new(RefCell::new(view))
}

impl RootViewFactory {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every standard widget.
    pub fn with_standard_widgets() -> Self {
        let mut factory = Self::new();
        factory.register("label", || shared(Label::new()));
        factory.register("button", || shared(Button::new()));
        factory.register("image", || shared(Image::new()));
        factory.register("checkbox", || shared(CheckBox::new()));
        factory.register("frame", || shared(Frame::new()));
        factory.register("lane", || shared(Lane::new()));
        factory.register("panel", || shared(Panel::new()));
        factory.register("expander", || shared(Expander::new()));
        factory.register("spacer", || shared(Spacer::new()));
        factory
    }

    /// Register (or replace) the constructor for `tag`.
    pub fn register(&mut self, tag: &str, constructor: impl Fn() -> ViewRef + 'static) {
        self.constructors
            .insert(tag.to_ascii_lowercase(), Rc::new(constructor));
    }

    pub fn supports(&self, tag: &str) -> bool {
        self.constructors.contains_key(&tag.to_ascii_lowercase())
    }
}

impl ViewFactory for RootViewFactory {
    fn create_view(&self, tag: &str) -> Result<ViewRef, BindingError> {
        let constructor = self
            .constructors
            .get(&tag.to_ascii_lowercase())
            .ok_or_else(|| BindingError::UnknownTag(tag.to_owned()))?;
        Ok(constructor())
    }
}
