//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::rc::Rc;
use std::time::Duration;

use stardewui::content::{DocumentScopeFactory, MemoryAssetCache, TranslationScope};
use stardewui::engine::{EngineConfig, ViewEngine, ViewEngineBuilder, ViewTree};
use stardewui::model::{DynamicModel, Value, ValueList};
use stardewui::view::{view_as, ViewRef};
use stardewui::widgets::{Button, CheckBox, Expander, Frame, Label, Lane, Panel};

/// An engine with quiet polling warnings and an in-memory asset cache.
pub struct Harness {
    pub assets: Rc<MemoryAssetCache>,
    pub translations: Rc<TranslationScope>,
    builder: Option<ViewEngineBuilder>,
}

impl Harness {
    pub fn new() -> Self {
        let assets = Rc::new(MemoryAssetCache::new());
        let translations = Rc::new(TranslationScope::new());
        let builder = ViewEngine::builder()
            .with_config(EngineConfig::new().with_warn_on_unobservable(false))
            .with_assets(assets.clone())
            .with_scopes(Rc::new(DocumentScopeFactory::new(translations.clone())));
        Self {
            assets,
            translations,
            builder: Some(builder),
        }
    }

    /// Adjust the builder before the engine is built.
    pub fn configure(mut self, f: impl FnOnce(ViewEngineBuilder) -> ViewEngineBuilder) -> Self {
        self.builder = self.builder.take().map(f);
        self
    }

    pub fn engine(&mut self) -> ViewEngine {
        self.builder.take().unwrap_or_default().build()
    }

    pub fn build(&mut self, markup: &str, data: impl Into<Value>) -> ViewTree {
        self.engine().create_tree_from_markup(markup, data).unwrap()
    }
}

pub fn build(markup: &str, data: impl Into<Value>) -> ViewTree {
    Harness::new().build(markup, data)
}

pub fn tick(tree: &mut ViewTree) -> bool {
    tree.update(Duration::ZERO).unwrap()
}

pub fn object(model: &Rc<DynamicModel>) -> Value {
    Value::object(model.clone())
}

pub fn list(items: impl IntoIterator<Item = Value>) -> Rc<ValueList> {
    ValueList::shared(items)
}

pub fn root(tree: &ViewTree) -> ViewRef {
    let views = tree.views();
    assert_eq!(views.len(), 1, "expected a single root view");
    views[0].clone()
}

pub fn label_text(view: &ViewRef) -> String {
    view_as::<Label>(view).expect("view is not a Label").text()
}

pub fn button_text(view: &ViewRef) -> String {
    view_as::<Button>(view).expect("view is not a Button").text()
}

pub fn is_checked(view: &ViewRef) -> bool {
    view_as::<CheckBox>(view).expect("view is not a CheckBox").is_checked()
}

/// Children of a lane or panel.
pub fn children(view: &ViewRef) -> Vec<ViewRef> {
    if let Some(lane) = view_as::<Lane>(view) {
        return lane.children();
    }
    view_as::<Panel>(view)
        .expect("view has no children list")
        .children()
}

/// Content of a frame, or of an expander.
pub fn content(view: &ViewRef) -> Option<ViewRef> {
    if let Some(frame) = view_as::<Frame>(view) {
        return frame.content();
    }
    view_as::<Expander>(view)
        .expect("view has no content slot")
        .content()
}

pub fn texts(views: &[ViewRef]) -> Vec<String> {
    views.iter().map(label_text).collect()
}
