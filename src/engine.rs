//! The public entry point: configure services once, then build live view
//! trees from markup and drive them with [`ViewTree::update`].

use std::rc::Rc;
use std::time::Duration;

use crate::behaviors::{BehaviorFactory, ViewBehavior};
use crate::binding::DescriptorViewBinder;
use crate::content::{AssetCache, DocumentScopeFactory, MemoryAssetCache, ResolutionScopeFactory};
use crate::context::{BindingContext, ContextUpdateTracker};
use crate::descriptors::DescriptorCache;
use crate::dom::Document;
use crate::error::BindingError;
use crate::markup;
use crate::model::Value;
use crate::node::{ViewNode, ViewNodeFactory};
use crate::sources::ValueSourceFactory;
use crate::view::{RootViewFactory, ViewRef};

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Tunables for a [`ViewEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum nesting of template expansions before giving up.
    pub max_template_depth: usize,
    /// Warn once per model type when a binding has to poll because the model
    /// does not raise change notifications.
    pub warn_on_unobservable: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_template_depth: 32,
            warn_on_unobservable: true,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_template_depth(mut self, depth: usize) -> Self {
        self.max_template_depth = depth;
        self
    }

    pub fn with_warn_on_unobservable(mut self, warn: bool) -> Self {
        self.warn_on_unobservable = warn;
        self
    }
}

// ---------------------------------------------------------------------------
// ViewEngineBuilder
// ---------------------------------------------------------------------------

/// Collects services for a [`ViewEngine`].
pub struct ViewEngineBuilder {
    config: EngineConfig,
    assets: Rc<dyn AssetCache>,
    scopes: Rc<dyn ResolutionScopeFactory>,
    views: RootViewFactory,
    behaviors: BehaviorFactory,
}

impl Default for ViewEngineBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            assets: Rc::new(MemoryAssetCache::new()),
            scopes: Rc::new(DocumentScopeFactory::default()),
            views: RootViewFactory::with_standard_widgets(),
            behaviors: BehaviorFactory::new(),
        }
    }
}

impl ViewEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_assets(mut self, assets: Rc<dyn AssetCache>) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_scopes(mut self, scopes: Rc<dyn ResolutionScopeFactory>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Register a custom view for `tag`, replacing any standard widget.
    pub fn register_view(mut self, tag: &str, constructor: impl Fn() -> ViewRef + 'static) -> Self {
        self.views.register(tag, constructor);
        self
    }

    pub fn register_behavior(
        mut self,
        name: impl Into<String>,
        constructor: impl Fn(&str) -> Box<dyn ViewBehavior> + 'static,
    ) -> Self {
        self.behaviors.register(name, constructor);
        self
    }

    pub fn build(self) -> ViewEngine {
        let sources = Rc::new(ValueSourceFactory::new(
            self.assets.clone(),
            self.config.warn_on_unobservable,
        ));
        let binder = Rc::new(DescriptorViewBinder::new(
            Rc::new(DescriptorCache::new()),
            sources.clone(),
            Rc::new(self.behaviors),
        ));
        let nodes = Rc::new(ViewNodeFactory::new(
            Rc::new(self.views),
            binder,
            sources,
            self.scopes,
            self.config.max_template_depth,
        ));
        ViewEngine {
            config: self.config,
            assets: self.assets,
            nodes,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewEngine
// ---------------------------------------------------------------------------

/// Builds [`ViewTree`]s. Caches (descriptors, children binders) are shared by
/// every tree the engine creates.
pub struct ViewEngine {
    config: EngineConfig,
    assets: Rc<dyn AssetCache>,
    nodes: Rc<ViewNodeFactory>,
}

impl ViewEngine {
    pub fn builder() -> ViewEngineBuilder {
        ViewEngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn assets(&self) -> &Rc<dyn AssetCache> {
        &self.assets
    }

    pub fn parse(&self, markup: &str) -> Result<Rc<Document>, BindingError> {
        Ok(Rc::new(markup::parse(markup)?))
    }

    /// Start a new frame: every model may tick once more. Call once per host
    /// frame, before updating any tree.
    pub fn begin_frame(&self) {
        ContextUpdateTracker::reset();
    }

    /// Build a tree for `document` bound to `data` and run its first update
    /// as a frame of its own.
    pub fn create_tree(
        &self,
        document: &Rc<Document>,
        data: impl Into<Value>,
    ) -> Result<ViewTree, BindingError> {
        let mut tree = ViewTree {
            nodes: self.nodes.create_document(document)?,
            document: document.clone(),
        };
        tree.set_context(data);
        self.begin_frame();
        tree.update(Duration::ZERO)?;
        Ok(tree)
    }

    pub fn create_tree_from_markup(
        &self,
        markup: &str,
        data: impl Into<Value>,
    ) -> Result<ViewTree, BindingError> {
        let document = self.parse(markup)?;
        self.create_tree(&document, data)
    }
}

// ---------------------------------------------------------------------------
// ViewTree
// ---------------------------------------------------------------------------

/// A live tree of views bound to a data context.
pub struct ViewTree {
    document: Rc<Document>,
    nodes: Vec<Box<dyn ViewNode>>,
}

impl ViewTree {
    pub fn document(&self) -> &Rc<Document> {
        &self.document
    }

    /// Replace the root data. `Null` unbinds the tree.
    pub fn set_context(&mut self, data: impl Into<Value>) {
        let data = data.into();
        let context = (!data.is_null()).then(|| BindingContext::root(data));
        for node in &mut self.nodes {
            node.set_context(context.clone());
        }
    }

    /// Run one update pass. Returns whether anything changed.
    ///
    /// Model ticks are deduplicated until the next
    /// [`ViewEngine::begin_frame`], so several trees sharing a model (or
    /// several updates of one tree) tick it once per frame.
    pub fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        let mut changed = false;
        for node in &mut self.nodes {
            changed |= node.update(elapsed)?;
        }
        Ok(changed)
    }

    /// Top-level views, in document order.
    pub fn views(&self) -> Vec<ViewRef> {
        self.nodes.iter().flat_map(|node| node.views()).collect()
    }

    /// The first top-level view.
    pub fn root_view(&self) -> Option<ViewRef> {
        self.views().into_iter().next()
    }

    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.print(&mut out, 0);
        }
        out
    }
}
