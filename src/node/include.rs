use std::rc::Rc;
use std::time::Duration;

use super::{indent, ViewNode, ViewNodeFactory};
use crate::content::ResolutionScope;
use crate::context::{same_context, BindingContext};
use crate::dom::{Document, SAttribute};
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::sources::{AssetSource, ValueSource};
use crate::view::{FloatingElement, ViewRef};

/// `<include name=... />`: splices in the root of another document, loaded
/// from the asset cache. The name may be bound; the subtree is rebuilt
/// whenever it resolves to a different document.
pub struct IncludeNode {
    factory: Rc<ViewNodeFactory>,
    name: SAttribute,
    scope: Rc<dyn ResolutionScope>,
    source: Option<Box<dyn ValueSource>>,
    document: Option<Rc<Document>>,
    children: Vec<Box<dyn ViewNode>>,
    context: Option<Rc<BindingContext>>,
    context_changed: bool,
}

impl IncludeNode {
    pub fn new(
        factory: Rc<ViewNodeFactory>,
        name: SAttribute,
        scope: Rc<dyn ResolutionScope>,
    ) -> Self {
        Self {
            factory,
            name,
            scope,
            source: None,
            document: None,
            children: Vec::new(),
            context: None,
            context_changed: true,
        }
    }

    pub fn document(&self) -> Option<&Rc<Document>> {
        self.document.as_ref()
    }

    fn load(&mut self, document: Option<Rc<Document>>) -> Result<bool, BindingError> {
        let same = match (&document, &self.document) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return Ok(false);
        }
        self.children = match &document {
            Some(document) => {
                tracing::debug!(include = %self.name.value, "loading included document");
                let mut children = self.factory.create_document(document)?;
                for child in &mut children {
                    child.set_context(self.context.clone());
                }
                children
            }
            None => Vec::new(),
        };
        self.document = document;
        Ok(true)
    }
}

impl ViewNode for IncludeNode {
    fn context(&self) -> Option<Rc<BindingContext>> {
        self.context.clone()
    }

    fn set_context(&mut self, context: Option<Rc<BindingContext>>) {
        if same_context(self.context.as_ref(), context.as_ref()) {
            return;
        }
        for child in &mut self.children {
            child.set_context(context.clone());
        }
        self.context = context;
        self.context_changed = true;
    }

    fn views(&self) -> Vec<ViewRef> {
        self.children.iter().flat_map(|child| child.views()).collect()
    }

    fn floating_elements(&self) -> Vec<FloatingElement> {
        self.children
            .iter()
            .flat_map(|child| child.floating_elements())
            .collect()
    }

    fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        let refresh = if self.context_changed || self.source.is_none() {
            let name = self.factory.sources().create_for_attribute(
                &self.name,
                self.context.as_ref(),
                &self.scope,
            )?;
            let mut source = AssetSource::new(self.factory.sources().assets().clone(), name);
            source.update(true);
            self.source = Some(Box::new(source));
            self.context_changed = false;
            true
        } else {
            self.source.as_mut().is_some_and(|s| s.update(false))
        };

        let mut changed = false;
        if refresh {
            let value = self.source.as_ref().map(|s| s.value()).unwrap_or_default();
            let document = value.as_document().cloned();
            if document.is_none() && !value.is_null() {
                warn_once(&format!("include:{}", self.name), || {
                    format!("include {} is not a document ({})", self.name, value.kind_name())
                });
            }
            changed |= self.load(document)?;
        }
        for child in &mut self.children {
            changed |= child.update(elapsed)?;
        }
        Ok(changed)
    }

    fn print(&self, out: &mut String, depth: usize) {
        if self.children.is_empty() {
            indent(out, depth);
            out.push_str(&format!("<include {} />\n", self.name));
            return;
        }
        for child in &self.children {
            child.print(out, depth);
        }
    }
}
