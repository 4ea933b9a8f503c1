use std::rc::Rc;

use super::{
    expand_template, ChildrenBinderCache, Condition, ConditionalNode, ContextNode, ElementNode,
    FloatingNode, IncludeNode, OutletNode, RepeaterNode, SwitchScope, ViewNode,
};
use crate::binding::ViewBinder;
use crate::content::{ResolutionScope, ResolutionScopeFactory};
use crate::dom::{AttributeValueType, Document, SAttribute, SNode};
use crate::error::BindingError;
use crate::sources::ValueSourceFactory;
use crate::view::ViewFactory;

const DIRECTIVES: [&str; 7] = ["if", "case", "switch", "repeat", "context", "outlet", "float"];

/// What a markup node is being built against: its document (for templates),
/// the document's resolution scope, the enclosing `*switch` and the current
/// template nesting depth.
#[derive(Clone)]
pub struct BuildScope {
    pub document: Rc<Document>,
    pub resolution: Rc<dyn ResolutionScope>,
    pub switch: Option<Rc<SwitchScope>>,
    pub depth: usize,
}

impl BuildScope {
    pub fn new(document: Rc<Document>, resolution: Rc<dyn ResolutionScope>) -> Self {
        Self {
            document,
            resolution,
            switch: None,
            depth: 0,
        }
    }
}

/// Builds view nodes from markup. Shared by every node that creates nodes
/// after construction (repeaters and includes).
pub struct ViewNodeFactory {
    views: Rc<dyn ViewFactory>,
    binder: Rc<dyn ViewBinder>,
    sources: Rc<ValueSourceFactory>,
    scopes: Rc<dyn ResolutionScopeFactory>,
    children: ChildrenBinderCache,
    max_template_depth: usize,
}

impl ViewNodeFactory {
    pub fn new(
        views: Rc<dyn ViewFactory>,
        binder: Rc<dyn ViewBinder>,
        sources: Rc<ValueSourceFactory>,
        scopes: Rc<dyn ResolutionScopeFactory>,
        max_template_depth: usize,
    ) -> Self {
        Self {
            views,
            binder,
            sources,
            scopes,
            children: ChildrenBinderCache::new(),
            max_template_depth,
        }
    }

    pub fn views(&self) -> &Rc<dyn ViewFactory> {
        &self.views
    }

    pub fn binder(&self) -> &Rc<dyn ViewBinder> {
        &self.binder
    }

    pub fn sources(&self) -> &Rc<ValueSourceFactory> {
        &self.sources
    }

    pub fn children_binders(&self) -> &ChildrenBinderCache {
        &self.children
    }

    /// Nodes for the root of `document`, using the document's own
    /// resolution scope.
    pub fn create_document(
        self: &Rc<Self>,
        document: &Rc<Document>,
    ) -> Result<Vec<Box<dyn ViewNode>>, BindingError> {
        let scope = BuildScope::new(document.clone(), self.scopes.create_for_document(document));
        self.create_nodes(&document.root, &scope)
    }

    /// Nodes for one markup node. A template invocation expands to as many
    /// nodes as the template has roots.
    pub fn create_nodes(
        self: &Rc<Self>,
        node: &SNode,
        scope: &BuildScope,
    ) -> Result<Vec<Box<dyn ViewNode>>, BindingError> {
        let Some(template) = scope.document.template(node.tag()) else {
            return Ok(vec![self.create_node(node, scope)?]);
        };
        if scope.depth >= self.max_template_depth {
            return Err(BindingError::TemplateTooDeep(self.max_template_depth));
        }
        tracing::trace!(template = node.tag(), depth = scope.depth, "expanding template");
        let inner = BuildScope {
            depth: scope.depth + 1,
            ..scope.clone()
        };
        let mut nodes = Vec::new();
        for expanded in expand_template(node, template) {
            nodes.extend(self.create_nodes(&expanded, &inner)?);
        }
        Ok(nodes)
    }

    /// One node with its `*repeat` and `*outlet` wrappers.
    fn create_node(
        self: &Rc<Self>,
        node: &SNode,
        scope: &BuildScope,
    ) -> Result<Box<dyn ViewNode>, BindingError> {
        validate_directives(node)?;
        let element = &node.element;
        let mut result: Box<dyn ViewNode> = match element.structural("repeat") {
            Some(repeat) => Box::new(RepeaterNode::new(
                self.clone(),
                node.clone(),
                repeat.clone(),
                scope.clone(),
            )),
            None => self.create_inner(node, scope)?,
        };
        if let Some(outlet) = element.structural("outlet") {
            result = Box::new(OutletNode::new(result, literal_directive(outlet)?));
        }
        Ok(result)
    }

    /// The element (or include) with its `*float`, `*context` and
    /// conditional wrappers. Repeaters call this once per item.
    pub(crate) fn create_inner(
        self: &Rc<Self>,
        node: &SNode,
        scope: &BuildScope,
    ) -> Result<Box<dyn ViewNode>, BindingError> {
        let element = &node.element;
        let mut result: Box<dyn ViewNode> = if element.tag.eq_ignore_ascii_case("include") {
            let name = element.attribute("name").ok_or_else(|| BindingError::InvalidDirective {
                directive: "include".into(),
                message: "missing 'name' attribute".into(),
            })?;
            Box::new(IncludeNode::new(
                self.clone(),
                name.clone(),
                scope.resolution.clone(),
            ))
        } else {
            let switch = element.structural("switch").map(|_| SwitchScope::new());
            let child_scope = BuildScope {
                switch: switch.clone().or_else(|| scope.switch.clone()),
                ..scope.clone()
            };
            let mut children = Vec::new();
            for child in &node.children {
                children.extend(self.create_nodes(child, &child_scope)?);
            }
            Box::new(ElementNode::new(
                self.clone(),
                element.clone(),
                scope.resolution.clone(),
                children,
                switch,
            ))
        };

        if let Some(float) = element.structural("float") {
            result = Box::new(FloatingNode::new(
                result,
                float.clone(),
                self.sources.clone(),
                scope.resolution.clone(),
            ));
        }
        if let Some(context) = element.structural("context") {
            result = Box::new(ContextNode::new(
                result,
                context.clone(),
                self.sources.clone(),
                scope.resolution.clone(),
            ));
        }
        if let Some(condition) = element.structural("if") {
            result = Box::new(ConditionalNode::new(
                result,
                Condition::If {
                    negated: condition.negated,
                },
                condition.clone(),
                self.sources.clone(),
                scope.resolution.clone(),
            ));
        }
        if let Some(case) = element.structural("case") {
            let switch = scope.switch.clone().ok_or_else(|| BindingError::InvalidDirective {
                directive: "case".into(),
                message: format!("<{}> has no enclosing *switch", element.tag),
            })?;
            result = Box::new(ConditionalNode::new(
                result,
                Condition::Case(switch),
                case.clone(),
                self.sources.clone(),
                scope.resolution.clone(),
            ));
        }
        Ok(result)
    }
}

fn validate_directives(node: &SNode) -> Result<(), BindingError> {
    for attribute in node.element.attributes.iter().filter(|a| a.is_structural()) {
        if !DIRECTIVES.contains(&attribute.name.as_str()) {
            return Err(BindingError::InvalidDirective {
                directive: attribute.name.clone(),
                message: "unknown structural attribute".into(),
            });
        }
        if attribute.negated && attribute.name != "if" {
            return Err(BindingError::InvalidDirective {
                directive: attribute.name.clone(),
                message: "only *if can be negated".into(),
            });
        }
        if attribute.value_type == AttributeValueType::TemplateBinding {
            return Err(BindingError::UnresolvedTemplateParameter(attribute.value.clone()));
        }
    }
    Ok(())
}

fn literal_directive(attribute: &SAttribute) -> Result<String, BindingError> {
    if attribute.value_type != AttributeValueType::Literal {
        return Err(BindingError::InvalidDirective {
            directive: attribute.name.clone(),
            message: format!("{attribute} must be a literal value"),
        });
    }
    Ok(attribute.value.clone())
}
