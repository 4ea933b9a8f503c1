use std::rc::Rc;
use std::time::Duration;

use super::conditional::SwitchScope;
use super::{indent, same_views, ChildrenBinder, ViewNode, ViewNodeFactory};
use crate::binding::ViewBinding;
use crate::content::ResolutionScope;
use crate::context::{same_context, BindingContext};
use crate::dom::SElement;
use crate::error::BindingError;
use crate::sources::ValueSource;
use crate::view::{FloatingElement, ViewRef};

enum ElementState {
    Unrealized,
    Realized {
        view: ViewRef,
        children_binder: Rc<ChildrenBinder>,
        binding: Option<ViewBinding>,
    },
}

/// The node for one view element.
///
/// The view is created lazily on the first update. Bindings are rebuilt
/// whenever the context changes; child views are re-attached only when some
/// child's output actually changed.
pub struct ElementNode {
    factory: Rc<ViewNodeFactory>,
    element: Rc<SElement>,
    scope: Rc<dyn ResolutionScope>,
    children: Vec<Box<dyn ViewNode>>,
    switch: Option<Rc<SwitchScope>>,
    switch_source: Option<Box<dyn ValueSource>>,
    context: Option<Rc<BindingContext>>,
    context_changed: bool,
    state: ElementState,
}

impl ElementNode {
    pub fn new(
        factory: Rc<ViewNodeFactory>,
        element: Rc<SElement>,
        scope: Rc<dyn ResolutionScope>,
        children: Vec<Box<dyn ViewNode>>,
        switch: Option<Rc<SwitchScope>>,
    ) -> Self {
        Self {
            factory,
            element,
            scope,
            children,
            switch,
            switch_source: None,
            context: None,
            context_changed: true,
            state: ElementState::Unrealized,
        }
    }

    pub fn element(&self) -> &Rc<SElement> {
        &self.element
    }

    pub fn child_nodes(&self) -> &[Box<dyn ViewNode>] {
        &self.children
    }

    pub fn view(&self) -> Option<&ViewRef> {
        match &self.state {
            ElementState::Realized { view, .. } => Some(view),
            ElementState::Unrealized => None,
        }
    }

    pub fn is_realized(&self) -> bool {
        matches!(self.state, ElementState::Realized { .. })
    }

    fn realize(&mut self) -> Result<(), BindingError> {
        let view = self.factory.views().create_view(&self.element.tag)?;
        let descriptor = self.factory.binder().descriptor(&view);
        let children_binder = self.factory.children_binders().get(&view, &descriptor);
        tracing::debug!(tag = %self.element.tag, view_type = %descriptor.type_name, "realized view");
        self.state = ElementState::Realized {
            view,
            children_binder,
            binding: None,
        };
        Ok(())
    }

    fn update_switch(&mut self, rebuild: bool) -> Result<(), BindingError> {
        let (Some(switch), Some(attribute)) = (&self.switch, self.element.structural("switch"))
        else {
            return Ok(());
        };
        if rebuild || self.switch_source.is_none() {
            let mut source = self.factory.sources().create_for_attribute(
                attribute,
                self.context.as_ref(),
                &self.scope,
            )?;
            source.update(true);
            switch.set_value(source.value());
            self.switch_source = Some(source);
        } else if let Some(source) = self.switch_source.as_mut() {
            if source.update(false) {
                switch.set_value(source.value());
            }
        }
        Ok(())
    }

    fn attach_children(
        view: &ViewRef,
        binder: &ChildrenBinder,
        children: &[Box<dyn ViewNode>],
    ) -> Result<(), BindingError> {
        let mut outlets: Vec<Option<&str>> = Vec::new();
        for child in children {
            let outlet = child.outlet();
            if !outlets.contains(&outlet) {
                outlets.push(outlet);
            }
        }
        for outlet in outlets {
            let views: Vec<ViewRef> = children
                .iter()
                .filter(|child| child.outlet() == outlet)
                .flat_map(|child| child.views())
                .collect();
            binder.set_children(view, outlet, views)?;
        }
        let floating: Vec<FloatingElement> = children
            .iter()
            .flat_map(|child| child.floating_elements())
            .collect();
        binder.set_floating(view, floating)
    }
}

impl ViewNode for ElementNode {
    fn context(&self) -> Option<Rc<BindingContext>> {
        self.context.clone()
    }

    fn set_context(&mut self, context: Option<Rc<BindingContext>>) {
        if same_context(self.context.as_ref(), context.as_ref()) {
            return;
        }
        self.context = context;
        self.context_changed = true;
    }

    fn views(&self) -> Vec<ViewRef> {
        self.view().cloned().into_iter().collect()
    }

    fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        let mut changed = false;
        if !self.is_realized() {
            self.realize()?;
            changed = true;
        }
        if let Some(context) = &self.context {
            context.tick(elapsed);
        }

        let context_changed = self.context_changed;
        if context_changed {
            if let ElementState::Realized { binding, .. } = &mut self.state {
                *binding = None;
            }
            for child in &mut self.children {
                child.set_context(self.context.clone());
            }
            changed = true;
        }

        let ElementState::Realized { view, binding, .. } = &mut self.state else {
            return Ok(changed);
        };
        match binding {
            Some(binding) => changed |= binding.update(elapsed)?,
            None => {
                *binding = Some(self.factory.binder().bind(
                    view,
                    &self.element,
                    self.context.as_ref(),
                    &self.scope,
                )?);
                changed = true;
            }
        }
        self.update_switch(context_changed)?;

        let mut children_changed = false;
        for child in &mut self.children {
            let previous_views = child.views();
            let previous_floating = child.floating_elements();
            child.update(elapsed)?;
            children_changed |= !same_views(&previous_views, &child.views())
                || previous_floating != child.floating_elements();
        }
        if children_changed {
            if let ElementState::Realized {
                view,
                children_binder,
                ..
            } = &self.state
            {
                Self::attach_children(view, children_binder, &self.children)?;
            }
        }

        self.context_changed = false;
        Ok(changed)
    }

    fn print(&self, out: &mut String, depth: usize) {
        indent(out, depth);
        let open = self.element.to_string();
        if self.children.is_empty() {
            let open = open.strip_suffix('>').unwrap_or(&open);
            out.push_str(open);
            out.push_str(" />\n");
            return;
        }
        out.push_str(&open);
        out.push('\n');
        for child in &self.children {
            child.print(out, depth + 1);
        }
        indent(out, depth);
        out.push_str("</");
        out.push_str(&self.element.tag);
        out.push_str(">\n");
    }
}
