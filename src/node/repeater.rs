use std::rc::Rc;
use std::time::Duration;

use super::{BuildScope, ViewNode, ViewNodeFactory};
use crate::context::{same_context, BindingContext};
use crate::dom::{SAttribute, SNode};
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::model::{Value, ValueList};
use crate::sources::ValueSource;
use crate::view::{FloatingElement, ViewRef};

struct RepeatedItem {
    data: Value,
    node: Box<dyn ViewNode>,
}

/// `*repeat={...}`: one child node per list item.
///
/// Child nodes are matched to items by identity when the list changes, so an
/// item that stays in the list keeps its node and views.
pub struct RepeaterNode {
    factory: Rc<ViewNodeFactory>,
    node: SNode,
    attribute: SAttribute,
    scope: BuildScope,
    source: Option<Box<dyn ValueSource>>,
    list: Option<(Rc<ValueList>, u64)>,
    items: Vec<RepeatedItem>,
    context: Option<Rc<BindingContext>>,
    context_changed: bool,
}

impl RepeaterNode {
    pub fn new(
        factory: Rc<ViewNodeFactory>,
        node: SNode,
        attribute: SAttribute,
        scope: BuildScope,
    ) -> Self {
        Self {
            factory,
            node,
            attribute,
            scope,
            source: None,
            list: None,
            items: Vec::new(),
            context: None,
            context_changed: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn current_list(&self) -> Option<Rc<ValueList>> {
        let value = self.source.as_ref()?.value();
        match &value {
            Value::Null => None,
            Value::List(list) => Some(list.clone()),
            other => {
                warn_once(&format!("repeat:{}", self.attribute), || {
                    format!(
                        "{} produced {} instead of a list; nothing is repeated",
                        self.attribute,
                        other.kind_name()
                    )
                });
                None
            }
        }
    }

    fn list_changed(&self, list: Option<&Rc<ValueList>>) -> bool {
        match (list, &self.list) {
            (None, None) => false,
            (Some(list), Some((previous, version))) => {
                !Rc::ptr_eq(list, previous) || list.version() != *version
            }
            _ => true,
        }
    }

    /// Match items to existing nodes by identity, creating nodes for new items
    /// and dropping nodes for removed ones. Returns whether the item sequence
    /// changed.
    fn reconcile(&mut self, values: Vec<Value>) -> Result<bool, BindingError> {
        let mut previous: Vec<Option<RepeatedItem>> =
            std::mem::take(&mut self.items).into_iter().map(Some).collect();
        let mut changed = previous.len() != values.len();
        let mut items = Vec::with_capacity(values.len());
        for (index, data) in values.into_iter().enumerate() {
            let position = previous
                .iter()
                .position(|slot| slot.as_ref().is_some_and(|item| item.data == data));
            let reused = match position {
                Some(position) => {
                    changed |= position != index;
                    previous[position].take()
                }
                None => None,
            };
            let item = match reused {
                Some(item) => item,
                None => {
                    changed = true;
                    let mut node = self.factory.create_inner(&self.node, &self.scope)?;
                    node.set_context(Some(BindingContext::new(
                        data.clone(),
                        self.context.clone(),
                    )));
                    RepeatedItem { data, node }
                }
            };
            items.push(item);
        }
        let removed = previous.iter().filter(|slot| slot.is_some()).count();
        if removed > 0 {
            tracing::trace!(removed, "dropped repeated nodes");
        }
        self.items = items;
        Ok(changed)
    }
}

impl ViewNode for RepeaterNode {
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
        self.items.iter().flat_map(|item| item.node.views()).collect()
    }

    fn floating_elements(&self) -> Vec<FloatingElement> {
        self.items
            .iter()
            .flat_map(|item| item.node.floating_elements())
            .collect()
    }

    fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        let mut changed = false;
        let source_changed = if self.context_changed || self.source.is_none() {
            let mut source = self.factory.sources().create_for_attribute(
                &self.attribute,
                self.context.as_ref(),
                &self.scope.resolution,
            )?;
            source.update(true);
            self.source = Some(source);
            for item in &mut self.items {
                item.node.set_context(Some(BindingContext::new(
                    item.data.clone(),
                    self.context.clone(),
                )));
            }
            self.context_changed = false;
            true
        } else {
            self.source.as_mut().is_some_and(|s| s.update(false))
        };

        let list = self.current_list();
        if source_changed || self.list_changed(list.as_ref()) {
            let values = list.as_ref().map(|l| l.to_vec()).unwrap_or_default();
            changed |= self.reconcile(values)?;
            self.list = list.map(|l| {
                let version = l.version();
                (l, version)
            });
        }

        for item in &mut self.items {
            changed |= item.node.update(elapsed)?;
        }
        Ok(changed)
    }

    fn print(&self, out: &mut String, depth: usize) {
        for item in &self.items {
            item.node.print(out, depth);
        }
    }
}
