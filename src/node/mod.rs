//! The live view-node tree.
//!
//! Each markup element becomes an [`ElementNode`], wrapped by one node per
//! structural directive it carries. Nodes are updated depth-first once per
//! tick; an update re-evaluates bindings, realizes or discards views and
//! pushes changed child lists into their parents.

mod children;
mod conditional;
mod context;
mod element;
mod factory;
mod floating;
mod include;
mod outlet;
mod repeater;
mod template;

pub use children::{ChildrenBinder, ChildrenBinderCache};
pub use conditional::{Condition, ConditionalNode, SwitchScope};
pub use context::ContextNode;
pub use element::ElementNode;
pub use factory::{BuildScope, ViewNodeFactory};
pub use floating::FloatingNode;
pub use include::IncludeNode;
pub use outlet::OutletNode;
pub use repeater::RepeaterNode;
pub use template::expand_template;

use std::rc::Rc;
use std::time::Duration;

use crate::context::BindingContext;
use crate::error::BindingError;
use crate::view::{same_view, FloatingElement, ViewRef};

/// A node in the live tree.
pub trait ViewNode {
    fn context(&self) -> Option<Rc<BindingContext>>;

    /// Replace the binding context. Takes effect on the next update.
    fn set_context(&mut self, context: Option<Rc<BindingContext>>);

    /// Views this node currently contributes to its parent's children.
    fn views(&self) -> Vec<ViewRef>;

    /// Views this node currently contributes as floating elements.
    fn floating_elements(&self) -> Vec<FloatingElement> {
        Vec::new()
    }

    /// Named children slot of the parent that receives [`views`](Self::views).
    fn outlet(&self) -> Option<&str> {
        None
    }

    /// Bring this node and its descendants up to date. Returns whether
    /// anything changed.
    fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError>;

    /// Append a readable dump of this subtree.
    fn print(&self, out: &mut String, depth: usize);
}

/// Dump a node tree as indented markup.
pub fn to_debug_string(node: &dyn ViewNode) -> String {
    let mut out = String::new();
    node.print(&mut out, 0);
    out
}

pub(crate) fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Sequence identity of two view lists.
pub(crate) fn same_views(a: &[ViewRef], b: &[ViewRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_view(a, b))
}
