//! Immutable StarML document model.
//!
//! A parsed [`Document`] is a tree of [`SNode`]s. Element definitions are
//! reference counted so that every view node created from the same markup
//! (for example, every row of a repeater) shares one [`SElement`].

pub mod document;
pub mod node;
pub mod query;

pub use document::{Document, SNode};
pub use node::{
    ArgumentType, AttributeType, AttributeValueType, BindingDirection, ContextRedirect,
    SArgument, SAttribute, SElement, SEvent,
};
