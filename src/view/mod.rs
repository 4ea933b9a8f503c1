//! The view abstraction the binding core writes into.

mod event;
mod factory;
mod floating;
mod traits;

pub use event::{raise_event, EventArgs, EventHandler};
pub use factory::{RootViewFactory, ViewConstructor, ViewFactory};
pub use floating::{FloatingAnchor, FloatingElement, FloatingPosition, PositionFn};
pub use traits::{same_view, view_as, view_as_mut, View, ViewRef};
