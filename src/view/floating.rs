//! Floating elements: views drawn relative to a parent but outside its
//! layout flow (tooltips, dropdowns, badges).

use std::fmt;
use std::rc::Rc;

use super::{same_view, ViewRef};
use crate::geometry::Vector2;

/// Computes a position from `(float_size, parent_size)`.
pub type PositionFn = Rc<dyn Fn(Vector2, Vector2) -> Vector2>;

/// Where a floating view is placed relative to its parent.
#[derive(Clone, Default)]
pub enum FloatingAnchor {
    /// Bottom edge touches the parent's top edge.
    Above,
    /// Top edge touches the parent's bottom edge.
    #[default]
    Below,
    /// Right edge touches the parent's left edge.
    Before,
    /// Left edge touches the parent's right edge.
    After,
    Custom(PositionFn),
}

impl PartialEq for FloatingAnchor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FloatingAnchor::Above, FloatingAnchor::Above)
            | (FloatingAnchor::Below, FloatingAnchor::Below)
            | (FloatingAnchor::Before, FloatingAnchor::Before)
            | (FloatingAnchor::After, FloatingAnchor::After) => true,
            (FloatingAnchor::Custom(a), FloatingAnchor::Custom(b)) => {
                crate::model::same_instance(a, b)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for FloatingAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatingAnchor::Above => f.write_str("Above"),
            FloatingAnchor::Below => f.write_str("Below"),
            FloatingAnchor::Before => f.write_str("Before"),
            FloatingAnchor::After => f.write_str("After"),
            FloatingAnchor::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// An anchor plus an extra offset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloatingPosition {
    pub anchor: FloatingAnchor,
    pub offset: Vector2,
}

impl FloatingPosition {
    pub fn new(anchor: FloatingAnchor) -> Self {
        Self {
            anchor,
            offset: Vector2::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// Parse `"above"`, `"after; 4, -2"` and similar (case-insensitive).
    pub fn parse(text: &str) -> Option<Self> {
        let (anchor, offset) = match text.split_once(';') {
            Some((anchor, offset)) => (anchor, Some(offset)),
            None => (text, None),
        };
        let anchor = match anchor.trim().to_ascii_lowercase().as_str() {
            "above" => FloatingAnchor::Above,
            "below" => FloatingAnchor::Below,
            "before" => FloatingAnchor::Before,
            "after" => FloatingAnchor::After,
            _ => return None,
        };
        let offset = match offset {
            Some(offset) => Vector2::parse(offset)?,
            None => Vector2::ZERO,
        };
        Some(Self { anchor, offset })
    }

    /// Top-left of the floating view relative to the parent's top-left.
    pub fn offset(&self, float_size: Vector2, parent_size: Vector2) -> Vector2 {
        let base = match &self.anchor {
            FloatingAnchor::Above => Vector2::new(0.0, -float_size.y),
            FloatingAnchor::Below => Vector2::new(0.0, parent_size.y),
            FloatingAnchor::Before => Vector2::new(-float_size.x, 0.0),
            FloatingAnchor::After => Vector2::new(parent_size.x, 0.0),
            FloatingAnchor::Custom(position) => position(float_size, parent_size),
        };
        base + self.offset
    }
}

/// A view floated by its parent.
#[derive(Clone)]
pub struct FloatingElement {
    pub view: ViewRef,
    pub position: FloatingPosition,
}

impl FloatingElement {
    pub fn new(view: ViewRef, position: FloatingPosition) -> Self {
        Self { view, position }
    }
}

/// Same view instance at the same position.
impl PartialEq for FloatingElement {
    fn eq(&self, other: &Self) -> bool {
        same_view(&self.view, &other.view) && self.position == other.position
    }
}

impl fmt::Debug for FloatingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingElement")
            .field("view", &self.view.borrow().type_name())
            .field("position", &self.position)
            .finish()
    }
}
