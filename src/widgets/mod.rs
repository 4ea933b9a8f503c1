//! Built-in widgets: Label, Button, Image, CheckBox, Frame, Lane, Panel,
//! Expander, Spacer.
//!
//! These carry state only. They exist so that markup has real targets to
//! bind to; drawing and layout belong to the host.

pub mod button;
pub mod checkbox;
pub mod core;
pub mod expander;
pub mod frame;
pub mod image;
pub mod label;
pub mod lane;
pub mod panel;
pub mod spacer;

pub use self::core::{base_descriptor, StandardWidget, WidgetCore};
pub use button::Button;
pub use checkbox::CheckBox;
pub use expander::Expander;
pub use frame::Frame;
pub use image::Image;
pub use label::Label;
pub use lane::Lane;
pub use panel::Panel;
pub use spacer::Spacer;
