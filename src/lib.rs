//! # stardewui
//!
//! A reactive view-binding core for retained-mode UIs described in StarML
//! markup.
//!
//! A StarML document is parsed into an immutable DOM, then turned into a live
//! tree of view nodes bound to a data context. Every tick the tree
//! re-evaluates attribute, event and structural bindings against the
//! (possibly changed) data, creating and discarding views only where the
//! markup's conditions, repeaters and includes require it.
//!
//! ```
//! use std::time::Duration;
//! use stardewui::engine::ViewEngine;
//! use stardewui::model::{DynamicModel, Value};
//! use stardewui::view::view_as;
//! use stardewui::widgets::Label;
//!
//! let engine = ViewEngine::builder().build();
//! let model = DynamicModel::observable("Greeting")
//!     .with_property("Name", "Abigail")
//!     .into_ref();
//! let mut tree = engine
//!     .create_tree_from_markup("<label text={Name} />", Value::object(model.clone()))
//!     .unwrap();
//!
//! model.set_value("Name", "Sebastian");
//! tree.update(Duration::ZERO).unwrap();
//! let view = tree.root_view().unwrap();
//! assert_eq!(view_as::<Label>(&view).unwrap().text(), "Sebastian");
//! ```
//!
//! ## Core Systems
//!
//! - **[`markup`]** / **[`dom`]**: StarML tokenizer, parser and document model
//! - **[`model`]**: dynamic values and the capability traits data objects implement
//! - **[`sources`]**: value sources over context properties, paths, assets and translations
//! - **[`binding`]**: attribute, event and behavior bindings for one view
//! - **[`node`]**: the live view-node tree and structural directives
//! - **[`engine`]**: configuration and the tree facade

// Foundation
pub mod error;
pub mod geometry;
pub mod logging;

// Data
pub mod context;
pub mod convert;
pub mod model;

// Markup
pub mod dom;
pub mod markup;

// Services
pub mod content;
pub mod sources;

// Views
pub mod descriptors;
pub mod view;
pub mod widgets;

// Binding
pub mod behaviors;
pub mod binding;
pub mod node;

// Entry point
pub mod engine;

pub use engine::{EngineConfig, ViewEngine, ViewEngineBuilder, ViewTree};
pub use error::{BindingError, ConversionError};
