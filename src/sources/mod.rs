//! Value sources: typed, pull-based accessors for one bound value.
//!
//! A source is polled with [`ValueSource::update`] once per tick. `update`
//! returns `true` when [`ValueSource::value`] may have changed since the last
//! call. Dropping a source releases any change subscriptions it holds.

mod asset;
mod constant;
mod factory;
mod path;
mod property;
mod translation;

pub use asset::AssetSource;
pub use constant::{ConstantSource, NullSource};
pub use factory::ValueSourceFactory;
pub use path::ContextPathSource;
pub use property::ContextPropertySource;
pub use translation::TranslationSource;

use crate::error::BindingError;
use crate::model::Value;

/// A single bound value.
pub trait ValueSource {
    fn can_read(&self) -> bool;
    fn can_write(&self) -> bool;

    /// Human-readable description for diagnostics and the debug dump.
    fn display_name(&self) -> String;

    /// The value as of the last [`update`](Self::update).
    fn value(&self) -> Value;

    /// Write through to the origin.
    fn set_value(&mut self, value: Value) -> Result<(), BindingError>;

    /// Check for changes. `force` re-reads unconditionally. Returns whether
    /// the value may have changed.
    fn update(&mut self, force: bool) -> bool;
}

pub(crate) fn read_only(name: &str) -> BindingError {
    BindingError::NotSupported(format!("writing to {name} is not supported"))
}
