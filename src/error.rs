//! Error types shared by sources, bindings and the view-node tree.
//!
//! Errors fall into two groups. Shape errors (a markup/model mismatch such as
//! too many children for a single-child view) are returned as
//! [`BindingError`] and terminate the current update pass. Missing data
//! (no context, unresolved path, missing asset) is never an error; it degrades
//! to [`Value::Null`](crate::model::Value::Null) and is retried every tick.

use crate::markup::ParseError;

/// Errors raised while building or updating bindings.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error(
        "cannot bind {count} children to view type {view_type} because it does not define any \
         writable child/children property"
    )]
    ChildrenNotSupported { view_type: String, count: usize },

    #[error(
        "cannot bind {count} children to view type {view_type} because it only supports a single \
         child/content view"
    )]
    TooManyChildren { view_type: String, count: usize },

    #[error("view type {view_type} has no outlet named '{outlet}'")]
    UnknownOutlet { view_type: String, outlet: String },

    #[error("view type {view_type} does not accept floating elements")]
    FloatingNotSupported { view_type: String },

    #[error("no view is registered for tag '{0}'")]
    UnknownTag(String),

    #[error("view type {view_type} has no property named '{property}'")]
    UnknownViewProperty { view_type: String, property: String },

    #[error("view type {view_type} has no event named '{event}'")]
    UnknownEvent { view_type: String, event: String },

    #[error("type {type_name} has no property named '{property}'")]
    UnknownModelProperty { type_name: String, property: String },

    #[error("type {type_name} has no method named '{method}'")]
    UnknownMethod { type_name: String, method: String },

    #[error("{0}")]
    NotSupported(String),

    #[error("binding to '{property}' on {view_type} is invalid: {message}")]
    InvalidBinding {
        view_type: String,
        property: String,
        message: String,
    },

    #[error("invalid '{directive}' directive: {message}")]
    InvalidDirective { directive: String, message: String },

    #[error("template parameter '&{0}' used outside of a template")]
    UnresolvedTemplateParameter(String),

    #[error("template expansion exceeded the maximum depth of {0}")]
    TemplateTooDeep(usize),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A value could not be converted to the destination kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot convert {value} to {target}")]
pub struct ConversionError {
    /// Debug rendering of the offending value.
    pub value: String,
    /// Name of the destination kind.
    pub target: &'static str,
}
