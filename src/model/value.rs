use std::any::Any;
use std::fmt;
use std::rc::Rc;

use super::{same_instance, Model, ModelRef, ValueList};
use crate::dom::Document;

/// A dynamically typed value flowing through sources and bindings.
///
/// Scalars compare by value. Objects, lists, documents and opaque values
/// compare by reference identity, which is what the repeater and the
/// context-change checks rely on.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Object(ModelRef),
    List(Rc<ValueList>),
    Document(Rc<Document>),
    /// Opaque payload (sprites, colors, positions, anything the core only
    /// passes through).
    Any(Rc<dyn Any>),
}

impl Value {
    /// Wrap a concrete model.
    pub fn object<M: Model>(model: Rc<M>) -> Value {
        Value::Object(model)
    }

    /// Wrap an opaque payload.
    pub fn any<T: Any>(payload: T) -> Value {
        Value::Any(Rc::new(payload))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_model(&self) -> Option<&ModelRef> {
        match self {
            Value::Object(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Rc<ValueList>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Rc<Document>> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Borrow an opaque payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Any(payload) => (**payload).downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Object(_) => "Object",
            Value::List(_) => "List",
            Value::Document(_) => "Document",
            Value::Any(_) => "Any",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => same_instance(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Document(a), Value::Document(b)) => Rc::ptr_eq(a, b),
            (Value::Any(a), Value::Any(b)) => same_instance(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Object(model) => write!(f, "<{}>", model.type_name()),
            Value::List(list) => write!(f, "List[{}]", list.len()),
            Value::Document(_) => f.write_str("<Document>"),
            Value::Any(_) => f.write_str("<Any>"),
        }
    }
}

/// Text form used when a value is written into a string property.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Float(n) => write!(f, "{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ModelRef> for Value {
    fn from(model: ModelRef) -> Self {
        Value::Object(model)
    }
}

impl From<Rc<ValueList>> for Value {
    fn from(list: Rc<ValueList>) -> Self {
        Value::List(list)
    }
}

impl From<Rc<Document>> for Value {
    fn from(doc: Rc<Document>) -> Self {
        Value::Document(doc)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
