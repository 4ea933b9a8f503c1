//! Element, attribute and event records.

use std::fmt;

// ---------------------------------------------------------------------------
// Redirects
// ---------------------------------------------------------------------------

/// Moves a binding's lookup from the current context to another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextRedirect {
    /// `^`, repeated: walk up this many parents.
    Distance(u32),
    /// `~Type.`: nearest context (self first) whose model has this type name.
    Type(String),
}

impl fmt::Display for ContextRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextRedirect::Distance(n) => {
                for _ in 0..*n {
                    f.write_str("^")?;
                }
                Ok(())
            }
            ContextRedirect::Type(name) => write!(f, "~{name}."),
        }
    }
}

fn write_redirect(f: &mut fmt::Formatter<'_>, redirect: &Option<ContextRedirect>) -> fmt::Result {
    match redirect {
        Some(redirect) => write!(f, "{redirect}"),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Role of an attribute on its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// Sets a view property.
    Property,
    /// `*name`: structural directive.
    Structural,
    /// `+name`: attaches a behavior.
    Behavior,
}

/// Flow of data through a context binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingDirection {
    /// Context to view.
    In,
    /// View to context.
    Out,
    /// Both.
    InOut,
}

impl BindingDirection {
    pub fn is_in(self) -> bool {
        matches!(self, BindingDirection::In | BindingDirection::InOut)
    }

    pub fn is_out(self) -> bool {
        matches!(self, BindingDirection::Out | BindingDirection::InOut)
    }
}

/// How an attribute's value text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValueType {
    /// `"text"`
    Literal,
    /// `{Path}` or `{<Path}`
    InputBinding,
    /// `{:Path}` or `{<:Path}`
    OneTimeBinding,
    /// `{>Path}`
    OutputBinding,
    /// `{<>Path}`
    TwoWayBinding,
    /// `{@Asset/Name}`
    AssetBinding,
    /// `{@<Path}`: asset whose name is bound
    AssetNameBinding,
    /// `{@:Path}`: asset whose name is read once
    OneTimeAssetNameBinding,
    /// `{#Key}`
    TranslationBinding,
    /// `{&param}`: replaced during template expansion
    TemplateBinding,
}

impl AttributeValueType {
    /// Context-binding direction, if this is a context binding.
    pub fn direction(self) -> Option<BindingDirection> {
        match self {
            AttributeValueType::InputBinding | AttributeValueType::OneTimeBinding => {
                Some(BindingDirection::In)
            }
            AttributeValueType::OutputBinding => Some(BindingDirection::Out),
            AttributeValueType::TwoWayBinding => Some(BindingDirection::InOut),
            _ => None,
        }
    }

    pub fn is_context_binding(self) -> bool {
        self.direction().is_some()
    }

    /// Whether the source should stop tracking changes after the first read.
    pub fn is_one_time(self) -> bool {
        matches!(
            self,
            AttributeValueType::OneTimeBinding | AttributeValueType::OneTimeAssetNameBinding
        )
    }

    /// Whether the value text names something in the binding context.
    pub fn uses_context(self) -> bool {
        self.is_context_binding()
            || matches!(
                self,
                AttributeValueType::AssetNameBinding | AttributeValueType::OneTimeAssetNameBinding
            )
    }

    fn prefix(self) -> &'static str {
        match self {
            AttributeValueType::Literal | AttributeValueType::InputBinding => "",
            AttributeValueType::OneTimeBinding => ":",
            AttributeValueType::OutputBinding => ">",
            AttributeValueType::TwoWayBinding => "<>",
            AttributeValueType::AssetBinding => "@",
            AttributeValueType::AssetNameBinding => "@<",
            AttributeValueType::OneTimeAssetNameBinding => "@:",
            AttributeValueType::TranslationBinding => "#",
            AttributeValueType::TemplateBinding => "&",
        }
    }
}

/// One attribute of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct SAttribute {
    pub name: String,
    pub value: String,
    pub attribute_type: AttributeType,
    pub value_type: AttributeValueType,
    /// `*!if`
    pub negated: bool,
    pub redirect: Option<ContextRedirect>,
}

impl SAttribute {
    /// A literal property attribute.
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            attribute_type: AttributeType::Property,
            value_type: AttributeValueType::Literal,
            negated: false,
            redirect: None,
        }
    }

    pub fn is_structural(&self) -> bool {
        self.attribute_type == AttributeType::Structural
    }
}

impl fmt::Display for SAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.attribute_type {
            AttributeType::Property => {}
            AttributeType::Structural => f.write_str("*")?,
            AttributeType::Behavior => f.write_str("+")?,
        }
        if self.negated {
            f.write_str("!")?;
        }
        write!(f, "{}=", self.name)?;
        if self.value_type == AttributeValueType::Literal {
            return write!(f, "\"{}\"", self.value);
        }
        write!(f, "{{{}", self.value_type.prefix())?;
        write_redirect(f, &self.redirect)?;
        write!(f, "{}}}", self.value)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// How an event handler argument is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    /// `"text"`
    Literal,
    /// `Path` or `^Path`: read from the context.
    ContextBinding,
    /// `$Field`: read from the event arguments.
    EventBinding,
    /// `&param`: replaced during template expansion.
    TemplateBinding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SArgument {
    pub expression: String,
    pub argument_type: ArgumentType,
    pub redirect: Option<ContextRedirect>,
}

impl fmt::Display for SArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument_type {
            ArgumentType::Literal => write!(f, "\"{}\"", self.expression),
            ArgumentType::ContextBinding => {
                write_redirect(f, &self.redirect)?;
                f.write_str(&self.expression)
            }
            ArgumentType::EventBinding => write!(f, "${}", self.expression),
            ArgumentType::TemplateBinding => write!(f, "&{}", self.expression),
        }
    }
}

/// `name=|^Handler(args)|`
#[derive(Debug, Clone, PartialEq)]
pub struct SEvent {
    pub name: String,
    pub handler_name: String,
    pub handler_redirect: Option<ContextRedirect>,
    pub arguments: Vec<SArgument>,
}

impl fmt::Display for SEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=|", self.name)?;
        write_redirect(f, &self.handler_redirect)?;
        write!(f, "{}(", self.handler_name)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{argument}")?;
        }
        f.write_str(")|")
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A tag with its attributes and events.
#[derive(Debug, Clone, PartialEq)]
pub struct SElement {
    pub tag: String,
    pub attributes: Vec<SAttribute>,
    pub events: Vec<SEvent>,
}

impl SElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Non-structural attribute by exact name.
    pub fn attribute(&self, name: &str) -> Option<&SAttribute> {
        self.attributes
            .iter()
            .find(|a| !a.is_structural() && a.name == name)
    }

    /// Structural attribute (`*name`) by exact name.
    pub fn structural(&self, name: &str) -> Option<&SAttribute> {
        self.attributes
            .iter()
            .find(|a| a.is_structural() && a.name == name)
    }

    /// Attributes that set view properties.
    pub fn properties(&self) -> impl Iterator<Item = &SAttribute> {
        self.attributes
            .iter()
            .filter(|a| a.attribute_type == AttributeType::Property)
    }

    /// Attributes that attach behaviors.
    pub fn behaviors(&self) -> impl Iterator<Item = &SAttribute> {
        self.attributes
            .iter()
            .filter(|a| a.attribute_type == AttributeType::Behavior)
    }
}

/// The opening tag as markup, e.g. `<label text={Name} />` without the closer.
impl fmt::Display for SElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for attribute in &self.attributes {
            write!(f, " {attribute}")?;
        }
        for event in &self.events {
            write!(f, " {event}")?;
        }
        f.write_str(">")
    }
}
