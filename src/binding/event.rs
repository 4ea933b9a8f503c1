use std::cell::RefCell;
use std::rc::Rc;

use crate::context::{self, BindingContext};
use crate::dom::{ArgumentType, SArgument, SEvent};
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::model::{ModelRef, Value};
use crate::sources::{ValueSource, ValueSourceFactory};
use crate::view::{EventArgs, EventHandler, ViewRef};

/// Where one handler argument comes from.
enum ArgumentSource {
    Constant(Value),
    Context(Box<dyn ValueSource>),
    Event(String),
}

impl ArgumentSource {
    fn resolve(&mut self, args: &EventArgs) -> Value {
        match self {
            ArgumentSource::Constant(value) => value.clone(),
            ArgumentSource::Context(source) => {
                source.update(false);
                source.value()
            }
            ArgumentSource::Event(field) => args.get(field).cloned().unwrap_or_default(),
        }
    }
}

/// Routes a view event to a method of the context model.
///
/// Dropping the binding removes the handler from the view.
pub struct EventBinding {
    view: ViewRef,
    event: String,
}

impl EventBinding {
    pub fn new(
        view: ViewRef,
        event: &SEvent,
        context: Option<&Rc<BindingContext>>,
        sources: &ValueSourceFactory,
    ) -> Result<Self, BindingError> {
        let target = context::resolve(context, event.handler_redirect.as_ref())
            .and_then(|target| target.model().cloned());
        let arguments = event
            .arguments
            .iter()
            .map(|argument| argument_source(argument, context, sources))
            .collect::<Result<Vec<_>, _>>()?;

        let handler = make_handler(target, event.handler_name.clone(), arguments);
        view.borrow_mut()
            .set_event_handler(&event.name, Some(handler))?;
        Ok(Self {
            view,
            event: event.name.clone(),
        })
    }

    pub fn event(&self) -> &str {
        &self.event
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        if let Ok(mut view) = self.view.try_borrow_mut() {
            let _ = view.set_event_handler(&self.event, None);
        }
    }
}

fn argument_source(
    argument: &SArgument,
    context: Option<&Rc<BindingContext>>,
    sources: &ValueSourceFactory,
) -> Result<ArgumentSource, BindingError> {
    Ok(match argument.argument_type {
        ArgumentType::Literal => ArgumentSource::Constant(Value::from(argument.expression.as_str())),
        ArgumentType::ContextBinding => ArgumentSource::Context(sources.context_source(
            &argument.expression,
            context,
            argument.redirect.as_ref(),
            true,
        )),
        ArgumentType::EventBinding => ArgumentSource::Event(argument.expression.clone()),
        ArgumentType::TemplateBinding => {
            return Err(BindingError::UnresolvedTemplateParameter(
                argument.expression.clone(),
            ))
        }
    })
}

fn make_handler(
    target: Option<ModelRef>,
    method: String,
    arguments: Vec<ArgumentSource>,
) -> EventHandler {
    let arguments = RefCell::new(arguments);
    Rc::new(move |args: &EventArgs| {
        let Some(model) = target.as_ref() else {
            warn_once(&format!("event-target:{method}"), || {
                format!("no context is available to handle '{method}'")
            });
            return false;
        };
        let values: Vec<Value> = arguments
            .borrow_mut()
            .iter_mut()
            .map(|argument| argument.resolve(args))
            .collect();
        match model.invoke(&method, &values) {
            Ok(result) => result == Value::Bool(true),
            Err(err) => {
                tracing::warn!(method = %method, error = %err, "event handler failed");
                false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::content::MemoryAssetCache;
    use crate::context::ContextRedirect;
    use crate::model::DynamicModel;
    use crate::view::raise_event;
    use crate::widgets::Button;

    fn sources() -> ValueSourceFactory {
        ValueSourceFactory::new(Rc::new(MemoryAssetCache::new()), false)
    }

    fn argument(expression: &str, argument_type: ArgumentType) -> SArgument {
        SArgument {
            expression: expression.into(),
            argument_type,
            redirect: None,
        }
    }

    fn recording_model(type_name: &str, log: Rc<RefCell<Vec<Vec<Value>>>>) -> Rc<DynamicModel> {
        DynamicModel::plain(type_name)
            .with_property("Id", 7)
            .with_method("Pick", move |_, args| {
                log.borrow_mut().push(args.to_vec());
                Value::Bool(true)
            })
            .into_ref()
    }

    #[test]
    fn invokes_method_with_resolved_arguments() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let context = BindingContext::root(Value::object(recording_model("Item", log.clone())));
        let view: ViewRef = Rc::new(RefCell::new(Button::new()));
        let event = SEvent {
            name: "click".into(),
            handler_name: "Pick".into(),
            handler_redirect: None,
            arguments: vec![
                argument("Id", ArgumentType::ContextBinding),
                argument("Button", ArgumentType::EventBinding),
                argument("x", ArgumentType::Literal),
            ],
        };
        let _binding = EventBinding::new(view.clone(), &event, Some(&context), &sources()).unwrap();

        let handled = raise_event(&view, "click", &EventArgs::new().with("Button", "Left"));
        assert!(handled);
        assert_eq!(
            *log.borrow(),
            vec![vec![Value::Int(7), Value::from("Left"), Value::from("x")]]
        );
    }

    #[test]
    fn handler_redirect_targets_parent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let parent = BindingContext::root(Value::object(recording_model("Menu", log.clone())));
        let child = BindingContext::new(
            Value::object(DynamicModel::plain("Item").into_ref()),
            Some(parent),
        );
        let view: ViewRef = Rc::new(RefCell::new(Button::new()));
        let event = SEvent {
            name: "click".into(),
            handler_name: "Pick".into(),
            handler_redirect: Some(ContextRedirect::Distance(1)),
            arguments: Vec::new(),
        };
        let _binding = EventBinding::new(view.clone(), &event, Some(&child), &sources()).unwrap();
        assert!(raise_event(&view, "click", &EventArgs::new()));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn unknown_method_is_unhandled() {
        let context = BindingContext::root(Value::object(DynamicModel::plain("Item").into_ref()));
        let view: ViewRef = Rc::new(RefCell::new(Button::new()));
        let event = SEvent {
            name: "click".into(),
            handler_name: "Missing".into(),
            handler_redirect: None,
            arguments: Vec::new(),
        };
        let _binding = EventBinding::new(view.clone(), &event, Some(&context), &sources()).unwrap();
        assert!(!raise_event(&view, "click", &EventArgs::new()));
    }

    #[test]
    fn drop_removes_handler() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let context = BindingContext::root(Value::object(recording_model("Item", log)));
        let view: ViewRef = Rc::new(RefCell::new(Button::new()));
        let event = SEvent {
            name: "click".into(),
            handler_name: "Pick".into(),
            handler_redirect: None,
            arguments: Vec::new(),
        };
        let binding = EventBinding::new(view.clone(), &event, Some(&context), &sources()).unwrap();
        assert!(view.borrow().event_handler("click").is_some());
        drop(binding);
        assert!(view.borrow().event_handler("click").is_none());
    }

    #[test]
    fn unknown_event_is_an_error() {
        let view: ViewRef = Rc::new(RefCell::new(Button::new()));
        let event = SEvent {
            name: "explode".into(),
            handler_name: "Pick".into(),
            handler_redirect: None,
            arguments: Vec::new(),
        };
        let result = EventBinding::new(view, &event, None, &sources());
        assert!(matches!(result, Err(BindingError::UnknownEvent { .. })));
    }
}
