//! Bindings: realized wiring between sources and a view.
//!
//! One [`ViewBinding`] exists per realized element node. It is built by a
//! [`ViewBinder`] against a binding context and replaced wholesale when the
//! context changes.

mod attribute;
mod behavior;
mod event;

pub use attribute::AttributeBinding;
pub use behavior::BehaviorBinding;
pub use event::EventBinding;

use std::rc::Rc;
use std::time::Duration;

use crate::behaviors::BehaviorFactory;
use crate::content::ResolutionScope;
use crate::context::BindingContext;
use crate::descriptors::{DescriptorCache, ViewDescriptor};
use crate::dom::{BindingDirection, SElement};
use crate::error::BindingError;
use crate::logging::warn_once;
use crate::sources::ValueSourceFactory;
use crate::view::ViewRef;

// ---------------------------------------------------------------------------
// ViewBinding
// ---------------------------------------------------------------------------

/// Every binding of one view. Dropping it releases sources and handlers.
#[derive(Default)]
pub struct ViewBinding {
    pub attributes: Vec<AttributeBinding>,
    pub events: Vec<EventBinding>,
    pub behaviors: Vec<BehaviorBinding>,
}

impl ViewBinding {
    /// Propagate pending changes. Returns whether anything moved.
    pub fn update(&mut self, elapsed: Duration) -> Result<bool, BindingError> {
        let mut changed = false;
        for attribute in &mut self.attributes {
            changed |= attribute.update()?;
        }
        for behavior in &mut self.behaviors {
            changed |= behavior.update(elapsed);
        }
        Ok(changed)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.events.is_empty() && self.behaviors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ViewBinder
// ---------------------------------------------------------------------------

/// Creates bindings for views.
pub trait ViewBinder {
    fn descriptor(&self, view: &ViewRef) -> Rc<ViewDescriptor>;

    /// Bind `element`'s attributes, events and behaviors to `view`. The new
    /// binding has already performed its forced first update.
    fn bind(
        &self,
        view: &ViewRef,
        element: &SElement,
        context: Option<&Rc<BindingContext>>,
        scope: &Rc<dyn ResolutionScope>,
    ) -> Result<ViewBinding, BindingError>;
}

/// [`ViewBinder`] driven by cached [`ViewDescriptor`]s.
pub struct DescriptorViewBinder {
    descriptors: Rc<DescriptorCache>,
    sources: Rc<ValueSourceFactory>,
    behaviors: Rc<BehaviorFactory>,
}

impl DescriptorViewBinder {
    pub fn new(
        descriptors: Rc<DescriptorCache>,
        sources: Rc<ValueSourceFactory>,
        behaviors: Rc<BehaviorFactory>,
    ) -> Self {
        Self {
            descriptors,
            sources,
            behaviors,
        }
    }
}

impl ViewBinder for DescriptorViewBinder {
    fn descriptor(&self, view: &ViewRef) -> Rc<ViewDescriptor> {
        self.descriptors.get(&*view.borrow())
    }

    fn bind(
        &self,
        view: &ViewRef,
        element: &SElement,
        context: Option<&Rc<BindingContext>>,
        scope: &Rc<dyn ResolutionScope>,
    ) -> Result<ViewBinding, BindingError> {
        let descriptor = self.descriptor(view);
        let mut binding = ViewBinding::default();

        for attribute in element.properties() {
            let property = descriptor.find_property(&attribute.name).ok_or_else(|| {
                BindingError::UnknownViewProperty {
                    view_type: descriptor.type_name.clone(),
                    property: attribute.name.clone(),
                }
            })?;
            let direction = attribute
                .value_type
                .direction()
                .unwrap_or(BindingDirection::In);
            let source = self.sources.create_for_attribute(attribute, context, scope)?;
            binding
                .attributes
                .push(AttributeBinding::new(view.clone(), property, direction, source)?);
        }

        for event in &element.events {
            if !descriptor.has_event(&event.name) {
                return Err(BindingError::UnknownEvent {
                    view_type: descriptor.type_name.clone(),
                    event: event.name.clone(),
                });
            }
            binding
                .events
                .push(EventBinding::new(view.clone(), event, context, &self.sources)?);
        }

        for attribute in element.behaviors() {
            let Some(behavior) = self.behaviors.create(&attribute.name) else {
                warn_once(&format!("behavior:{}", attribute.name), || {
                    format!("no behavior is registered for '+{}'", attribute.name)
                });
                continue;
            };
            if !behavior.can_attach(&*view.borrow()) {
                tracing::debug!(
                    behavior = %attribute.name,
                    view_type = %descriptor.type_name,
                    "behavior cannot attach to this view type; skipped"
                );
                continue;
            }
            let source = self.sources.create_for_attribute(attribute, context, scope)?;
            binding.behaviors.push(BehaviorBinding::new(
                attribute.name.clone(),
                view,
                behavior,
                source,
            ));
        }

        tracing::trace!(
            element = %element,
            attributes = binding.attributes.len(),
            events = binding.events.len(),
            behaviors = binding.behaviors.len(),
            "bound view"
        );
        Ok(binding)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::behaviors::ViewBehavior;
    use crate::content::{MemoryAssetCache, NullResolutionScope};
    use crate::markup::parse;
    use crate::model::{DynamicModel, Value};
    use crate::view::{view_as, View};
    use crate::widgets::Label;

    struct Counter {
        data: Rc<RefCell<Vec<Value>>>,
        ticks: Rc<Cell<u32>>,
        detached: Rc<Cell<bool>>,
    }

    impl ViewBehavior for Counter {
        fn can_attach(&self, view: &dyn View) -> bool {
            view.type_name() == "Label"
        }
        fn attach(&mut self, _view: ViewRef) {}
        fn set_data(&mut self, data: Value) {
            self.data.borrow_mut().push(data);
        }
        fn update(&mut self, _elapsed: Duration) {
            self.ticks.set(self.ticks.get() + 1);
        }
        fn detach(&mut self) {
            self.detached.set(true);
        }
    }

    fn binder(behaviors: BehaviorFactory) -> DescriptorViewBinder {
        DescriptorViewBinder::new(
            Rc::new(DescriptorCache::new()),
            Rc::new(ValueSourceFactory::new(Rc::new(MemoryAssetCache::new()), false)),
            Rc::new(behaviors),
        )
    }

    fn scope() -> Rc<dyn ResolutionScope> {
        Rc::new(NullResolutionScope)
    }

    fn element(markup: &str) -> Rc<SElement> {
        parse(markup).unwrap().root.element
    }

    #[test]
    fn binds_literals_and_context_values() {
        let model = DynamicModel::observable("M").with_property("Name", "Abigail").into_ref();
        let context = BindingContext::root(Value::object(model.clone()));
        let view: ViewRef = Rc::new(RefCell::new(Label::new()));
        let binder = binder(BehaviorFactory::new());

        let mut binding = binder
            .bind(
                &view,
                &element(r#"<label text={Name} max-lines="2" />"#),
                Some(&context),
                &scope(),
            )
            .unwrap();
        assert_eq!(binding.attributes.len(), 2);
        assert_eq!(view_as::<Label>(&view).unwrap().text(), "Abigail");
        assert_eq!(view_as::<Label>(&view).unwrap().max_lines(), 2);
        assert!(!binding.update(Duration::ZERO).unwrap());

        model.set_value("Name", "Sebastian");
        assert!(binding.update(Duration::ZERO).unwrap());
        assert_eq!(view_as::<Label>(&view).unwrap().text(), "Sebastian");
    }

    #[test]
    fn unknown_property_is_an_error() {
        let view: ViewRef = Rc::new(RefCell::new(Label::new()));
        let result = binder(BehaviorFactory::new()).bind(
            &view,
            &element(r#"<label colour="red" />"#),
            None,
            &scope(),
        );
        assert!(matches!(
            result,
            Err(BindingError::UnknownViewProperty { property, .. }) if property == "colour"
        ));
    }

    #[test]
    fn behaviors_receive_data_and_ticks() {
        let data = Rc::new(RefCell::new(Vec::new()));
        let ticks = Rc::new(Cell::new(0));
        let detached = Rc::new(Cell::new(false));
        let mut behaviors = BehaviorFactory::new();
        {
            let (data, ticks, detached) = (data.clone(), ticks.clone(), detached.clone());
            behaviors.register("count", move |_| {
                Box::new(Counter {
                    data: data.clone(),
                    ticks: ticks.clone(),
                    detached: detached.clone(),
                })
            });
        }
        let binder = binder(behaviors);
        let model = DynamicModel::observable("M").with_property("Mode", "a").into_ref();
        let context = BindingContext::root(Value::object(model.clone()));
        let view: ViewRef = Rc::new(RefCell::new(Label::new()));

        let mut binding = binder
            .bind(
                &view,
                &element(r#"<label +count={Mode} +missing="x" />"#),
                Some(&context),
                &scope(),
            )
            .unwrap();
        assert_eq!(binding.behaviors.len(), 1);
        assert_eq!(ticks.get(), 1);

        model.set_value("Mode", "b");
        assert!(binding.update(Duration::from_millis(16)).unwrap());
        assert_eq!(*data.borrow(), vec![Value::from("a"), Value::from("b")]);
        assert_eq!(ticks.get(), 2);

        drop(binding);
        assert!(detached.get());
    }

    #[test]
    fn incompatible_behavior_is_skipped() {
        let mut behaviors = BehaviorFactory::new();
        behaviors.register("count", |_| {
            Box::new(Counter {
                data: Rc::default(),
                ticks: Rc::default(),
                detached: Rc::default(),
            })
        });
        let view: ViewRef = Rc::new(RefCell::new(crate::widgets::Button::new()));
        let binding = binder(behaviors)
            .bind(&view, &element(r#"<button +count="x" />"#), None, &scope())
            .unwrap();
        assert!(binding.behaviors.is_empty());
    }
}
