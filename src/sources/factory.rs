use std::rc::Rc;

use super::{
    AssetSource, ConstantSource, ContextPathSource, ContextPropertySource, NullSource,
    TranslationSource, ValueSource,
};
use crate::content::{AssetCache, ResolutionScope};
use crate::context::{self, BindingContext, ContextRedirect};
use crate::dom::{AttributeValueType, SAttribute};
use crate::error::BindingError;

/// Builds the [`ValueSource`] for an attribute value.
pub struct ValueSourceFactory {
    assets: Rc<dyn AssetCache>,
    warn_on_unobservable: bool,
}

impl ValueSourceFactory {
    pub fn new(assets: Rc<dyn AssetCache>, warn_on_unobservable: bool) -> Self {
        Self {
            assets,
            warn_on_unobservable,
        }
    }

    pub fn assets(&self) -> &Rc<dyn AssetCache> {
        &self.assets
    }

    /// Source for `attribute` evaluated in `context`.
    pub fn create_for_attribute(
        &self,
        attribute: &SAttribute,
        context: Option<&Rc<BindingContext>>,
        scope: &Rc<dyn ResolutionScope>,
    ) -> Result<Box<dyn ValueSource>, BindingError> {
        self.create(
            attribute.value_type,
            &attribute.value,
            attribute.redirect.as_ref(),
            context,
            scope,
        )
    }

    pub fn create(
        &self,
        value_type: AttributeValueType,
        text: &str,
        redirect: Option<&ContextRedirect>,
        context: Option<&Rc<BindingContext>>,
        scope: &Rc<dyn ResolutionScope>,
    ) -> Result<Box<dyn ValueSource>, BindingError> {
        let source: Box<dyn ValueSource> = match value_type {
            AttributeValueType::Literal => Box::new(ConstantSource::new(text)),
            AttributeValueType::InputBinding
            | AttributeValueType::OutputBinding
            | AttributeValueType::TwoWayBinding => self.context_source(text, context, redirect, true),
            AttributeValueType::OneTimeBinding => self.context_source(text, context, redirect, false),
            AttributeValueType::AssetBinding => Box::new(AssetSource::new(
                self.assets.clone(),
                Box::new(ConstantSource::new(text)),
            )),
            AttributeValueType::AssetNameBinding | AttributeValueType::OneTimeAssetNameBinding => {
                let name = self.context_source(
                    text,
                    context,
                    redirect,
                    value_type == AttributeValueType::AssetNameBinding,
                );
                Box::new(AssetSource::new(self.assets.clone(), name))
            }
            AttributeValueType::TranslationBinding => {
                Box::new(TranslationSource::new(scope.clone(), text, false))
            }
            AttributeValueType::TemplateBinding => {
                return Err(BindingError::UnresolvedTemplateParameter(text.to_owned()))
            }
        };
        Ok(source)
    }

    /// Source for a property path in the (redirected) context.
    ///
    /// `this` binds to the context data itself. A missing context, or context
    /// data that is not an object, yields a [`NullSource`].
    pub fn context_source(
        &self,
        path: &str,
        context: Option<&Rc<BindingContext>>,
        redirect: Option<&ContextRedirect>,
        allow_updates: bool,
    ) -> Box<dyn ValueSource> {
        let Some(context) = context::resolve(context, redirect) else {
            return Box::new(NullSource);
        };
        if path == "this" {
            return Box::new(ConstantSource::new(context.data().clone()));
        }
        let Some(model) = context.model().cloned() else {
            tracing::debug!(path, data = ?context.data(), "context data is not an object");
            return Box::new(NullSource);
        };
        let properties: Vec<String> = path.split('.').map(str::to_owned).collect();
        match properties.as_slice() {
            [single] => Box::new(ContextPropertySource::new(
                model,
                single.as_str(),
                allow_updates,
                self.warn_on_unobservable,
            )),
            _ => Box::new(ContextPathSource::new(
                model,
                properties,
                allow_updates,
                self.warn_on_unobservable,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{MemoryAssetCache, NullResolutionScope, TranslationScope};
    use crate::model::{DynamicModel, Value};

    fn factory() -> (ValueSourceFactory, Rc<MemoryAssetCache>) {
        let cache = Rc::new(MemoryAssetCache::new());
        (ValueSourceFactory::new(cache.clone(), false), cache)
    }

    fn null_scope() -> Rc<dyn ResolutionScope> {
        Rc::new(NullResolutionScope)
    }

    #[test]
    fn literal_and_this() {
        let (factory, _) = factory();
        let context = BindingContext::root("data");
        let mut literal = factory
            .create(AttributeValueType::Literal, "x", None, None, &null_scope())
            .unwrap();
        literal.update(true);
        assert_eq!(literal.value(), Value::from("x"));

        let this = factory.context_source("this", Some(&context), None, true);
        assert_eq!(this.value(), Value::from("data"));
    }

    #[test]
    fn missing_context_gives_null_source() {
        let (factory, _) = factory();
        let source = factory.context_source("Name", None, None, true);
        assert_eq!(source.display_name(), "(none)");

        let root = BindingContext::root(Value::object(DynamicModel::plain("M").into_ref()));
        let source =
            factory.context_source("Name", Some(&root), Some(&ContextRedirect::Distance(1)), true);
        assert!(source.value().is_null());
    }

    #[test]
    fn paths_and_redirects() {
        let (factory, _) = factory();
        let parent = BindingContext::root(Value::object(
            DynamicModel::plain("Parent").with_property("Title", "T").into_ref(),
        ));
        let inner = DynamicModel::plain("Inner").with_property("Text", "deep").into_ref();
        let child = BindingContext::new(
            Value::object(
                DynamicModel::plain("Child")
                    .with_property("Inner", Value::object(inner))
                    .into_ref(),
            ),
            Some(parent),
        );

        let mut up = factory.context_source("Title", Some(&child), Some(&ContextRedirect::Distance(1)), true);
        up.update(true);
        assert_eq!(up.value(), Value::from("T"));

        let mut deep = factory.context_source("Inner.Text", Some(&child), None, true);
        deep.update(false);
        assert_eq!(deep.value(), Value::from("deep"));
    }

    #[test]
    fn assets_and_translations() {
        let (factory, cache) = factory();
        cache.put("Sprites/Icon", 42);
        let context = BindingContext::root(Value::object(
            DynamicModel::plain("M").with_property("AssetName", "Sprites/Icon").into_ref(),
        ));

        let mut by_name = factory
            .create(AttributeValueType::AssetNameBinding, "AssetName", None, Some(&context), &null_scope())
            .unwrap();
        by_name.update(true);
        assert_eq!(by_name.value(), Value::Int(42));

        let scope: Rc<dyn ResolutionScope> =
            Rc::new(TranslationScope::new().with_translation("Key", "Text"));
        let mut translated = factory
            .create(AttributeValueType::TranslationBinding, "Key", None, None, &scope)
            .unwrap();
        translated.update(true);
        assert_eq!(translated.value(), Value::from("Text"));
    }

    #[test]
    fn template_parameter_outside_template_is_an_error() {
        let (factory, _) = factory();
        let result = factory.create(AttributeValueType::TemplateBinding, "p", None, None, &null_scope());
        assert!(matches!(
            result,
            Err(BindingError::UnresolvedTemplateParameter(name)) if name == "p"
        ));
    }
}
