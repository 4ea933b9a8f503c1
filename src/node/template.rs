//! Template expansion.
//!
//! `<template name="row">...</template>` defines a reusable fragment. An
//! element whose tag names a template is replaced by the template's children,
//! with `{&param}` values taken from the invoking element's attributes and
//! `<outlet />` placeholders filled with the invoking element's children.

use std::rc::Rc;

use crate::dom::{
    ArgumentType, AttributeValueType, SArgument, SAttribute, SElement, SEvent, SNode,
};

/// Expand one invocation of `template`. Returns the expanded roots.
pub fn expand_template(invocation: &SNode, template: &SNode) -> Vec<SNode> {
    let expander = Expander {
        invocation,
        has_outlets: template
            .children
            .iter()
            .any(|child| child.find_by_tag("outlet").is_some()),
    };
    let structural: Vec<SAttribute> = invocation
        .element
        .attributes
        .iter()
        .filter(|a| a.is_structural())
        .cloned()
        .collect();

    let mut roots = Vec::new();
    for child in &template.children {
        for mut root in expander.expand_node(child) {
            if !structural.is_empty() {
                let mut element = (*root.element).clone();
                element.attributes.extend(structural.iter().cloned());
                root.element = Rc::new(element);
            }
            roots.push(root);
        }
    }
    roots
}

struct Expander<'a> {
    invocation: &'a SNode,
    has_outlets: bool,
}

impl Expander<'_> {
    fn parameter(&self, name: &str) -> Option<&SAttribute> {
        self.invocation
            .element
            .attributes
            .iter()
            .find(|a| !a.is_structural() && a.name == name)
    }

    fn expand_node(&self, node: &SNode) -> Vec<SNode> {
        if self.has_outlets && node.tag().eq_ignore_ascii_case("outlet") {
            let name = node.element.attribute("name").map(|a| a.value.as_str());
            return self.outlet_children(name);
        }
        let children = node
            .children
            .iter()
            .flat_map(|child| self.expand_node(child))
            .collect();
        vec![SNode {
            element: Rc::new(self.expand_element(&node.element)),
            children,
        }]
    }

    fn expand_element(&self, element: &SElement) -> SElement {
        let attributes = element
            .attributes
            .iter()
            .filter_map(|attribute| {
                if attribute.value_type != AttributeValueType::TemplateBinding {
                    return Some(attribute.clone());
                }
                let parameter = self.parameter(&attribute.value)?;
                Some(SAttribute {
                    value: parameter.value.clone(),
                    value_type: parameter.value_type,
                    redirect: parameter.redirect.clone(),
                    ..attribute.clone()
                })
            })
            .collect();
        let events = element
            .events
            .iter()
            .map(|event| SEvent {
                arguments: event
                    .arguments
                    .iter()
                    .map(|argument| self.expand_argument(argument))
                    .collect(),
                ..event.clone()
            })
            .collect();
        SElement {
            tag: element.tag.clone(),
            attributes,
            events,
        }
    }

    fn expand_argument(&self, argument: &SArgument) -> SArgument {
        if argument.argument_type != ArgumentType::TemplateBinding {
            return argument.clone();
        }
        let Some(parameter) = self.parameter(&argument.expression) else {
            return argument.clone();
        };
        let argument_type = match parameter.value_type {
            AttributeValueType::Literal => ArgumentType::Literal,
            value_type if value_type.is_context_binding() => ArgumentType::ContextBinding,
            _ => return argument.clone(),
        };
        SArgument {
            expression: parameter.value.clone(),
            argument_type,
            redirect: parameter.redirect.clone(),
        }
    }

    /// Invocation children routed to the outlet `name`, with their `*outlet`
    /// attribute consumed.
    fn outlet_children(&self, name: Option<&str>) -> Vec<SNode> {
        self.invocation
            .children
            .iter()
            .filter(|child| {
                let outlet = child.element.structural("outlet").map(|a| a.value.as_str());
                outlet == name
            })
            .map(|child| {
                let mut element = (*child.element).clone();
                element
                    .attributes
                    .retain(|a| !(a.is_structural() && a.name == "outlet"));
                SNode {
                    element: Rc::new(element),
                    children: child.children.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::markup::parse;

    fn expand(markup: &str) -> String {
        let document = parse(markup).unwrap();
        let invocation = &document.root.children[0];
        let template = document.template(invocation.tag()).unwrap();
        expand_template(invocation, template)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn substitutes_parameters() {
        let expanded = expand(
            r#"<lane>
                <heading text="Title" color={Accent} />
            </lane>
            <template name="heading">
                <label text={&text} color={&color} tooltip={&missing} />
            </template>"#,
        );
        assert_eq!(expanded, "<label text=\"Title\" color={Accent} />\n");
    }

    #[test]
    fn fills_outlets_by_name() {
        let expanded = expand(
            r#"<lane>
                <row>
                    <label *outlet="side" text="b" />
                    <label text="a" />
                </row>
            </lane>
            <template name="row">
                <lane>
                    <outlet />
                    <outlet name="side" />
                </lane>
            </template>"#,
        );
        assert_eq!(
            expanded,
            "<lane>\n  <label text=\"a\" />\n  <label text=\"b\" />\n</lane>\n"
        );
    }

    #[test]
    fn appends_structural_attributes_to_roots() {
        let expanded = expand(
            r#"<lane>
                <pair *if={Visible} />
            </lane>
            <template name="pair">
                <label text="1" />
                <label text="2" />
            </template>"#,
        );
        assert_eq!(
            expanded,
            "<label text=\"1\" *if={Visible} />\n<label text=\"2\" *if={Visible} />\n"
        );
    }

    #[test]
    fn event_arguments_take_parameter_kind() {
        let expanded = expand(
            r#"<panel>
                <foo bar="abc" id={Id} />
            </panel>
            <template name="foo">
                <button click=|^Handle("dummy", &id, &bar)| />
            </template>"#,
        );
        assert_eq!(expanded, "<button click=|^Handle(\"dummy\", Id, \"abc\")| />\n");
    }
}
