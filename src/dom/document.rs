//! Document and node tree.

use std::fmt;
use std::rc::Rc;

use super::node::SElement;

/// An element and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct SNode {
    pub element: Rc<SElement>,
    pub children: Vec<SNode>,
}

impl SNode {
    pub fn new(element: SElement, children: Vec<SNode>) -> Self {
        Self {
            element: Rc::new(element),
            children,
        }
    }

    pub fn tag(&self) -> &str {
        &self.element.tag
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        if self.children.is_empty() {
            let open = self.element.to_string();
            let self_closing = open.strip_suffix('>').unwrap_or(&open);
            return writeln!(f, "{indent}{self_closing} />");
        }
        writeln!(f, "{indent}{}", self.element)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        writeln!(f, "{indent}</{}>", self.element.tag)
    }
}

impl fmt::Display for SNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// A parsed StarML document: one root element and any number of templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: SNode,
    /// `<template name="...">` definitions, in source order.
    pub templates: Vec<SNode>,
}

impl Document {
    pub fn new(root: SNode) -> Self {
        Self {
            root,
            templates: Vec::new(),
        }
    }

    /// Template whose `name` attribute matches `name`, ignoring ASCII case.
    pub fn template(&self, name: &str) -> Option<&SNode> {
        self.templates.iter().find(|t| {
            t.element
                .attribute("name")
                .is_some_and(|a| a.value.eq_ignore_ascii_case(name))
        })
    }

    pub fn has_templates(&self) -> bool {
        !self.templates.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for template in &self.templates {
            write!(f, "{template}")?;
        }
        Ok(())
    }
}
