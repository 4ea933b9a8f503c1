//! Tree queries over [`SNode`]s.

use super::document::SNode;

impl SNode {
    /// Depth-first, pre-order iterator over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First node (self included) with the given tag, ignoring ASCII case.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SNode> {
        self.descendants()
            .find(|n| n.element.tag.eq_ignore_ascii_case(tag))
    }

    /// Every node (self included) matching `predicate`, in document order.
    pub fn query_all(&self, predicate: impl Fn(&SNode) -> bool) -> Vec<&SNode> {
        self.descendants().filter(|n| predicate(n)).collect()
    }
}

/// Iterator returned by [`SNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::{SElement, SNode};

    fn node(tag: &str, children: Vec<SNode>) -> SNode {
        SNode::new(SElement::new(tag), children)
    }

    /// ```text
    ///        lane
    ///       /    \
    ///   frame    label(b)
    ///     |
    ///  label(a)
    /// ```
    fn sample() -> SNode {
        node(
            "lane",
            vec![node("frame", vec![node("label", vec![])]), node("Label", vec![])],
        )
    }

    #[test]
    fn descendants_are_pre_order() {
        let tree = sample();
        let tags: Vec<&str> = tree.descendants().map(SNode::tag).collect();
        assert_eq!(tags, vec!["lane", "frame", "label", "Label"]);
    }

    #[test]
    fn find_and_query() {
        let tree = sample();
        assert_eq!(tree.find_by_tag("FRAME").map(SNode::tag), Some("frame"));
        assert!(tree.find_by_tag("image").is_none());
        let labels = tree.query_all(|n| n.tag().eq_ignore_ascii_case("label"));
        assert_eq!(labels.len(), 2);
    }
}
