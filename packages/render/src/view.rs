//! View node tree emitted by the renderer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of the rendered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewNode {
    /// Element with attributes and children.
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<ViewNode>,
    },

    /// Plain text content.
    Text { content: String },

    /// Pre-rendered rich text html, injected as-is.
    RichHtml { content: String },
}

impl ViewNode {
    pub fn element(tag: impl Into<String>) -> Self {
        ViewNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        ViewNode::Text {
            content: content.into(),
        }
    }

    pub fn rich_html(content: impl Into<String>) -> Self {
        ViewNode::RichHtml {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let ViewNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: ViewNode) -> Self {
        if let ViewNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<ViewNode>) -> Self {
        if let ViewNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            ViewNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            ViewNode::Text { .. } | ViewNode::RichHtml { .. } => None,
        }
    }

    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Element { children, .. } => children,
            ViewNode::Text { .. } | ViewNode::RichHtml { .. } => &[],
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            ViewNode::Element { tag, .. } => Some(tag),
            ViewNode::Text { .. } | ViewNode::RichHtml { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_helpers() {
        let node = ViewNode::element("figure")
            .with_attr("class", "image-row")
            .with_child(ViewNode::element("img").with_attr("src", "https://cdn/a.jpg"));

        assert_eq!(node.tag(), Some("figure"));
        assert_eq!(node.attr("class"), Some("image-row"));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].attr("src"), Some("https://cdn/a.jpg"));
    }

    #[test]
    fn test_view_node_serde_tagging() {
        let node = ViewNode::text("hi");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["content"], "hi");
    }
}
