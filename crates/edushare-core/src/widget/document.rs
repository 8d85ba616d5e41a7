//! Host document abstraction for the rating widget.
//!
//! The widget never owns the page it lives in. It looks up its container and
//! backing field through [`RatingDocument`], creates its symbols as children of
//! the container and toggles their classes. [`HeadlessDocument`] is an
//! in-memory element tree implementing the trait for tests and previews.

use std::collections::{BTreeMap, BTreeSet};

/// Minimal DOM-like surface the rating widget needs from its host.
pub trait RatingDocument {
    /// Handle to an element. Handles compare equal when they refer to the same element.
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Find an element by its id attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Read an attribute of an element.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Set an attribute on an element.
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Create a child element at the end of `parent` with a class and text content.
    ///
    /// Returns `None` if the host could not create the element.
    fn append_child(
        &mut self,
        parent: &Self::Element,
        tag: &str,
        class: &str,
        text: &str,
    ) -> Option<Self::Element>;

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: &Self::Element, child: &Self::Element);

    /// Add or remove a class on an element.
    fn set_class(&mut self, element: &Self::Element, class: &str, enabled: bool);

    /// Current value of a form field.
    fn value(&self, field: &Self::Element) -> String;

    /// Set the value of a form field.
    fn set_value(&mut self, field: &Self::Element, value: &str);
}

/// Handle to an element of a [`HeadlessDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    value: String,
    children: Vec<NodeId>,
}

/// In-memory element tree.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    nodes: Vec<Node>,
}

impl HeadlessDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level element with the given tag and id.
    pub fn add_element(&mut self, tag: &str, id: &str) -> NodeId {
        let node = self.push(tag);
        self.nodes[node.0]
            .attributes
            .insert("id".to_string(), id.to_string());
        node
    }

    /// Add a widget container carrying an optional initial-rating attribute.
    pub fn add_container(&mut self, id: &str, attribute: &str, initial: Option<&str>) -> NodeId {
        let node = self.add_element("div", id);
        if let Some(initial) = initial {
            self.nodes[node.0]
                .attributes
                .insert(attribute.to_string(), initial.to_string());
        }
        node
    }

    /// Add a hidden form field with a starting value.
    pub fn add_field(&mut self, id: &str, value: &str) -> NodeId {
        let node = self.add_element("input", id);
        let field = &mut self.nodes[node.0];
        field.attributes.insert("type".to_string(), "hidden".to_string());
        field.value = value.to_string();
        node
    }

    /// Total number of elements in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of an element, in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Tag name of an element.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.tag.as_str())
    }

    /// Text content of an element.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.text.as_str())
    }

    /// Check if an element has a class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .map(|n| n.classes.contains(class))
            .unwrap_or(false)
    }

    fn push(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        id
    }
}

impl RatingDocument for HeadlessDocument {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.attributes.get("id").map(String::as_str) == Some(id))
            .map(NodeId)
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes.get(element.0)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn append_child(&mut self, parent: &NodeId, tag: &str, class: &str, text: &str) -> Option<NodeId> {
        if parent.0 >= self.nodes.len() {
            return None;
        }
        let child = self.push(tag);
        let node = &mut self.nodes[child.0];
        node.classes.insert(class.to_string());
        node.text = text.to_string();
        self.nodes[parent.0].children.push(child);
        Some(child)
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.retain(|c| c != child);
        }
    }

    fn set_class(&mut self, element: &NodeId, class: &str, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(element.0) {
            if enabled {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
        }
    }

    fn value(&self, field: &NodeId) -> String {
        self.nodes
            .get(field.0)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, field: &NodeId, value: &str) {
        if let Some(node) = self.nodes.get_mut(field.0) {
            node.value = value.to_string();
        }
    }
}
