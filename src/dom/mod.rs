//! The HTML page used as the rendering context.
//!
//! The page stays a `scraper::Html`. Queries run through `scraper::Selector`
//! and edits go straight to its `ego_tree`: text replaced, children cleared,
//! classes toggled, fragments grafted in.

mod parse;
mod serialize;

pub use ego_tree::NodeId;

use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{CaseSensitivity, ElementRef, Html, Node, Selector};
use thiserror::Error;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Errors raised by document queries.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// A parsed HTML page that binders can edit in place.
///
/// Node ids are only meaningful for the document that produced them.
/// Detached nodes stay in the tree's arena but are unreachable from the
/// root, so queries and serialization never see them.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl From<Html> for Document {
    fn from(html: Html) -> Self {
        Self { html }
    }
}

impl Document {
    /// The underlying scraper tree.
    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// The element at `id`, if `id` is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.html.tree.get(id)?.value().as_element()
    }

    fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::wrap(self.html.tree.get(id)?)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        Some(self.html.tree.get(id)?.parent()?.id())
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// Element children only, skipping text and comments.
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.element_ref(id)
            .map(|el| el.child_elements().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// Create a detached element in the HTML namespace.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        let name = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(name));
        self.html
            .tree
            .orphan(Node::Element(Element::new(name, Vec::new())))
            .id()
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.html
            .tree
            .orphan(Node::Text(Text {
                text: scraper::StrTendril::from_slice(text),
            }))
            .id()
    }

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached. Returns false when the move would put a node
    /// inside itself.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.is_ancestor_or_self(child, parent) || self.html.tree.get(child).is_none() {
            return false;
        }
        match self.html.tree.get_mut(parent) {
            Some(mut node) => {
                node.append_id(child);
                true
            }
            None => false,
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, id: NodeId) -> bool {
        let Some(node) = self.html.tree.get(id) else {
            return false;
        };
        node.id() == candidate || node.ancestors().any(|ancestor| ancestor.id() == candidate)
    }

    /// Remove `id` from its parent, if any.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Remove all children of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id) {
            self.detach(child);
        }
    }

    /// Concatenated text of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.html.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|n| n.value().as_text())
            .map(|text| &**text)
            .collect()
    }

    /// Replace the children of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    /// Elements below `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(id)
            .map(|node| node.descendants().skip(1).map(|n| n.id()).collect())
            .unwrap_or_default()
    }

    /// First element in document order whose `id` attribute equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .find(|node| node.value().as_element().and_then(Element::id) == Some(id))
            .map(|node| node.id())
    }

    /// First element in document order matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Every element in document order matching `selector`.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let parsed = Selector::parse(selector).map_err(|e| DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.select(&parsed))
    }

    /// Elements reachable from the root that match `selector`.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| selector.matches(el))
            .map(|el| el.id())
            .collect()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Set or replace an attribute. Ignored for non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.edit_attrs(id, |attrs| {
            let value = StrTendril::from_slice(value);
            match attrs.iter_mut().find(|attr| is_named(&attr.name, name)) {
                Some(attr) => attr.value = value,
                None => attrs.push(Attribute {
                    name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
                    value,
                }),
            }
        });
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.edit_attrs(id, |attrs| attrs.retain(|attr| !is_named(&attr.name, name)));
    }

    /// Rebuild the element at `id` with edited attributes.
    ///
    /// Elements cache their id and class list, so attributes are never
    /// patched in place.
    fn edit_attrs(&mut self, id: NodeId, edit: impl FnOnce(&mut Vec<Attribute>)) {
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return;
        };
        let Node::Element(element) = node.value() else {
            return;
        };
        let mut attrs: Vec<Attribute> = element
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: StrTendril::from_slice(value),
            })
            .collect();
        edit(&mut attrs);
        *element = Element::new(element.name.clone(), attrs);
    }

    /// Class tokens in attribute order, or `None` for non-elements.
    fn class_list(&self, id: NodeId) -> Option<Vec<String>> {
        let element = self.element(id)?;
        Some(
            element
                .attr("class")
                .unwrap_or_default()
                .split_ascii_whitespace()
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.has_class(class, CaseSensitivity::CaseSensitive))
    }

    /// Add `class` if missing. Returns true if the class list changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        let Some(mut classes) = self.class_list(id) else {
            return false;
        };
        if classes.iter().any(|c| c == class) {
            return false;
        }
        classes.push(class.to_string());
        self.set_attr(id, "class", &classes.join(" "));
        true
    }

    /// Remove every occurrence of `class`. Returns true if the class list changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        let Some(classes) = self.class_list(id) else {
            return false;
        };
        let remaining: Vec<String> = classes.iter().filter(|c| *c != class).cloned().collect();
        if remaining.len() == classes.len() {
            return false;
        }
        self.set_attr(id, "class", &remaining.join(" "));
        true
    }

    /// Flip `class`. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.remove_class(id, class) {
            false
        } else {
            self.add_class(id, class)
        }
    }
}

fn is_named(name: &QualName, local: &str) -> bool {
    name.prefix.is_none() && name.ns.is_empty() && &*name.local == local
}
