//! Parsing host pages and grafting fragments into them.

use ego_tree::NodeRef;
use scraper::{Html, Node};

use super::{Document, NodeId};

impl Document {
    /// Parse a full HTML document.
    pub fn parse(markup: &str) -> Self {
        Self::from(Html::parse_document(markup))
    }

    /// Replace the children of `target` with the nodes parsed from `markup`.
    pub fn set_inner_html(&mut self, target: NodeId, markup: &str) {
        if self.html.tree.get(target).is_none() {
            return;
        }
        self.clear_children(target);
        let fragment = Html::parse_fragment(markup);
        for child in fragment.root_element().children() {
            self.graft(target, child);
        }
    }

    /// Deep-copy `source` from another tree under `parent`.
    fn graft(&mut self, parent: NodeId, source: NodeRef<'_, Node>) {
        let Some(mut node) = self.html.tree.get_mut(parent) else {
            return;
        };
        let id = node.append(source.value().clone()).id();
        for child in source.children() {
            self.graft(id, child);
        }
    }
}
