//! Navigation behaviour: mobile menu toggle and scroll spy.
//!
//! [`Navigation::wire`] captures the relevant elements once, the way a page
//! script would on load. Events are then applied either directly or through
//! the throttled [`driver`].

pub mod driver;
mod layout;
mod scroll_spy;

pub use driver::{spawn, NavEvent, NavHandle, NavStats};
pub use layout::{Layout, LayoutError, SectionBox};
pub use scroll_spy::{ScrollSpy, DEFAULT_NAV_OFFSET};

use tracing::{debug, trace};

use crate::dom::{Document, DomError, NodeId};

pub const TOGGLE_SELECTOR: &str = ".nav-toggle";
pub const LINKS_SELECTOR: &str = ".nav-links";
pub const ANCHOR_SELECTOR: &str = ".nav-links a";
pub const SECTION_SELECTOR: &str = "section[id]";

pub const OPEN_CLASS: &str = "open";
pub const ACTIVE_CLASS: &str = "active";

/// Navigation elements captured from a page.
#[derive(Debug, Clone)]
pub struct Navigation {
    /// Set only when both the toggle and the links container exist.
    menu: Option<NodeId>,
    sections: Vec<String>,
    anchors: Vec<NodeId>,
    spy: ScrollSpy,
}

impl Navigation {
    /// Capture the toggle, links container, section ids and nav anchors.
    pub fn wire(doc: &Document, spy: ScrollSpy) -> Result<Self, DomError> {
        let toggle = doc.query_selector(TOGGLE_SELECTOR)?;
        let links = doc.query_selector(LINKS_SELECTOR)?;
        let menu = toggle.and(links);

        let sections: Vec<String> = doc
            .query_selector_all(SECTION_SELECTOR)?
            .into_iter()
            .filter_map(|section| doc.attr(section, "id").map(str::to_string))
            .collect();
        let anchors = doc.query_selector_all(ANCHOR_SELECTOR)?;

        debug!(
            menu = menu.is_some(),
            sections = sections.len(),
            anchors = anchors.len(),
            "Wired navigation"
        );

        Ok(Self {
            menu,
            sections,
            anchors,
            spy,
        })
    }

    pub fn has_menu(&self) -> bool {
        self.menu.is_some()
    }

    /// Section ids in document order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn anchors(&self) -> &[NodeId] {
        &self.anchors
    }

    pub fn spy(&self) -> ScrollSpy {
        self.spy
    }

    /// Flip the `open` class on the links container. Returns the new state,
    /// or `None` when the menu was not wired.
    pub fn toggle_menu(&self, doc: &mut Document) -> Option<bool> {
        let links = self.menu?;
        let open = doc.toggle_class(links, OPEN_CLASS);
        trace!(open, "Toggled menu");
        Some(open)
    }

    /// Highlight the anchor of the section in view at `scroll_y`.
    ///
    /// When a section matches, `active` is removed from every anchor and
    /// added to the one whose `href` is `#<id>`. When nothing matches the
    /// current highlight is kept. Returns the matched section id.
    pub fn on_scroll(&self, doc: &mut Document, layout: &Layout, scroll_y: f64) -> Option<String> {
        let id = self.spy.active_section(&self.sections, layout, scroll_y)?;
        let target = format!("#{}", id);
        for anchor in &self.anchors {
            doc.remove_class(*anchor, ACTIVE_CLASS);
            if doc.attr(*anchor, "href") == Some(target.as_str()) {
                doc.add_class(*anchor, ACTIVE_CLASS);
            }
        }
        trace!(scroll_y, section = id, "Scroll spy matched");
        Some(id.to_string())
    }

    /// The `href` targets of anchors currently marked active.
    pub fn active_links(&self, doc: &Document) -> Vec<String> {
        self.anchors
            .iter()
            .filter(|anchor| doc.has_class(**anchor, ACTIVE_CLASS))
            .filter_map(|anchor| doc.attr(*anchor, "href").map(str::to_string))
            .collect()
    }
}
