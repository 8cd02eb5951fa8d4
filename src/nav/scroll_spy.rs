//! Which section is currently in view.

use super::layout::{Layout, SectionBox};

/// Distance kept clear for the fixed header, in pixels.
pub const DEFAULT_NAV_OFFSET: f64 = 80.0;

/// Range test for section highlighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSpy {
    offset: f64,
}

impl Default for ScrollSpy {
    fn default() -> Self {
        Self::new(DEFAULT_NAV_OFFSET)
    }
}

impl ScrollSpy {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// A section is in view when `scroll_y` lies in
    /// `(top - offset, top - offset + height]`.
    pub fn in_view(&self, section: &SectionBox, scroll_y: f64) -> bool {
        let top = section.top - self.offset;
        scroll_y > top && scroll_y <= top + section.height
    }

    /// The section in view at `scroll_y`. When ranges overlap, the last
    /// matching section in `sections` order wins. Sections missing from
    /// `layout` never match.
    pub fn active_section<'a>(
        &self,
        sections: &'a [String],
        layout: &Layout,
        scroll_y: f64,
    ) -> Option<&'a str> {
        sections
            .iter()
            .rev()
            .find(|id| {
                layout
                    .get(id)
                    .is_some_and(|section| self.in_view(section, scroll_y))
            })
            .map(String::as_str)
    }
}
