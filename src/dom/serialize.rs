//! HTML serialization through html5ever.

use html5ever::serialize::{serialize, Serialize, SerializeOpts, TraversalScope};

use super::{Document, NodeId};

/// Pages are parsed with scripting enabled, so `<noscript>` content is raw
/// text and has to be written back unescaped.
fn opts(traversal_scope: TraversalScope) -> SerializeOpts {
    SerializeOpts {
        scripting_enabled: true,
        traversal_scope,
        create_missing_parent: false,
    }
}

fn write<T: Serialize>(node: &T, scope: TraversalScope) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    if serialize(&mut buf, node, opts(scope)).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

impl Document {
    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        write(&self.html, TraversalScope::IncludeNode)
    }

    /// Serialize the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        self.element_ref(id)
            .map(|el| write(&el, TraversalScope::ChildrenOnly(None)))
            .unwrap_or_default()
    }

    /// Serialize `id` and its descendants.
    pub fn outer_html(&self, id: NodeId) -> String {
        self.element_ref(id)
            .map(|el| write(&el, TraversalScope::IncludeNode))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::Document;

    fn round_trip(markup: &str) -> String {
        Document::parse(markup).to_html()
    }

    #[test]
    fn test_round_trip_keeps_structure() {
        let page = r#"<!DOCTYPE html><html><head><meta charset="utf-8"></head><body><p class="x">a &amp; b</p><br></body></html>"#;
        assert_eq!(round_trip(page), page);
    }

    #[test]
    fn test_raw_text_elements_are_not_escaped() {
        let page = concat!(
            "<!DOCTYPE html><html><head><script>if (a < b && c) {}</script>",
            "<style>p > a { color: red }</style></head><body>",
            r#"<noscript><img src="pixel.gif"></noscript>"#,
            "<iframe>a &amp; <b>b</b></iframe>",
            "<xmp><i>as is</i></xmp>",
            "</body></html>"
        );
        let once = round_trip(page);
        assert!(once.contains(r#"<noscript><img src="pixel.gif"></noscript>"#));
        assert!(once.contains("<script>if (a < b && c) {}</script>"));
        assert!(once.contains("<style>p > a { color: red }</style>"));
        assert!(once.contains("<iframe>a &amp; <b>b</b></iframe>"));
        assert!(once.contains("<xmp><i>as is</i></xmp>"));
        assert_eq!(round_trip(&once), once);
    }

    #[test]
    fn test_noscript_survives_binding_elsewhere() {
        let mut doc = Document::parse(
            r#"<html><body><h1 id="hero-name">x</h1><noscript><img src="pixel.gif"></noscript></body></html>"#,
        );
        let name = doc.get_element_by_id("hero-name").unwrap();
        doc.set_text_content(name, "Maria");
        let html = doc.to_html();
        assert!(html.contains(r#"<h1 id="hero-name">Maria</h1>"#));
        assert!(html.contains(r#"<noscript><img src="pixel.gif"></noscript>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = Document::parse(r#"<div id="t"></div>"#);
        let target = doc.get_element_by_id("t").unwrap();
        doc.set_text_content(target, "<b>a & b</b>");
        assert_eq!(
            doc.outer_html(target),
            r#"<div id="t">&lt;b&gt;a &amp; b&lt;/b&gt;</div>"#
        );
        assert_eq!(doc.inner_html(target), "&lt;b&gt;a &amp; b&lt;/b&gt;");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut doc = Document::parse(r#"<a id="l">x</a>"#);
        let link = doc.get_element_by_id("l").unwrap();
        doc.set_attr(link, "title", r#"say "hi" & go"#);
        assert!(doc.outer_html(link).contains(r#"title="say &quot;hi&quot; &amp; go""#));
    }

    #[test]
    fn test_detached_nodes_are_not_written() {
        let mut doc = Document::parse(r#"<div id="grid"><p>old</p></div>"#);
        let grid = doc.get_element_by_id("grid").unwrap();
        doc.set_inner_html(grid, "<p>new</p>");
        assert_eq!(doc.inner_html(grid), "<p>new</p>");
        assert!(!doc.to_html().contains("old"));
    }
}
