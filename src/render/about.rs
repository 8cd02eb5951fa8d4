//! Hero, about card, pills and stats.

use tracing::debug;

use super::binder::set_text;
use crate::dom::Document;
use crate::models::About;

pub const HERO_TAGS_ID: &str = "hero-tags";
pub const ABOUT_TEXT_ID: &str = "about-text";
pub const STAT_IDS: [&str; 3] = ["stat-1", "stat-2", "stat-3"];

/// Bind an about document into the page. Returns how many elements changed.
pub fn bind_about(doc: &mut Document, about: &About) -> usize {
    let initial = about.initial();
    let last_update = about.last_update_label();

    let fields: [(&str, Option<&str>); 16] = [
        ("logo-initial", Some(initial.as_str())),
        ("avatar-initial", Some(initial.as_str())),
        ("logo-name", about.name.as_deref()),
        ("footer-name", about.name.as_deref()),
        ("logo-role", about.role.as_deref()),
        ("card-name", about.name.as_deref()),
        ("card-role", about.role.as_deref()),
        ("hero-name", about.name.as_deref()),
        ("hero-role-text", about.hero_role_line.as_deref()),
        ("hero-tagline", about.tagline.as_deref()),
        ("card-bio", about.bio_card.as_deref()),
        ("pill-location", about.location.as_deref()),
        ("pill-focus", about.focus.as_deref()),
        ("pill-level", about.level.as_deref()),
        ("pill-status", about.status.as_deref()),
        ("pill-update", last_update.as_deref()),
    ];

    let mut bound = 0;
    for (id, value) in fields {
        if set_text(doc, id, value) {
            bound += 1;
        }
    }

    if let Some(tags) = &about.hero_tags {
        bound += usize::from(render_hero_tags(doc, tags));
    }
    if let Some(paragraphs) = &about.about_paragraphs {
        bound += usize::from(render_paragraphs(doc, paragraphs));
    }
    if let Some(stats) = &about.stats {
        for (id, stat) in STAT_IDS.into_iter().zip(stats) {
            if !stat.is_empty() && set_text(doc, id, Some(stat)) {
                bound += 1;
            }
        }
    }

    debug!(bound, initial = %initial, "Bound about section");
    bound
}

fn render_hero_tags(doc: &mut Document, tags: &[String]) -> bool {
    let Some(container) = doc.get_element_by_id(HERO_TAGS_ID) else {
        return false;
    };
    doc.clear_children(container);
    for tag in tags {
        let span = doc.create_element("span");
        doc.set_attr(span, "class", "tag");
        doc.set_text_content(span, tag);
        doc.append_child(container, span);
    }
    true
}

fn render_paragraphs(doc: &mut Document, paragraphs: &[String]) -> bool {
    let Some(container) = doc.get_element_by_id(ABOUT_TEXT_ID) else {
        return false;
    };
    doc.clear_children(container);
    for paragraph in paragraphs {
        let p = doc.create_element("p");
        doc.set_text_content(p, paragraph);
        doc.append_child(container, p);
        let br = doc.create_element("br");
        doc.append_child(container, br);
    }
    true
}
