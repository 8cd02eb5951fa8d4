//! Skill and project card templates.

use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::models::{Project, Skill};
use crate::utils::html_escape;

pub const SKILLS_GRID_ID: &str = "skills-grid";
pub const PROJECTS_GRID_ID: &str = "projects-grid";

fn text(value: &Option<String>) -> std::borrow::Cow<'_, str> {
    html_escape(value.as_deref().unwrap_or_default())
}

/// Inner markup of a `div.skill-card`.
pub fn skill_card_markup(skill: &Skill) -> String {
    let tags: String = skill
        .tags()
        .iter()
        .map(|tag| format!(r#"<span class="skill-tag">{}</span>"#, html_escape(tag)))
        .collect();

    format!(
        r#"
          <h3>{}</h3>
          <p>{}</p>
          <div class="skill-tags">
            {}
          </div>
        "#,
        text(&skill.title),
        text(&skill.description),
        tags
    )
}

/// Inner markup of an `article.project-card`.
pub fn project_card_markup(project: &Project) -> String {
    format!(
        r#"
          <div>
            <div class="project-chip-row">
              <span class="project-chip">{}</span>
              <span>{}</span>
            </div>
            <h3 class="project-title">{}</h3>
            <p class="project-desc">{}</p>
          </div>
          <div class="project-links">
            <a href="{}" target="_blank" rel="noreferrer">
              Live Demo <span>↗</span>
            </a>
            <a href="{}" target="_blank" rel="noreferrer">
              &lt;/&gt; Code
            </a>
          </div>
        "#,
        text(&project.category),
        text(&project.year),
        text(&project.title),
        text(&project.description),
        html_escape(project.demo_href()),
        html_escape(project.code_href())
    )
}

/// Rebuild a grid with one card per item. Returns `None` when the page has
/// no element with `grid_id`.
fn render_grid<T>(
    doc: &mut Document,
    grid_id: &str,
    tag: &str,
    class: &str,
    items: &[T],
    markup: impl Fn(&T) -> String,
) -> Option<usize> {
    let grid: NodeId = doc.get_element_by_id(grid_id)?;
    doc.clear_children(grid);
    for item in items {
        let card = doc.create_element(tag);
        doc.set_attr(card, "class", class);
        doc.set_inner_html(card, &markup(item));
        doc.append_child(grid, card);
    }
    debug!(grid = grid_id, cards = items.len(), "Rendered grid");
    Some(items.len())
}

/// Rebuild `#skills-grid` from `skills`, in order.
pub fn render_skills(doc: &mut Document, skills: &[Skill]) -> Option<usize> {
    render_grid(doc, SKILLS_GRID_ID, "div", "skill-card", skills, skill_card_markup)
}

/// Rebuild `#projects-grid` from `projects`, in order.
pub fn render_projects(doc: &mut Document, projects: &[Project]) -> Option<usize> {
    render_grid(
        doc,
        PROJECTS_GRID_ID,
        "article",
        "project-card",
        projects,
        project_card_markup,
    )
}
