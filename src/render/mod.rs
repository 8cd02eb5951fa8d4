//! Binding of loaded documents into the page.

mod about;
mod binder;
mod cards;

pub use about::{bind_about, ABOUT_TEXT_ID, HERO_TAGS_ID, STAT_IDS};
pub use binder::set_text;
pub use cards::{
    project_card_markup, render_projects, render_skills, skill_card_markup, PROJECTS_GRID_ID,
    SKILLS_GRID_ID,
};
