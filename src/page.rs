//! Page initialization: year, navigation, data loading and binding.

use chrono::Datelike;
use thiserror::Error;
use tracing::{info, warn};

use crate::dom::{Document, DomError};
use crate::loader::{load_site_data, DocumentState, FailurePolicy, LoadError, ResourceSource};
use crate::nav::{Navigation, ScrollSpy};
use crate::render::{bind_about, render_projects, render_skills};

pub const YEAR_ID: &str = "year";

/// Errors that abort page initialization.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("required element #{0} is missing from the page")]
    MissingElement(&'static str),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// What happened to one page section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// Bound; the count is elements bound (about) or cards rendered (grids).
    Rendered(usize),
    /// The document answered with a non-success status.
    Unavailable(u16),
    /// The document could not be fetched or parsed.
    Invalid(String),
    /// The document loaded but the page has no container for it.
    NoContainer,
}

impl SectionOutcome {
    fn skipped<T>(state: &DocumentState<T>) -> Self {
        match state {
            DocumentState::Unavailable { status } => Self::Unavailable(*status),
            DocumentState::Failed(e) => Self::Invalid(e.to_string()),
            DocumentState::Loaded(_) => Self::NoContainer,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Summary of one initialization pass.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub year: i32,
    pub navigation: Navigation,
    pub about: SectionOutcome,
    pub skills: SectionOutcome,
    pub projects: SectionOutcome,
}

/// Populates a host page from the data documents.
pub struct PageInitializer {
    source: Box<dyn ResourceSource>,
    policy: FailurePolicy,
    year: Option<i32>,
    spy: ScrollSpy,
}

impl PageInitializer {
    pub fn new(source: Box<dyn ResourceSource>) -> Self {
        Self {
            source,
            policy: FailurePolicy::default(),
            year: None,
            spy: ScrollSpy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a fixed footer year instead of the current one.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_nav_offset(mut self, offset: f64) -> Self {
        self.spy = ScrollSpy::new(offset);
        self
    }

    /// Run the full initialization sequence against `doc`.
    ///
    /// Grids are cleared before they are filled, so running this twice on
    /// the same document does not duplicate cards.
    pub async fn initialize(&self, doc: &mut Document) -> Result<InitReport, RenderError> {
        let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
        let year_node = doc
            .get_element_by_id(YEAR_ID)
            .ok_or(RenderError::MissingElement(YEAR_ID))?;
        doc.set_text_content(year_node, &year.to_string());

        let navigation = Navigation::wire(doc, self.spy)?;

        let data = load_site_data(self.source.as_ref(), self.policy).await?;

        let about = match &data.about {
            DocumentState::Loaded(about) => SectionOutcome::Rendered(bind_about(doc, about)),
            other => SectionOutcome::skipped(other),
        };

        let skills = match &data.skills {
            DocumentState::Loaded(skills) => render_skills(doc, skills)
                .map(SectionOutcome::Rendered)
                .unwrap_or(SectionOutcome::NoContainer),
            other => SectionOutcome::skipped(other),
        };

        let projects = match &data.projects {
            DocumentState::Loaded(projects) => render_projects(doc, projects)
                .map(SectionOutcome::Rendered)
                .unwrap_or(SectionOutcome::NoContainer),
            other => SectionOutcome::skipped(other),
        };

        for (name, outcome) in [("about", &about), ("skills", &skills), ("projects", &projects)] {
            if !outcome.is_rendered() {
                warn!(section = name, ?outcome, "Section left unchanged");
            }
        }
        info!(
            source = %self.source.describe(),
            ?about,
            ?skills,
            ?projects,
            "Page initialized"
        );

        Ok(InitReport {
            year,
            navigation,
            about,
            skills,
            projects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{MemorySource, ABOUT_PATH, PROJECTS_PATH, SKILLS_PATH};

    const PAGE: &str = r##"<!DOCTYPE html><html><body>
        <nav><button class="nav-toggle"></button>
          <ul class="nav-links"><li><a href="#about">About</a></li></ul></nav>
        <section id="about">
          <h1 id="hero-name">Your name</h1>
          <div id="hero-tags"><span class="tag">placeholder</span></div>
          <b id="stat-1">-</b>
        </section>
        <section id="skills"><div id="skills-grid"><p>Loading</p></div></section>
        <section id="projects"><div id="projects-grid"><p>Loading</p></div></section>
        <footer>© <span id="year">2000</span></footer>
    </body></html>"##;

    fn full_source() -> MemorySource {
        MemorySource::new()
            .with_json(
                ABOUT_PATH,
                r#"{"name": "Maria", "heroTags": ["rust"], "stats": ["7 years"]}"#,
            )
            .with_json(
                SKILLS_PATH,
                r#"[{"title": "Rust", "tags": ["tokio"]}, {"title": "SQL"}]"#,
            )
            .with_json(PROJECTS_PATH, r#"[{"title": "folio", "year": 2025}]"#)
    }

    fn text(doc: &Document, id: &str) -> String {
        doc.text_content(doc.get_element_by_id(id).unwrap())
    }

    fn grid_html(doc: &Document, id: &str) -> String {
        doc.inner_html(doc.get_element_by_id(id).unwrap())
    }

    #[tokio::test]
    async fn test_initialize_binds_everything() {
        let mut doc = Document::parse(PAGE);
        let report = PageInitializer::new(Box::new(full_source()))
            .with_year(2026)
            .initialize(&mut doc)
            .await
            .unwrap();

        assert_eq!(text(&doc, "year"), "2026");
        assert_eq!(text(&doc, "hero-name"), "Maria");
        assert_eq!(text(&doc, "stat-1"), "7 years");
        assert_eq!(report.skills, SectionOutcome::Rendered(2));
        assert_eq!(report.projects, SectionOutcome::Rendered(1));
        assert!(report.about.is_rendered());
        assert_eq!(report.navigation.sections(), ["about", "skills", "projects"]);
        assert_eq!(doc.query_selector_all(".skill-card").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_loads_leave_sections_untouched() {
        let pristine = Document::parse(PAGE);
        let source = MemorySource::new()
            .with_status(ABOUT_PATH, 404)
            .with_status(SKILLS_PATH, 500)
            .with_status(PROJECTS_PATH, 403);

        let mut doc = Document::parse(PAGE);
        let report = PageInitializer::new(Box::new(source))
            .with_year(2026)
            .initialize(&mut doc)
            .await
            .unwrap();

        assert_eq!(report.about, SectionOutcome::Unavailable(404));
        assert_eq!(report.skills, SectionOutcome::Unavailable(500));
        assert_eq!(report.projects, SectionOutcome::Unavailable(403));
        for id in ["hero-name", "hero-tags", "stat-1"] {
            assert_eq!(text(&doc, id), text(&pristine, id));
        }
        assert_eq!(grid_html(&doc, "skills-grid"), grid_html(&pristine, "skills-grid"));
        assert_eq!(grid_html(&doc, "projects-grid"), grid_html(&pristine, "projects-grid"));
    }

    #[tokio::test]
    async fn test_malformed_document_only_skips_its_section() {
        let source = full_source().with_json(SKILLS_PATH, "[{]");
        let mut doc = Document::parse(PAGE);
        let report = PageInitializer::new(Box::new(source))
            .with_year(2026)
            .initialize(&mut doc)
            .await
            .unwrap();

        assert!(matches!(report.skills, SectionOutcome::Invalid(_)));
        assert_eq!(grid_html(&doc, "skills-grid"), "<p>Loading</p>");
        assert_eq!(text(&doc, "hero-name"), "Maria");
        assert_eq!(report.projects, SectionOutcome::Rendered(1));
    }

    #[tokio::test]
    async fn test_strict_policy_aborts_before_binding() {
        let source = full_source().with_json(SKILLS_PATH, "[{]");
        let mut doc = Document::parse(PAGE);
        let result = PageInitializer::new(Box::new(source))
            .with_policy(FailurePolicy::Strict)
            .with_year(2026)
            .initialize(&mut doc)
            .await;

        assert!(matches!(result, Err(RenderError::Load(LoadError::Parse { .. }))));
        assert_eq!(text(&doc, "hero-name"), "Your name");
    }

    #[tokio::test]
    async fn test_year_defaults_to_current() {
        let mut doc = Document::parse(PAGE);
        let report = PageInitializer::new(Box::new(full_source()))
            .initialize(&mut doc)
            .await
            .unwrap();

        let current = chrono::Local::now().year();
        assert!(report.year == current || report.year + 1 == current);
        assert_eq!(text(&doc, "year"), report.year.to_string());
    }

    #[tokio::test]
    async fn test_missing_year_element_is_an_error() {
        let mut doc = Document::parse(r#"<html><body><h1 id="hero-name">x</h1></body></html>"#);
        let result = PageInitializer::new(Box::new(full_source()))
            .initialize(&mut doc)
            .await;

        assert!(matches!(result, Err(RenderError::MissingElement("year"))));
        assert_eq!(text(&doc, "hero-name"), "x");
    }

    #[tokio::test]
    async fn test_reinitialize_does_not_duplicate_cards() {
        let initializer = PageInitializer::new(Box::new(full_source())).with_year(2026);
        let mut doc = Document::parse(PAGE);
        initializer.initialize(&mut doc).await.unwrap();
        initializer.initialize(&mut doc).await.unwrap();

        assert_eq!(doc.query_selector_all(".skill-card").unwrap().len(), 2);
        assert_eq!(doc.query_selector_all(".project-card").unwrap().len(), 1);
        assert_eq!(doc.query_selector_all("#hero-tags .tag").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_grid_reports_no_container() {
        let mut doc = Document::parse(r#"<html><body><span id="year"></span></body></html>"#);
        let report = PageInitializer::new(Box::new(full_source()))
            .with_year(2026)
            .initialize(&mut doc)
            .await
            .unwrap();
        assert_eq!(report.skills, SectionOutcome::NoContainer);
        assert_eq!(report.projects, SectionOutcome::NoContainer);
    }
}
