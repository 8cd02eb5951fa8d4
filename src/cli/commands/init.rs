//! Initialize command.

use std::path::{Path, PathBuf};

use console::style;

use crate::config::DEFAULT_TEMPLATE;
use crate::loader::{ABOUT_PATH, PROJECTS_PATH, SKILLS_PATH};

const LAYOUT_FILE: &str = "layout.toml";

const STARTER_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Portfolio</title>
</head>
<body>
  <header class="nav">
    <a class="logo" href="#hero">
      <span class="logo-mark" id="logo-initial">M</span>
      <span>
        <strong id="logo-name">Your Name</strong>
        <small id="logo-role">Your role</small>
      </span>
    </a>
    <button class="nav-toggle" aria-label="Menu">&#9776;</button>
    <ul class="nav-links">
      <li><a href="#hero" class="active">Home</a></li>
      <li><a href="#about">About</a></li>
      <li><a href="#skills">Skills</a></li>
      <li><a href="#projects">Projects</a></li>
    </ul>
  </header>

  <main>
    <section id="hero">
      <h1 id="hero-name">Your Name</h1>
      <p id="hero-role-text">What you do</p>
      <p id="hero-tagline">One line about you.</p>
      <div id="hero-tags"></div>
      <aside class="hero-card">
        <div class="avatar" id="avatar-initial">M</div>
        <h2 id="card-name">Your Name</h2>
        <p id="card-role">Your role</p>
        <p id="card-bio">Short bio.</p>
        <div class="pills">
          <span class="pill" id="pill-location">Location</span>
          <span class="pill" id="pill-focus">Focus</span>
          <span class="pill" id="pill-level">Level</span>
          <span class="pill" id="pill-status">Status</span>
          <span class="pill" id="pill-update">Last update</span>
        </div>
      </aside>
    </section>

    <section id="about">
      <h2>About</h2>
      <div id="about-text"><p>Loading...</p></div>
      <div class="stats">
        <span id="stat-1">-</span>
        <span id="stat-2">-</span>
        <span id="stat-3">-</span>
      </div>
    </section>

    <section id="skills">
      <h2>Skills</h2>
      <div id="skills-grid"><p>Loading...</p></div>
    </section>

    <section id="projects">
      <h2>Projects</h2>
      <div id="projects-grid"><p>Loading...</p></div>
    </section>
  </main>

  <footer>
    &copy; <span id="year"></span> <span id="footer-name">Your Name</span>
  </footer>
</body>
</html>
"##;

const STARTER_ABOUT: &str = r#"{
  "name": "Maria Silva",
  "role": "Backend Engineer",
  "heroRoleLine": "I build reliable services in Rust.",
  "tagline": "Systems, storage and the occasional compiler.",
  "bioCard": "Engineer focused on fast, boring infrastructure.",
  "location": "Lisbon",
  "focus": "Distributed systems",
  "level": "Senior",
  "status": "Open to work",
  "lastUpdate": "2026-01",
  "heroTags": ["Rust", "Tokio", "PostgreSQL"],
  "aboutParagraphs": [
    "I have spent the last years building data pipelines.",
    "Outside work I maintain a few open-source crates."
  ],
  "stats": ["8+ years", "20 projects", "3 talks"]
}
"#;

const STARTER_SKILLS: &str = r#"[
  {
    "title": "Rust",
    "description": "Async services, CLIs and parsers.",
    "tags": ["tokio", "serde", "axum"]
  },
  {
    "title": "Databases",
    "description": "Schema design and query tuning.",
    "tags": ["PostgreSQL", "SQLite"]
  }
]
"#;

const STARTER_PROJECTS: &str = r#"[
  {
    "title": "folio",
    "description": "Renders this page from three JSON files.",
    "category": "Tooling",
    "year": 2026,
    "code": "https://example.com/folio"
  }
]
"#;

const STARTER_LAYOUT: &str = r#"# Section geometry for `folio spy`, in pixels.
[sections.hero]
top = 0
height = 640

[sections.about]
top = 640
height = 520

[sections.skills]
top = 1160
height = 600

[sections.projects]
top = 1760
height = 800
"#;

fn starter_files() -> [(&'static str, &'static str); 5] {
    [
        (DEFAULT_TEMPLATE, STARTER_PAGE),
        (ABOUT_PATH, STARTER_ABOUT),
        (SKILLS_PATH, STARTER_SKILLS),
        (PROJECTS_PATH, STARTER_PROJECTS),
        (LAYOUT_FILE, STARTER_LAYOUT),
    ]
}

/// Write the starter files into `dir`. Nothing is written if any of them
/// already exists.
async fn write_starter(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let files = starter_files();

    let existing: Vec<String> = files
        .iter()
        .map(|(name, _)| dir.join(name))
        .filter(|path| path.exists())
        .map(|path| path.display().to_string())
        .collect();
    if !existing.is_empty() {
        anyhow::bail!("Refusing to overwrite existing files: {}", existing.join(", "));
    }

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, contents).await?;
        written.push(path);
    }
    Ok(written)
}

/// Create a starter page, sample data and a layout file.
pub async fn cmd_init(dir: &Path) -> anyhow::Result<()> {
    let written = write_starter(dir).await?;
    for path in &written {
        println!("  {} Created {}", style("✓").green(), path.display());
    }

    println!("{} Initialized portfolio in {}", style("✓").green(), dir.display());
    println!("  Run {} to render it", style("folio render --output site.html").cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::loader::FsSource;
    use crate::nav::Layout;
    use crate::page::{PageInitializer, SectionOutcome};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_starter_renders_cleanly() {
        let dir = tempdir().unwrap();
        write_starter(dir.path()).await.unwrap();

        let template = std::fs::read_to_string(dir.path().join(DEFAULT_TEMPLATE)).unwrap();
        let mut doc = Document::parse(&template);
        let report = PageInitializer::new(Box::new(FsSource::new(dir.path())))
            .with_year(2026)
            .initialize(&mut doc)
            .await
            .unwrap();

        assert!(report.about.is_rendered());
        assert_eq!(report.skills, SectionOutcome::Rendered(2));
        assert_eq!(report.projects, SectionOutcome::Rendered(1));
        assert_eq!(
            report.navigation.sections(),
            ["hero", "about", "skills", "projects"]
        );

        let layout = Layout::load(&dir.path().join(LAYOUT_FILE)).await.unwrap();
        for id in report.navigation.sections() {
            assert!(layout.get(id).is_some(), "no geometry for {}", id);
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_TEMPLATE), "<p>mine</p>").unwrap();

        let err = write_starter(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("index.html"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join(DEFAULT_TEMPLATE)).unwrap(),
            "<p>mine</p>"
        );
        assert!(!dir.path().join(ABOUT_PATH).exists());
    }
}
