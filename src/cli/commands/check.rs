//! Check command.

use console::style;

use crate::config::Settings;
use crate::loader::{load_site_data, DocumentState, ABOUT_PATH, PROJECTS_PATH, SKILLS_PATH};

/// Load the three documents and report on each.
pub async fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    let source = settings.create_source()?;
    println!(
        "{} Checking data in {}",
        style("→").cyan(),
        style(source.describe()).bold()
    );

    let data = load_site_data(source.as_ref(), settings.failure_policy()).await?;

    let mut failed = 0;
    failed += report(ABOUT_PATH, &data.about, |about| {
        format!("name {:?}", about.name.as_deref().unwrap_or_default())
    });
    failed += report(SKILLS_PATH, &data.skills, |skills| {
        format!("{} skills", skills.len())
    });
    failed += report(PROJECTS_PATH, &data.projects, |projects| {
        format!("{} projects", projects.len())
    });

    if failed > 0 {
        anyhow::bail!("{} of 3 documents failed to load", failed);
    }

    println!("{} All documents loaded", style("✓").green());
    Ok(())
}

fn report<T>(path: &str, state: &DocumentState<T>, summary: impl Fn(&T) -> String) -> usize {
    match state {
        DocumentState::Loaded(value) => {
            println!("  {} {}: {}", style("✓").green(), path, summary(value));
            0
        }
        DocumentState::Unavailable { status } => {
            println!("  {} {}: status {}", style("!").yellow(), path, status);
            1
        }
        DocumentState::Failed(e) => {
            println!("  {} {}: {}", style("✗").red(), path, e);
            1
        }
    }
}
