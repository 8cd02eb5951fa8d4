//! Render command.

use anyhow::Context;
use console::style;

use crate::config::Settings;
use crate::dom::Document;
use crate::page::{PageInitializer, SectionOutcome};

/// Render the template with its data bound and write the result.
pub async fn cmd_render(settings: &Settings, year: Option<i32>) -> anyhow::Result<()> {
    let template = tokio::fs::read_to_string(&settings.template)
        .await
        .with_context(|| format!("Failed to read template {}", settings.template.display()))?;

    let mut doc = Document::parse(&template);
    let mut initializer = PageInitializer::new(settings.create_source()?)
        .with_policy(settings.failure_policy())
        .with_nav_offset(settings.nav_offset);
    if let Some(year) = year {
        initializer = initializer.with_year(year);
    }

    let report = initializer.initialize(&mut doc).await?;
    let html = doc.to_html();

    let Some(output) = &settings.output else {
        println!("{}", html);
        return Ok(());
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, html)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    for (name, outcome) in [
        ("about", &report.about),
        ("skills", &report.skills),
        ("projects", &report.projects),
    ] {
        println!("  {} {}", marker(outcome), describe(name, outcome));
    }
    println!(
        "{} Rendered {} to {}",
        style("✓").green(),
        settings.template.display(),
        output.display()
    );

    Ok(())
}

fn marker(outcome: &SectionOutcome) -> console::StyledObject<&'static str> {
    match outcome {
        SectionOutcome::Rendered(_) => style("✓").green(),
        SectionOutcome::Unavailable(_) | SectionOutcome::NoContainer => style("!").yellow(),
        SectionOutcome::Invalid(_) => style("✗").red(),
    }
}

fn describe(name: &str, outcome: &SectionOutcome) -> String {
    match outcome {
        SectionOutcome::Rendered(count) => format!("{}: {} bound", name, count),
        SectionOutcome::Unavailable(status) => format!("{}: unavailable (status {})", name, status),
        SectionOutcome::Invalid(reason) => format!("{}: skipped ({})", name, reason),
        SectionOutcome::NoContainer => format!("{}: no container on page", name),
    }
}
