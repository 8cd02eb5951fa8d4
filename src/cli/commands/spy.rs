//! Spy command: replay scroll offsets through the navigation driver.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use console::style;
use tokio::sync::Mutex;

use crate::config::Settings;
use crate::dom::Document;
use crate::nav::{self, Layout, Navigation, ScrollSpy, LINKS_SELECTOR, OPEN_CLASS};

/// Wire navigation on the template and feed it the given scroll offsets.
pub async fn cmd_spy(
    settings: &Settings,
    layout_path: &Path,
    offsets: &[f64],
    toggle: bool,
    burst: bool,
) -> anyhow::Result<()> {
    let template = tokio::fs::read_to_string(&settings.template)
        .await
        .with_context(|| format!("Failed to read template {}", settings.template.display()))?;
    let layout = Layout::load(layout_path).await?;

    let doc = Document::parse(&template);
    let navigation = Navigation::wire(&doc, ScrollSpy::new(settings.nav_offset))?;

    let unmeasured: Vec<&str> = navigation
        .sections()
        .iter()
        .filter(|id| layout.get(id).is_none())
        .map(String::as_str)
        .collect();
    if !unmeasured.is_empty() {
        println!(
            "{} Sections without geometry: {}",
            style("!").yellow(),
            unmeasured.join(", ")
        );
    }

    let frame = settings.frame_interval();
    let document = Arc::new(Mutex::new(doc));
    let (handle, task) = nav::spawn(navigation.clone(), document.clone(), layout, frame);

    if toggle && !handle.click_toggle() {
        anyhow::bail!("Navigation driver stopped unexpectedly");
    }

    for &scroll_y in offsets {
        if !handle.scroll(scroll_y) {
            anyhow::bail!("Navigation driver stopped unexpectedly");
        }
        if burst {
            continue;
        }
        // Give the driver a full frame to evaluate this offset on its own.
        tokio::time::sleep(frame * 2).await;
        let doc = document.lock().await;
        println!(
            "  {} y={:<8} {}",
            style("→").cyan(),
            scroll_y,
            format_links(&navigation.active_links(&doc))
        );
    }

    drop(handle);
    let stats = task.await?;

    let doc = document.lock().await;
    if toggle {
        let open = match doc.query_selector(LINKS_SELECTOR)? {
            Some(links) => doc.has_class(links, OPEN_CLASS),
            None => false,
        };
        println!(
            "{} Menu {}",
            style("✓").green(),
            if open { "open" } else { "closed" }
        );
    }

    match &stats.last_active {
        Some(id) => println!("{} Active section: {}", style("✓").green(), style(id).bold()),
        None => println!("{} No section in view", style("!").yellow()),
    }
    println!("  Active links: {}", format_links(&navigation.active_links(&doc)));
    println!(
        "  {} scroll events, {} recomputations, {} toggles",
        stats.scroll_events, stats.recomputes, stats.toggles
    );

    Ok(())
}

fn format_links(links: &[String]) -> String {
    if links.is_empty() {
        "(none)".to_string()
    } else {
        links.join(", ")
    }
}
