//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod init;
mod render;
mod spy;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions, Settings};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Single-page portfolio renderer")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page with its data bound and write the HTML
    Render {
        /// Data directory or base URL holding data/*.json
        #[arg(short, long)]
        data: Option<String>,
        /// Host HTML template
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Footer year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Abort if any document fails to load
        #[arg(long)]
        strict: bool,
    },

    /// Load and validate the data documents
    Check {
        /// Data directory or base URL holding data/*.json
        #[arg(short, long)]
        data: Option<String>,
        /// Stop at the first document that fails to load
        #[arg(long)]
        strict: bool,
    },

    /// Replay scroll offsets through the navigation scroll spy
    Spy {
        /// Scroll offsets in pixels, replayed in order
        #[arg(short, long, required = true, num_args = 1.., allow_negative_numbers = true)]
        scroll: Vec<f64>,
        /// Section geometry file (TOML, YAML or JSON)
        #[arg(short, long)]
        layout: PathBuf,
        /// Host HTML template
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Click the menu toggle before scrolling
        #[arg(long)]
        toggle: bool,
        /// Send every offset at once instead of one per frame
        #[arg(long)]
        burst: bool,
    },

    /// Create a starter page, data files and layout
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Apply per-command overrides on top of the loaded settings.
fn override_settings(
    mut settings: Settings,
    data: Option<String>,
    template: Option<PathBuf>,
    strict: bool,
) -> Settings {
    if let Some(data) = data {
        settings.data = data;
    }
    if let Some(template) = template {
        settings.template = template;
    }
    if strict {
        settings.strict = true;
    }
    settings
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
    };
    let (settings, _config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Render {
            data,
            template,
            output,
            year,
            strict,
        } => {
            let mut settings = override_settings(settings, data, template, strict);
            if output.is_some() {
                settings.output = output;
            }
            render::cmd_render(&settings, year).await
        }
        Commands::Check { data, strict } => {
            let settings = override_settings(settings, data, None, strict);
            check::cmd_check(&settings).await
        }
        Commands::Spy {
            scroll,
            layout,
            template,
            toggle,
            burst,
        } => {
            let settings = override_settings(settings, None, template, false);
            spy::cmd_spy(&settings, &layout, &scroll, toggle, burst).await
        }
        Commands::Init { dir } => init::cmd_init(&dir).await,
    }
}
