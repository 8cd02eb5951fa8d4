//! folio - single-page portfolio renderer.
//!
//! Loads `about`, `skills` and `projects` JSON documents, binds them into a
//! host HTML page and wires the page's navigation (menu toggle and scroll spy).

pub mod cli;
pub mod config;
pub mod dom;
pub mod loader;
pub mod models;
pub mod nav;
pub mod page;
pub mod render;
pub mod utils;

pub use dom::Document;
pub use loader::{FailurePolicy, FsSource, HttpSource, LoadError, MemorySource, ResourceSource};
pub use page::{InitReport, PageInitializer, RenderError, SectionOutcome};
