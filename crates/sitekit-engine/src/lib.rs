//! Sitekit Engine - Template resolution and project scaffolding
//!
//! This crate owns the bundled template set and turns a validated
//! `SiteConfig` into a concrete project directory. Resolution is
//! all-or-nothing: every template is resolved in memory before a single
//! file is written.

pub mod credentials;
pub mod error;
pub mod resolver;
pub mod scaffold;
pub mod suggestions;
pub mod templates;

pub use credentials::{Charset, Credentials};
pub use error::{EngineError, Result};
pub use resolver::{placeholders, resolve, variables};
pub use scaffold::{ScaffoldReport, ignore_covers, scaffold};
pub use templates::{TemplateFile, TEMPLATES};
