//! Sitekit Core - Core types for the static-site deployment toolkit
//!
//! This crate provides the foundational types used throughout sitekit:
//! - `SiteConfig`: The variable set and project manifest (`sitekit.yaml`)
//! - `SelectorLabels`: The fixed label identity shared by every resource
//! - `Project`: A resolved project directory on disk
//! - Naming rules for project identifiers and domains

pub mod config;
pub mod error;
pub mod labels;
pub mod naming;
pub mod project;

pub use config::{SiteConfig, CONFIG_FILE};
pub use error::{CoreError, Violation};
pub use labels::{Component, SelectorLabels};
pub use project::{Project, CONTENT_DIR, DIST_DIR, MANIFESTS_DIR, MANIFEST_FILES};
