//! CLI commands

use std::path::Path;

use sitekit_core::{Project, SelectorLabels};

use crate::error::Result;

pub mod backup;
pub mod build;
pub mod deploy;
pub mod destroy;
pub mod dev;
pub mod events;
pub mod info;
pub mod init;
pub mod logs;
pub mod open;
pub mod port_forward;
pub mod render;
pub mod shell;
pub mod status;
pub mod sync;
pub mod validate;

/// Load a project and its selector identity from a directory
pub(crate) fn load_project(path: &Path) -> Result<(Project, SelectorLabels)> {
    let project = Project::load(path)?;
    let labels = SelectorLabels::for_site(&project.config);
    Ok((project, labels))
}
