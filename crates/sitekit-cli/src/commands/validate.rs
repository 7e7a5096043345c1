//! Validate command - check variables, manifests, and topology offline

use std::path::Path;

use sitekit_core::{CONFIG_FILE, Project};
use sitekit_engine::placeholders;
use sitekit_kube::Topology;

use crate::display::ValidationReport;
use crate::error::{CliError, Result};

pub fn run(path: &Path, json: bool) -> Result<()> {
    let project = Project::load(path)?;
    let mut report = ValidationReport::new();

    // Variable set: every violation, not just the first
    for violation in project.config.validate() {
        report.add_error(CONFIG_FILE, &violation.to_string());
    }
    report.checked_count += 1;

    // Residual tokens mean a manifest was never fully resolved
    for manifest_path in project.manifest_paths()? {
        let body = std::fs::read_to_string(&manifest_path)?;
        let file = manifest_path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| manifest_path.display().to_string());
        let leftover = placeholders(&body);
        if !leftover.is_empty() {
            report.add_error(
                &file,
                &format!("unresolved placeholder(s): {}", leftover.join(", ")),
            );
        }
        report.checked_count += 1;
    }

    // Topology: ordering, references, label identity
    match Topology::from_project(&project) {
        Ok(topology) => {
            for issue in topology.verify() {
                report.add_error(&issue.resource, &issue.message);
            }
            report.checked_count += 1;
        }
        Err(e) => report.add_error("manifests", &e.to_string()),
    }

    if json {
        report
            .print_json()
            .map_err(|e| CliError::other(e.to_string()))?;
    } else {
        report.print();
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{} error(s) found",
            report.error_count()
        )))
    }
}
