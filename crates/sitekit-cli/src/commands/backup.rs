//! Backup command - pull the served content into a local archive

use std::path::{Path, PathBuf};

use console::style;
use sitekit_kube::{SiteClient, backup_content};

use crate::error::Result;
use crate::util::format_size;

pub async fn run(path: &Path, output: Option<&Path>) -> Result<()> {
    let (project, labels) = super::load_project(path)?;

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => {
            let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
            PathBuf::from(format!(
                "{}-content-{}.tar.gz",
                project.config.project_name, stamp
            ))
        }
    };

    let client = SiteClient::new().await?;
    let report = backup_content(&client, &project.config.namespace, &labels, &output).await?;

    println!(
        "{} Backed up content from {} to {} ({})",
        style("✓").green().bold(),
        style(&report.pod).cyan(),
        report.archive.display(),
        format_size(report.bytes)
    );
    Ok(())
}
