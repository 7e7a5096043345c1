//! Sync command - push built content into every running pod

use std::path::Path;

use console::style;
use sitekit_kube::{SiteClient, sync_content};

use crate::display::{print_sync_caveat, print_sync_report};
use crate::error::{CliError, Result};

pub async fn run(path: &Path) -> Result<()> {
    let (project, labels) = super::load_project(path)?;
    let dist = project.dist_dir();
    if !dist.is_dir() {
        return Err(CliError::project(format!(
            "no built content at {}; run `sitekit build` first",
            dist.display()
        )));
    }

    print_sync_caveat();

    let client = SiteClient::new().await?;
    println!(
        "{} Syncing {} to pods matching '{}'",
        style("→").blue().bold(),
        dist.display(),
        labels.selector()
    );

    let report = sync_content(&client, &project.config.namespace, &labels, &dist).await?;
    print_sync_report(&report);

    if report.is_complete() {
        Ok(())
    } else {
        Err(CliError::cluster(format!(
            "content sync failed on {} of {} pod(s)",
            report.failed().len(),
            report.outcomes.len()
        )))
    }
}
