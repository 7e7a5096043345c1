//! Deploy command - apply the six manifests in order

use std::path::Path;

use console::style;
use sitekit_kube::{Applier, SiteClient, Topology};

use crate::display::print_apply_report;
use crate::error::{CliError, Result};

pub async fn run(path: &Path, dry_run: bool) -> Result<()> {
    let (project, _labels) = super::load_project(path)?;
    project
        .config
        .validated()
        .map_err(|e| CliError::validation(e.to_string()))?;

    let topology = Topology::from_project(&project)?;
    let issues = topology.verify();
    if !issues.is_empty() {
        let listing: Vec<String> = issues.iter().map(|i| format!("  - {}", i)).collect();
        return Err(CliError::validation_with_help(
            format!(
                "topology has {} issue(s):\n{}",
                issues.len(),
                listing.join("\n")
            ),
            "fix the manifests before deploying; nothing was applied",
        ));
    }

    println!(
        "{} Deploying {} to namespace {}{}",
        style("→").blue().bold(),
        style(&project.config.project_name).cyan(),
        style(&project.config.namespace).yellow(),
        if dry_run { " (dry run)" } else { "" }
    );

    let client = SiteClient::new().await?;
    let applier = Applier::new(client.kube_client().clone()).await?;
    let report = applier
        .apply(&topology, &project.config.namespace, dry_run)
        .await?;

    print_apply_report(&report);

    if report.is_success() {
        println!(
            "\n{} Site will be served at {}",
            style("→").blue(),
            style(project.config.site_url()).cyan()
        );
        Ok(())
    } else {
        Err(CliError::cluster("deploy halted on a failed resource"))
    }
}
