//! Destroy command - delete the project's resources in reverse order

use std::io::Write;
use std::path::Path;

use console::style;
use sitekit_kube::{Applier, SiteClient, Topology};

use crate::display::print_delete_report;
use crate::error::{CliError, Result};

pub async fn run(path: &Path, yes: bool, dry_run: bool) -> Result<()> {
    let (project, _labels) = super::load_project(path)?;
    let topology = Topology::from_project(&project)?;

    if !yes && !dry_run {
        print!(
            "This deletes {} resource(s) in namespace '{}', including the content volume. Continue? [y/N] ",
            topology.len(),
            project.config.namespace
        );
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!(
        "{} Destroying {}{}",
        style("→").blue().bold(),
        style(&project.config.project_name).cyan(),
        if dry_run { " (dry run)" } else { "" }
    );

    let client = SiteClient::new().await?;
    let applier = Applier::new(client.kube_client().clone()).await?;
    let report = applier
        .destroy(&topology, &project.config.namespace, dry_run)
        .await?;

    print_delete_report(&report);

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::cluster("some resources could not be deleted"))
    }
}
