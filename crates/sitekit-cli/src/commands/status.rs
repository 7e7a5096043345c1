//! Status command - aggregate resource state for one site

use std::path::Path;

use console::style;
use sitekit_kube::SiteClient;

use crate::error::{CliError, Result};

pub async fn run(path: &Path, json: bool) -> Result<()> {
    let (project, labels) = super::load_project(path)?;
    let client = SiteClient::new().await?;
    let status = client
        .status(
            &project.config.namespace,
            &project.config.project_name,
            &labels,
        )
        .await?;

    if json {
        let payload =
            serde_json::to_string_pretty(&status).map_err(|e| CliError::other(e.to_string()))?;
        println!("{}", payload);
        return Ok(());
    }

    println!("{}", style("SITE").bold().underlined());
    println!("  Name:       {}", style(&project.config.project_name).cyan());
    println!("  Namespace:  {}", style(&status.namespace).yellow());
    println!("  URL:        {}", project.config.site_url());

    println!("\n{}", style("WORKLOAD").bold().underlined());
    match &status.deployment {
        Some(workload) => {
            let readiness = format!("{}/{}", workload.ready, workload.desired);
            let readiness = if workload.is_ready() {
                style(readiness).green()
            } else {
                style(readiness).yellow()
            };
            println!("  Replicas:   {} ready", readiness);
            println!("  Updated:    {}", workload.updated);
            println!("  Available:  {}", workload.available);
        }
        None => println!("  {}", style("deployment not found").dim()),
    }

    println!("\n{}", style("STORAGE").bold().underlined());
    match &status.claim_phase {
        Some(phase) => {
            let phase_style = if phase == "Bound" {
                style(phase.clone()).green()
            } else {
                style(phase.clone()).yellow()
            };
            println!("  Claim:      {}", phase_style);
        }
        None => println!("  {}", style("claim not found").dim()),
    }

    println!("\n{}", style("NETWORK").bold().underlined());
    println!(
        "  Service:    {}",
        if status.service_present {
            style("present").green()
        } else {
            style("missing").red()
        }
    );
    if status.ingress_hosts.is_empty() {
        println!("  Ingress:    {}", style("missing").red());
    } else {
        println!("  Ingress:    {}", status.ingress_hosts.join(", "));
    }

    println!("\n{}", style("PODS").bold().underlined());
    if status.pods.is_empty() {
        println!("  {}", style("no pods match the selector").dim());
    }
    for pod in &status.pods {
        let icon = if pod.ready {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("  {} {} ({})", icon, pod.name, pod.phase);
    }

    Ok(())
}
