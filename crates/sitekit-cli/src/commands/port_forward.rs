//! Port-forward command - forward a local port to the site service

use std::path::Path;

use console::style;
use sitekit_kube::Dispatcher;

use crate::error::Result;

pub async fn run(path: &Path, local_port: u16) -> Result<()> {
    let (project, _labels) = super::load_project(path)?;
    let dispatcher = Dispatcher::detect();

    println!(
        "{} Forwarding http://localhost:{} to service {} (Ctrl-C to stop)",
        style("→").blue(),
        local_port,
        style(&project.config.project_name).cyan()
    );
    dispatcher
        .port_forward(
            &project.config.namespace,
            &project.config.project_name,
            local_port,
            80,
        )
        .await?;
    Ok(())
}
