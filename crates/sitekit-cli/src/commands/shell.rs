//! Shell command - interactive shell in a serving pod

use std::path::Path;

use console::style;
use sitekit_kube::{Dispatcher, KubeError, SiteClient};

use crate::error::Result;

pub async fn run(path: &Path, pod: Option<&str>) -> Result<()> {
    let (project, labels) = super::load_project(path)?;
    let dispatcher = Dispatcher::detect();

    let target = match pod {
        Some(name) => name.to_string(),
        None => {
            let client = SiteClient::new().await?;
            let pods = client
                .running_pods(&project.config.namespace, &labels)
                .await?;
            let Some(first) = pods.first() else {
                return Err(KubeError::NoMatchingPods {
                    selector: labels.selector(),
                    namespace: project.config.namespace.clone(),
                }
                .into());
            };
            first.metadata.name.clone().unwrap_or_default()
        }
    };

    println!(
        "{} Opening shell in {}",
        style("→").blue(),
        style(&target).cyan()
    );
    dispatcher
        .shell(&project.config.namespace, &target)
        .await?;
    Ok(())
}
