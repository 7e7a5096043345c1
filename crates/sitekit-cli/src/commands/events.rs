//! Events command - recent cluster events in the site namespace

use std::path::Path;

use console::style;
use sitekit_kube::SiteClient;

use crate::error::Result;

pub async fn run(path: &Path) -> Result<()> {
    let (project, _labels) = super::load_project(path)?;
    let client = SiteClient::new().await?;
    let events = client.events(&project.config.namespace).await?;

    if events.is_empty() {
        println!(
            "No events in namespace '{}'.",
            project.config.namespace
        );
        return Ok(());
    }

    for event in &events {
        let when = event
            .last_timestamp
            .as_ref()
            .map(|t| t.0.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        let kind = event.type_.as_deref().unwrap_or("Normal");
        let kind_style = match kind {
            "Warning" => style(kind).yellow(),
            _ => style(kind).dim(),
        };
        let object = event
            .involved_object
            .name
            .as_deref()
            .unwrap_or("-");
        let reason = event.reason.as_deref().unwrap_or("-");
        let message = event.message.as_deref().unwrap_or("");
        println!("{}  {:<8} {:<24} {:<20} {}", when, kind_style, object, reason, message);
    }

    Ok(())
}
