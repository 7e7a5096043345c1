//! Logs command - fetch or follow pod logs by selector

use std::path::Path;

use console::style;
use sitekit_kube::SiteClient;

use crate::error::Result;

pub async fn run(path: &Path, follow: bool, tail: Option<i64>) -> Result<()> {
    let (project, labels) = super::load_project(path)?;
    let client = SiteClient::new().await?;

    if follow {
        client
            .follow_logs(&project.config.namespace, &labels, tail, |pod, line| {
                println!("{} {}", style(format!("[{}]", pod)).dim(), line);
            })
            .await?;
        return Ok(());
    }

    for (pod, body) in client.logs(&project.config.namespace, &labels, tail).await? {
        println!("{}", style(format!("=== {} ===", pod)).bold());
        print!("{}", body);
        if !body.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
