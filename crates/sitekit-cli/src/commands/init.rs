//! Init command - scaffold a new site project

use std::path::Path;

use console::style;
use sitekit_core::SiteConfig;
use sitekit_engine::scaffold;

use crate::error::{CliError, Result};

pub fn run(
    name: &str,
    domain: &str,
    namespace: Option<&str>,
    replicas: Option<u32>,
    output: &Path,
) -> Result<()> {
    let mut config = SiteConfig::new(name, namespace.unwrap_or(name), domain);
    if let Some(replicas) = replicas {
        config.replicas = replicas;
    }

    let report = scaffold(&config, output).map_err(|e| match e {
        sitekit_engine::EngineError::Core(sitekit_core::CoreError::Validation { violations }) => {
            CliError::validation_with_help(
                sitekit_core::CoreError::Validation { violations }.to_string(),
                "fix every listed field; nothing was written",
            )
        }
        other => CliError::from(other),
    })?;

    println!(
        "{} Created project {} in {}",
        style("✓").green().bold(),
        style(name).cyan(),
        style(report.root.display()).yellow()
    );
    for file in &report.files {
        println!("  {}", file.display());
    }
    println!(
        "\n{} Generated credentials for {} are in credentials.yaml (git-ignored).",
        style("→").blue(),
        style(&report.credentials.admin_user).cyan()
    );
    println!("  Next: cd {} && sitekit deploy", name);

    Ok(())
}
