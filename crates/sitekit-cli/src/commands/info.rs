//! Info command - show the project's variable set and derived values

use std::path::Path;

use console::style;
use sitekit_engine::variables;

use crate::error::Result;

pub fn run(path: &Path, json: bool) -> Result<()> {
    let (project, labels) = super::load_project(path)?;
    let config = &project.config;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(config)
                .map_err(|e| crate::error::CliError::other(e.to_string()))?
        );
        return Ok(());
    }

    println!("{}", style("PROJECT").bold().underlined());
    println!("  Name:        {}", style(&config.project_name).cyan());
    println!("  Namespace:   {}", style(&config.namespace).yellow());
    println!("  Domain:      {}", config.domain);
    println!("  URL:         {}", config.site_url());
    println!("  Image:       {}", config.image());
    println!("  Replicas:    {}", config.replicas);
    println!("  Storage:     {} ({})", config.storage_size, config.storage_class);
    println!("  Ingress:     {} / {}", config.ingress_class, config.cert_issuer);
    println!("  Selector:    {}", labels.selector());

    println!("\n{}", style("VARIABLES").bold().underlined());
    for (name, value) in variables(config) {
        println!("  {:<18} {}", name, value);
    }

    Ok(())
}
