//! Render command - re-resolve the manifest templates from sitekit.yaml

use std::path::Path;

use console::style;
use sitekit_core::{MANIFESTS_DIR, Project};
use sitekit_engine::{TEMPLATES, resolve, variables};

use crate::error::{CliError, Result};

pub fn run(path: &Path, output_dir: Option<&Path>, show_only: Option<&str>) -> Result<()> {
    let project = Project::load(path)?;
    project
        .config
        .validated()
        .map_err(|e| CliError::validation(e.to_string()))?;

    let vars = variables(&project.config);

    // Resolve everything before writing anything
    let mut rendered = Vec::new();
    for template in TEMPLATES {
        if !template.rel_path.starts_with(MANIFESTS_DIR) {
            continue;
        }
        let body = resolve(template.rel_path, template.body, &vars)?;
        rendered.push((template.rel_path, body));
    }

    if let Some(only) = show_only {
        rendered.retain(|(rel_path, _)| rel_path.ends_with(only));
        if rendered.is_empty() {
            return Err(CliError::project(format!(
                "no manifest template matches '{}'",
                only
            )));
        }
    }

    match output_dir {
        Some(dir) => {
            for (rel_path, body) in &rendered {
                let target = dir.join(rel_path);
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, body)?;
                println!("  {} {}", style("✓").green(), target.display());
            }
            println!(
                "{} Rendered {} manifest(s) to {}",
                style("✓").green().bold(),
                rendered.len(),
                dir.display()
            );
        }
        None => {
            for (rel_path, body) in &rendered {
                println!("---");
                println!("# Source: {}", rel_path);
                print!("{}", body);
                if !body.ends_with('\n') {
                    println!();
                }
            }
        }
    }

    Ok(())
}
