//! Build command - produce the deployable content in dist/

use std::path::Path;
use std::process::Stdio;

use console::style;
use sitekit_core::Project;

use crate::error::{CliError, Result};

pub async fn run(path: &Path) -> Result<()> {
    let project = Project::load(path)?;

    if project.config.build_command.is_empty() {
        copy_content(&project)?;
    } else {
        run_build_command(&project).await?;
    }

    let count = walkdir::WalkDir::new(project.dist_dir())
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count();
    println!(
        "{} Built {} file(s) into {}",
        style("✓").green().bold(),
        count,
        project.dist_dir().display()
    );
    Ok(())
}

/// Default build: copy content/ verbatim into dist/
fn copy_content(project: &Project) -> Result<()> {
    let source = project.content_dir();
    let dest = project.dist_dir();
    if !source.is_dir() {
        return Err(CliError::project(format!(
            "content directory not found: {}",
            source.display()
        )));
    }

    if dest.is_dir() {
        std::fs::remove_dir_all(&dest)?;
    }
    std::fs::create_dir_all(&dest)?;

    for entry in walkdir::WalkDir::new(&source).min_depth(1) {
        let entry = entry.map_err(|e| CliError::other(e.to_string()))?;
        let rel = entry
            .path()
            .strip_prefix(&source)
            .map_err(|e| CliError::other(e.to_string()))?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Custom build: run the configured command from the project root
async fn run_build_command(project: &Project) -> Result<()> {
    let command = &project.config.build_command;
    println!("{} Running: {}", style("→").blue(), style(command).dim());

    let status = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(&project.root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    if !status.success() {
        return Err(CliError::other(format!(
            "build command exited with status {}",
            status.code().unwrap_or(-1)
        )));
    }
    Ok(())
}
