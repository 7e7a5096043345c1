//! Project scaffolding
//!
//! Turns a validated `SiteConfig` into a new project directory. The
//! operation is all-or-nothing: the variable set is validated and every
//! template resolved in memory before the first file is written, so a
//! failing resolution never leaves a half-written project behind.

use std::fs;
use std::path::{Path, PathBuf};

use sitekit_core::config::CONFIG_FILE;
use sitekit_core::project::CREDENTIALS_FILE;
use sitekit_core::SiteConfig;

use crate::credentials::Credentials;
use crate::error::{EngineError, Result};
use crate::resolver::{resolve, variables};
use crate::templates::TEMPLATES;

/// Result of a successful scaffold
#[derive(Debug)]
pub struct ScaffoldReport {
    /// Root of the new project
    pub root: PathBuf,
    /// Every written file, relative to the root
    pub files: Vec<PathBuf>,
    /// The generated credentials (already written to disk)
    pub credentials: Credentials,
}

/// Check whether a gitignore body excludes the given relative path.
///
/// The credential file must always be covered; this is asserted after every
/// scaffold and exercised directly by tests.
pub fn ignore_covers(gitignore: &str, rel_path: &str) -> bool {
    gitignore
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .any(|line| {
            let pattern = line.trim_start_matches('/').trim_end_matches('/');
            glob::Pattern::new(pattern)
                .map(|p| p.matches(rel_path))
                .unwrap_or(false)
                || rel_path == pattern
                || rel_path.starts_with(&format!("{}/", pattern))
        })
}

/// Scaffold a new project under `parent`, in a directory named after the
/// project.
pub fn scaffold(config: &SiteConfig, parent: &Path) -> Result<ScaffoldReport> {
    // Validation first, enumerating every violation before any write
    config.validated()?;

    let root = parent.join(&config.project_name);
    if root.exists() {
        return Err(EngineError::TargetExists {
            path: root.display().to_string(),
        });
    }

    // Resolve everything in memory; any undefined placeholder aborts the
    // whole scaffold with nothing written
    let vars = variables(config);
    let mut resolved: Vec<(&'static str, String)> = Vec::with_capacity(TEMPLATES.len());
    for template in TEMPLATES {
        let body = resolve(template.rel_path, template.body, &vars)?;
        resolved.push((template.rel_path, body));
    }

    let config_yaml = config.to_yaml().map_err(EngineError::Core)?;
    let credentials = Credentials::generate();
    let credentials_yaml = credentials.to_yaml()?;

    // The gitignore must exclude the credential file before anything lands
    let gitignore = resolved
        .iter()
        .find(|(path, _)| *path == ".gitignore")
        .map(|(_, body)| body.clone())
        .unwrap_or_default();
    if !ignore_covers(&gitignore, CREDENTIALS_FILE) {
        return Err(EngineError::CredentialsExposed {
            file: CREDENTIALS_FILE.to_string(),
        });
    }

    // Write phase
    fs::create_dir_all(&root)?;
    let mut files = Vec::with_capacity(resolved.len() + 2);

    for (rel_path, body) in &resolved {
        let path = root.join(rel_path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, body)?;
        files.push(PathBuf::from(rel_path));
    }

    fs::write(root.join(CONFIG_FILE), config_yaml)?;
    files.push(PathBuf::from(CONFIG_FILE));

    let credentials_path = root.join(CREDENTIALS_FILE);
    fs::write(&credentials_path, credentials_yaml)?;
    restrict_permissions(&credentials_path)?;
    files.push(PathBuf::from(CREDENTIALS_FILE));

    Ok(ScaffoldReport {
        root,
        files,
        credentials,
    })
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
