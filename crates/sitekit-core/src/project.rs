//! A resolved project directory on disk
//!
//! `Project::load` is the entry point every operational command goes
//! through: it locates `sitekit.yaml`, parses the config, and knows where
//! the manifests, content, and credentials live.

use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE, SiteConfig};
use crate::error::{CoreError, Result};

/// The six manifest files, in topology order
pub const MANIFEST_FILES: [&str; 6] = [
    "01-namespace.yaml",
    "02-pvc.yaml",
    "03-configmap.yaml",
    "04-deployment.yaml",
    "05-service.yaml",
    "06-ingress.yaml",
];

/// Directory holding the ordered manifests
pub const MANIFESTS_DIR: &str = "manifests";

/// Source content directory
pub const CONTENT_DIR: &str = "content";

/// Build output directory
pub const DIST_DIR: &str = "dist";

/// Generated credential file (excluded from version control)
pub const CREDENTIALS_FILE: &str = "credentials.yaml";

/// A loaded project with its parsed configuration
#[derive(Debug, Clone)]
pub struct Project {
    /// Project root directory
    pub root: PathBuf,
    /// Parsed sitekit.yaml
    pub config: SiteConfig,
}

impl Project {
    /// Load a project from a directory containing `sitekit.yaml`
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Err(CoreError::ProjectNotFound {
                path: root.display().to_string(),
            });
        }

        let config = SiteConfig::from_file(&config_path).map_err(|e| match e {
            CoreError::YamlParse(inner) => CoreError::InvalidConfig {
                message: inner.to_string(),
            },
            other => other,
        })?;

        Ok(Self { root, config })
    }

    /// Path to the manifests directory
    pub fn manifests_dir(&self) -> PathBuf {
        self.root.join(MANIFESTS_DIR)
    }

    /// Path to the source content directory
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(CONTENT_DIR)
    }

    /// Path to the build output directory
    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(DIST_DIR)
    }

    /// Path to the generated credential file
    pub fn credentials_path(&self) -> PathBuf {
        self.root.join(CREDENTIALS_FILE)
    }

    /// The six manifest paths in topology order.
    ///
    /// Fails if any expected file is missing, naming the first absent one.
    pub fn manifest_paths(&self) -> Result<Vec<PathBuf>> {
        let dir = self.manifests_dir();
        let mut paths = Vec::with_capacity(MANIFEST_FILES.len());
        for file in MANIFEST_FILES {
            let path = dir.join(file);
            if !path.exists() {
                return Err(CoreError::MissingManifest {
                    file: file.to_string(),
                });
            }
            paths.push(path);
        }
        Ok(paths)
    }

    /// Read and concatenate all manifests into one multi-document string
    pub fn combined_manifest(&self) -> Result<String> {
        let mut docs = Vec::with_capacity(MANIFEST_FILES.len());
        for path in self.manifest_paths()? {
            docs.push(std::fs::read_to_string(&path)?);
        }
        Ok(docs.join("\n---\n"))
    }
}
