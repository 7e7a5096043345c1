//! Site configuration - the variable set behind every generated project
//!
//! `SiteConfig` is both the input to scaffolding (the variable set the
//! templates are resolved against) and the generated `sitekit.yaml` project
//! manifest that operational commands load back. Every optional field has a
//! documented default so a minimal config only needs the three required
//! variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, Violation};
use crate::naming;

/// Name of the project manifest file inside a resolved project
pub const CONFIG_FILE: &str = "sitekit.yaml";

/// The full variable set for one static-site project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Project name, used as the resource name prefix and default instance
    pub project_name: String,

    /// Target namespace (created by the first manifest)
    pub namespace: String,

    /// Public domain the ingress serves
    pub domain: String,

    /// Container image tag
    #[serde(default = "default_image_tag")]
    pub image_tag: String,

    /// Number of serving replicas (inclusive range 1-10)
    #[serde(default = "default_replicas")]
    pub replicas: u32,

    /// Storage class for the content volume claim
    #[serde(default = "default_storage_class")]
    pub storage_class: String,

    /// Requested size of the content volume
    #[serde(default = "default_storage_size")]
    pub storage_size: String,

    /// Ingress class name
    #[serde(default = "default_ingress_class")]
    pub ingress_class: String,

    /// cert-manager cluster issuer for TLS
    #[serde(default = "default_cert_issuer")]
    pub cert_issuer: String,

    /// Build-stage runtime version used by the Dockerfile
    #[serde(default = "default_runtime_version")]
    pub runtime_version: String,

    /// Registry prefix for the image, empty for a local image
    #[serde(default)]
    pub registry_url: String,

    /// Custom build command run by `sitekit build`, empty for the default copy
    #[serde(default)]
    pub build_command: String,

    /// Memory limit for the serving container
    #[serde(default = "default_memory_limit")]
    pub memory_limit: String,

    /// CPU limit for the serving container
    #[serde(default = "default_cpu_limit")]
    pub cpu_limit: String,
}

fn default_image_tag() -> String {
    "latest".to_string()
}

fn default_replicas() -> u32 {
    2
}

fn default_storage_class() -> String {
    "standard".to_string()
}

fn default_storage_size() -> String {
    "1Gi".to_string()
}

fn default_ingress_class() -> String {
    "nginx".to_string()
}

fn default_cert_issuer() -> String {
    "letsencrypt-prod".to_string()
}

fn default_runtime_version() -> String {
    "3.13".to_string()
}

fn default_memory_limit() -> String {
    "128Mi".to_string()
}

fn default_cpu_limit() -> String {
    "100m".to_string()
}

impl SiteConfig {
    /// Create a config with the three required variables and all defaults
    pub fn new(
        project_name: impl Into<String>,
        namespace: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            namespace: namespace.into(),
            domain: domain.into(),
            image_tag: default_image_tag(),
            replicas: default_replicas(),
            storage_class: default_storage_class(),
            storage_size: default_storage_size(),
            ingress_class: default_ingress_class(),
            cert_issuer: default_cert_issuer(),
            runtime_version: default_runtime_version(),
            registry_url: String::new(),
            build_command: String::new(),
            memory_limit: default_memory_limit(),
            cpu_limit: default_cpu_limit(),
        }
    }

    /// Load a config from a `sitekit.yaml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a config from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SiteConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize to YAML for writing `sitekit.yaml`
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Collect every validation violation. An empty vector means valid.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        naming::check_identifier("project_name", &self.project_name, &mut violations);
        naming::check_identifier("namespace", &self.namespace, &mut violations);
        naming::check_domain("domain", &self.domain, &mut violations);
        naming::check_replicas("replicas", self.replicas, &mut violations);
        violations
    }

    /// Validate and convert violations into a single error
    pub fn validated(&self) -> Result<()> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation { violations })
        }
    }

    /// Full image reference, with or without a registry prefix
    pub fn image(&self) -> String {
        if self.registry_url.is_empty() {
            format!("{}:{}", self.project_name, self.image_tag)
        } else {
            format!(
                "{}/{}:{}",
                self.registry_url.trim_end_matches('/'),
                self.project_name,
                self.image_tag
            )
        }
    }

    /// Public URL served by the ingress
    pub fn site_url(&self) -> String {
        format!("https://{}", self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_yaml() -> &'static str {
        "project_name: my-blog\nnamespace: my-blog\ndomain: blog.example.com\n"
    }

    #[test]
    fn test_defaults_applied() {
        let config = SiteConfig::from_yaml(minimal_yaml()).unwrap();
        assert_eq!(config.image_tag, "latest");
        assert_eq!(config.replicas, 2);
        assert_eq!(config.storage_class, "standard");
        assert_eq!(config.storage_size, "1Gi");
        assert_eq!(config.ingress_class, "nginx");
        assert_eq!(config.cert_issuer, "letsencrypt-prod");
        assert_eq!(config.runtime_version, "3.13");
        assert_eq!(config.registry_url, "");
        assert_eq!(config.build_command, "");
        assert_eq!(config.memory_limit, "128Mi");
        assert_eq!(config.cpu_limit, "100m");
    }

    #[test]
    fn test_roundtrip() {
        let config = SiteConfig::new("my-blog", "my-blog", "blog.example.com");
        let yaml = config.to_yaml().unwrap();
        let parsed = SiteConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_valid_config() {
        let config = SiteConfig::new("my-blog", "my-blog", "blog.example.com");
        assert!(config.validate().is_empty());
        assert!(config.validated().is_ok());
    }

    #[test]
    fn test_all_violations_collected() {
        let mut config = SiteConfig::new("My_Blog", "-bad-", "not a domain");
        config.replicas = 11;
        let violations = config.validate();

        // One per broken field, reported together
        assert_eq!(violations.len(), 4);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["project_name", "namespace", "domain", "replicas"]
        );
    }

    #[test]
    fn test_replicas_out_of_range_fails() {
        let mut config = SiteConfig::new("my-blog", "my-blog", "blog.example.com");
        config.replicas = 11;
        let err = config.validated().unwrap_err();
        assert!(err.to_string().contains("between 1 and 10"));
    }

    #[test]
    fn test_image_with_and_without_registry() {
        let mut config = SiteConfig::new("my-blog", "my-blog", "blog.example.com");
        assert_eq!(config.image(), "my-blog:latest");

        config.registry_url = "registry.example.com/".to_string();
        config.image_tag = "v2".to_string();
        assert_eq!(config.image(), "registry.example.com/my-blog:v2");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = format!("{}bogus_field: true\n", minimal_yaml());
        assert!(SiteConfig::from_yaml(&yaml).is_err());
    }
}
