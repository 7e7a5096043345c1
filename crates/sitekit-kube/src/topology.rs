//! The manifest topology
//!
//! A resolved project carries six manifests with numeric prefixes encoding
//! a strict apply order: namespace, storage claim, config, deployment,
//! service, ingress. The order expresses a dependency partial order - a
//! resource must not be applied before everything it references (by name
//! or selector) exists. `Topology::verify` checks the order, every
//! reference, and the label identity shared across the set.

use std::collections::BTreeMap;
use std::fmt;

use serde_yaml::Value;

use sitekit_core::Project;
use sitekit_core::labels::{LABEL_COMPONENT, LABEL_INSTANCE, LABEL_MANAGED_BY, LABEL_NAME};
use sitekit_core::Component;

use crate::error::{KubeError, Result};

/// The six resource kinds in their required apply order
pub const EXPECTED_KINDS: [&str; 6] = [
    "Namespace",
    "PersistentVolumeClaim",
    "ConfigMap",
    "Deployment",
    "Service",
    "Ingress",
];

/// A reference from one resource to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub kind: String,
    pub name: String,
}

impl ResourceRef {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// A parsed manifest with the metadata the topology checks need
#[derive(Debug, Clone)]
pub struct ManifestResource {
    /// The full YAML content
    pub yaml: String,
    /// Parsed YAML value
    pub value: Value,
    /// Resource kind
    pub kind: String,
    /// Resource name
    pub name: String,
    /// Resource namespace (if specified)
    pub namespace: Option<String>,
    /// metadata.labels
    pub labels: BTreeMap<String, String>,
}

impl ManifestResource {
    /// Parse a resource from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| KubeError::InvalidManifest(format!("failed to parse YAML: {}", e)))?;

        let kind = value
            .get("kind")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let metadata = value.get("metadata");
        let name = metadata
            .and_then(|m| m.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("")
            .to_string();

        let namespace = metadata
            .and_then(|m| m.get("namespace"))
            .and_then(|n| n.as_str())
            .map(String::from);

        let labels: BTreeMap<String, String> = metadata
            .and_then(|m| m.get("labels"))
            .and_then(|l| serde_yaml::from_value(l.clone()).ok())
            .unwrap_or_default();

        if kind.is_empty() || name.is_empty() {
            return Err(KubeError::InvalidManifest(
                "resource missing kind or metadata.name".to_string(),
            ));
        }

        Ok(Self {
            yaml: yaml.to_string(),
            value,
            kind,
            name,
            namespace,
            labels,
        })
    }

    /// Unique key for this resource
    pub fn key(&self) -> String {
        format!("{}/{}", self.kind, self.name)
    }

    pub fn as_ref(&self) -> ResourceRef {
        ResourceRef::new(&self.kind, &self.name)
    }

    /// Names of PVCs this resource mounts
    fn claim_refs(&self) -> Vec<ResourceRef> {
        self.volume_field("persistentVolumeClaim", "claimName")
            .into_iter()
            .map(|n| ResourceRef::new("PersistentVolumeClaim", n))
            .collect()
    }

    /// Names of ConfigMaps this resource mounts
    fn configmap_refs(&self) -> Vec<ResourceRef> {
        self.volume_field("configMap", "name")
            .into_iter()
            .map(|n| ResourceRef::new("ConfigMap", n))
            .collect()
    }

    /// Extract `<field>` from every `spec.template.spec.volumes[].<source>`
    fn volume_field(&self, source: &str, field: &str) -> Vec<String> {
        let volumes = self
            .value
            .get("spec")
            .and_then(|s| s.get("template"))
            .and_then(|t| t.get("spec"))
            .and_then(|s| s.get("volumes"))
            .and_then(|v| v.as_sequence());

        let Some(volumes) = volumes else {
            return Vec::new();
        };

        volumes
            .iter()
            .filter_map(|v| v.get(source))
            .filter_map(|s| s.get(field))
            .filter_map(|n| n.as_str())
            .map(String::from)
            .collect()
    }

    /// Service names referenced by ingress backends
    fn backend_service_refs(&self) -> Vec<ResourceRef> {
        let mut refs = Vec::new();
        let rules = self
            .value
            .get("spec")
            .and_then(|s| s.get("rules"))
            .and_then(|r| r.as_sequence());

        if let Some(rules) = rules {
            for rule in rules {
                let paths = rule
                    .get("http")
                    .and_then(|h| h.get("paths"))
                    .and_then(|p| p.as_sequence());
                if let Some(paths) = paths {
                    for path in paths {
                        if let Some(name) = path
                            .get("backend")
                            .and_then(|b| b.get("service"))
                            .and_then(|s| s.get("name"))
                            .and_then(|n| n.as_str())
                        {
                            refs.push(ResourceRef::new("Service", name));
                        }
                    }
                }
            }
        }
        refs
    }

    /// The service's spec.selector label map
    fn service_selector(&self) -> BTreeMap<String, String> {
        self.value
            .get("spec")
            .and_then(|s| s.get("selector"))
            .and_then(|sel| serde_yaml::from_value(sel.clone()).ok())
            .unwrap_or_default()
    }

    /// The deployment's pod template labels
    fn pod_labels(&self) -> BTreeMap<String, String> {
        self.value
            .get("spec")
            .and_then(|s| s.get("template"))
            .and_then(|t| t.get("metadata"))
            .and_then(|m| m.get("labels"))
            .and_then(|l| serde_yaml::from_value(l.clone()).ok())
            .unwrap_or_default()
    }
}

/// A verification finding, tied to the resource that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyIssue {
    pub resource: String,
    pub message: String,
}

impl TopologyIssue {
    fn new(resource: &ManifestResource, message: impl Into<String>) -> Self {
        Self {
            resource: resource.key(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TopologyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.resource, self.message)
    }
}

/// The ordered set of manifests for one project
#[derive(Debug, Clone)]
pub struct Topology {
    /// Resources in apply order
    pub resources: Vec<ManifestResource>,
}

impl Topology {
    /// Load the topology from a project's ordered manifest files
    pub fn from_project(project: &Project) -> Result<Self> {
        let mut resources = Vec::new();
        for path in project.manifest_paths()? {
            let yaml = std::fs::read_to_string(&path)?;
            resources.push(ManifestResource::from_yaml(&yaml).map_err(|e| {
                KubeError::InvalidManifest(format!("{}: {}", path.display(), e))
            })?);
        }
        Ok(Self { resources })
    }

    /// Parse a multi-document manifest string, preserving document order
    pub fn from_manifest(manifest: &str) -> Result<Self> {
        let mut resources = Vec::new();
        for doc in manifest.split("\n---") {
            let doc = doc.trim().trim_start_matches("---").trim();
            if doc.is_empty() {
                continue;
            }
            resources.push(ManifestResource::from_yaml(doc)?);
        }
        Ok(Self { resources })
    }

    /// Resources in reverse (deletion) order
    pub fn reversed(&self) -> Vec<&ManifestResource> {
        self.resources.iter().rev().collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Verify the topology, collecting every issue instead of stopping at
    /// the first.
    ///
    /// Checks, in order:
    /// - the six kinds appear in the required sequence
    /// - every resource's namespace matches the namespace resource
    /// - every reference (claim, config, backend service) points at an
    ///   earlier resource
    /// - the service selector matches the deployment's pod labels
    /// - name/instance/managed-by labels are identical everywhere and the
    ///   component label holds an allowed value
    pub fn verify(&self) -> Vec<TopologyIssue> {
        let mut issues = Vec::new();

        self.check_kind_order(&mut issues);
        self.check_namespace_refs(&mut issues);
        self.check_ordered_refs(&mut issues);
        self.check_service_selector(&mut issues);
        self.check_label_identity(&mut issues);

        issues
    }

    fn check_kind_order(&self, issues: &mut Vec<TopologyIssue>) {
        if self.resources.len() != EXPECTED_KINDS.len() {
            // Report against the first resource; no better anchor exists
            if let Some(first) = self.resources.first() {
                issues.push(TopologyIssue::new(
                    first,
                    format!(
                        "expected {} resources, found {}",
                        EXPECTED_KINDS.len(),
                        self.resources.len()
                    ),
                ));
            }
            return;
        }

        for (resource, expected) in self.resources.iter().zip(EXPECTED_KINDS) {
            if resource.kind != expected {
                issues.push(TopologyIssue::new(
                    resource,
                    format!("expected kind {} at this position", expected),
                ));
            }
        }
    }

    fn check_namespace_refs(&self, issues: &mut Vec<TopologyIssue>) {
        let Some(ns) = self.resources.iter().find(|r| r.kind == "Namespace") else {
            return;
        };

        for resource in &self.resources {
            if resource.kind == "Namespace" {
                continue;
            }
            match &resource.namespace {
                Some(namespace) if *namespace == ns.name => {}
                Some(namespace) => issues.push(TopologyIssue::new(
                    resource,
                    format!(
                        "namespace '{}' does not match the topology namespace '{}'",
                        namespace, ns.name
                    ),
                )),
                None => issues.push(TopologyIssue::new(resource, "missing metadata.namespace")),
            }
        }
    }

    /// Every claim/config/service reference must resolve to an earlier
    /// resource in apply order.
    fn check_ordered_refs(&self, issues: &mut Vec<TopologyIssue>) {
        let mut applied: Vec<ResourceRef> = Vec::new();

        for resource in &self.resources {
            let mut refs = Vec::new();
            refs.extend(resource.claim_refs());
            refs.extend(resource.configmap_refs());
            refs.extend(resource.backend_service_refs());

            for reference in refs {
                if !applied.contains(&reference) {
                    issues.push(TopologyIssue::new(
                        resource,
                        format!("references {} before it is applied", reference),
                    ));
                }
            }

            applied.push(resource.as_ref());
        }
    }

    fn check_service_selector(&self, issues: &mut Vec<TopologyIssue>) {
        let Some(service) = self.resources.iter().find(|r| r.kind == "Service") else {
            return;
        };
        let Some(deployment) = self.resources.iter().find(|r| r.kind == "Deployment") else {
            return;
        };

        let selector = service.service_selector();
        let pod_labels = deployment.pod_labels();

        if selector.is_empty() {
            issues.push(TopologyIssue::new(service, "missing spec.selector"));
            return;
        }

        for (key, value) in &selector {
            match pod_labels.get(key) {
                Some(actual) if actual == value => {}
                Some(actual) => issues.push(TopologyIssue::new(
                    service,
                    format!(
                        "selector {}={} does not match pod label {}={}",
                        key, value, key, actual
                    ),
                )),
                None => issues.push(TopologyIssue::new(
                    service,
                    format!("selector {}={} matches no pod label", key, value),
                )),
            }
        }
    }

    /// name/instance/managed-by must be identical across the whole set;
    /// component must be an allowed value. An inconsistency here makes
    /// selection-based operations silently match the wrong resources.
    fn check_label_identity(&self, issues: &mut Vec<TopologyIssue>) {
        let Some(first) = self.resources.first() else {
            return;
        };

        for key in [LABEL_NAME, LABEL_INSTANCE, LABEL_MANAGED_BY] {
            let expected = first.labels.get(key);
            for resource in &self.resources {
                let actual = resource.labels.get(key);
                if actual.is_none() {
                    issues.push(TopologyIssue::new(resource, format!("missing label {}", key)));
                } else if actual != expected {
                    issues.push(TopologyIssue::new(
                        resource,
                        format!(
                            "label {} is '{}' but the topology uses '{}'",
                            key,
                            actual.map(String::as_str).unwrap_or(""),
                            expected.map(String::as_str).unwrap_or("")
                        ),
                    ));
                }
            }
        }

        for resource in &self.resources {
            match resource.labels.get(LABEL_COMPONENT) {
                Some(value) if Component::parse(value).is_some() => {}
                Some(value) => issues.push(TopologyIssue::new(
                    resource,
                    format!(
                        "label {} has unknown component '{}' (expected app, database, storage, or config)",
                        LABEL_COMPONENT, value
                    ),
                )),
                None => issues.push(TopologyIssue::new(
                    resource,
                    format!("missing label {}", LABEL_COMPONENT),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(component: &str) -> String {
        format!(
            "  labels:\n    app.kubernetes.io/name: my-blog\n    app.kubernetes.io/instance: my-blog\n    app.kubernetes.io/component: {}\n    app.kubernetes.io/managed-by: sitekit\n",
            component
        )
    }

    fn sample_topology() -> String {
        format!(
            r#"apiVersion: v1
kind: Namespace
metadata:
  name: my-blog
{ns_labels}---
apiVersion: v1
kind: PersistentVolumeClaim
metadata:
  name: my-blog-content
  namespace: my-blog
{storage_labels}spec:
  storageClassName: standard
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: my-blog-nginx
  namespace: my-blog
{config_labels}data:
  default.conf: "server {{}}"
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: my-blog
  namespace: my-blog
{app_labels}spec:
  replicas: 2
  template:
    metadata:
      labels:
        app.kubernetes.io/name: my-blog
        app.kubernetes.io/instance: my-blog
    spec:
      volumes:
        - name: content
          persistentVolumeClaim:
            claimName: my-blog-content
        - name: nginx-conf
          configMap:
            name: my-blog-nginx
---
apiVersion: v1
kind: Service
metadata:
  name: my-blog
  namespace: my-blog
{svc_labels}spec:
  selector:
    app.kubernetes.io/name: my-blog
    app.kubernetes.io/instance: my-blog
---
apiVersion: networking.k8s.io/v1
kind: Ingress
metadata:
  name: my-blog
  namespace: my-blog
{ing_labels}spec:
  rules:
    - host: blog.example.com
      http:
        paths:
          - backend:
              service:
                name: my-blog
"#,
            ns_labels = labels("app"),
            storage_labels = labels("storage"),
            config_labels = labels("config"),
            app_labels = labels("app"),
            svc_labels = labels("app"),
            ing_labels = labels("app"),
        )
    }

    #[test]
    fn test_parse_resource() {
        let yaml = "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\n  namespace: prod\n";
        let resource = ManifestResource::from_yaml(yaml).unwrap();
        assert_eq!(resource.kind, "Service");
        assert_eq!(resource.name, "web");
        assert_eq!(resource.namespace, Some("prod".to_string()));
    }

    #[test]
    fn test_parse_rejects_anonymous_resource() {
        assert!(ManifestResource::from_yaml("apiVersion: v1\nkind: Service\n").is_err());
    }

    #[test]
    fn test_valid_topology_has_no_issues() {
        let topology = Topology::from_manifest(&sample_topology()).unwrap();
        assert_eq!(topology.len(), 6);
        let issues = topology.verify();
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_out_of_order_kinds_flagged() {
        // Swap deployment before configmap
        let manifest = sample_topology()
            .replace("kind: ConfigMap", "kind: MARK1")
            .replace("kind: Deployment", "kind: ConfigMap")
            .replace("kind: MARK1", "kind: Deployment");

        let topology = Topology::from_manifest(&manifest).unwrap();
        let issues = topology.verify();
        assert!(issues.iter().any(|i| i.message.contains("expected kind")));
    }

    #[test]
    fn test_forward_reference_flagged() {
        // Deployment mounts a claim that is never defined
        let manifest = sample_topology().replace(
            "claimName: my-blog-content",
            "claimName: my-blog-missing",
        );

        let topology = Topology::from_manifest(&manifest).unwrap();
        let issues = topology.verify();
        assert!(
            issues
                .iter()
                .any(|i| i.message.contains("PersistentVolumeClaim/my-blog-missing"))
        );
    }

    #[test]
    fn test_ingress_backend_must_exist() {
        let manifest = sample_topology().replace(
            "              service:\n                name: my-blog",
            "              service:\n                name: other-svc",
        );

        let topology = Topology::from_manifest(&manifest).unwrap();
        let issues = topology.verify();
        assert!(issues.iter().any(|i| i.message.contains("Service/other-svc")));
    }

    #[test]
    fn test_wrong_namespace_flagged() {
        let manifest = sample_topology().replace(
            "  name: my-blog-nginx\n  namespace: my-blog",
            "  name: my-blog-nginx\n  namespace: elsewhere",
        );

        let topology = Topology::from_manifest(&manifest).unwrap();
        let issues = topology.verify();
        assert!(
            issues
                .iter()
                .any(|i| i.resource == "ConfigMap/my-blog-nginx"
                    && i.message.contains("elsewhere"))
        );
    }

    #[test]
    fn test_selector_mismatch_flagged() {
        let manifest = sample_topology().replace(
            "  selector:\n    app.kubernetes.io/name: my-blog",
            "  selector:\n    app.kubernetes.io/name: other-app",
        );

        let topology = Topology::from_manifest(&manifest).unwrap();
        let issues = topology.verify();
        assert!(issues.iter().any(|i| {
            i.resource == "Service/my-blog" && i.message.contains("does not match pod label")
        }));
    }

    #[test]
    fn test_inconsistent_instance_label_flagged() {
        let manifest = sample_topology().replacen(
            "app.kubernetes.io/instance: my-blog",
            "app.kubernetes.io/instance: rogue",
            1,
        );

        let topology = Topology::from_manifest(&manifest).unwrap();
        let issues = topology.verify();
        assert!(
            issues
                .iter()
                .any(|i| i.message.contains("app.kubernetes.io/instance"))
        );
    }

    #[test]
    fn test_unknown_component_flagged() {
        let manifest =
            sample_topology().replace("app.kubernetes.io/component: storage", "app.kubernetes.io/component: web");

        let topology = Topology::from_manifest(&manifest).unwrap();
        let issues = topology.verify();
        assert!(issues.iter().any(|i| i.message.contains("unknown component 'web'")));
    }

    #[test]
    fn test_reversed_order() {
        let topology = Topology::from_manifest(&sample_topology()).unwrap();
        let reversed = topology.reversed();
        assert_eq!(reversed.first().unwrap().kind, "Ingress");
        assert_eq!(reversed.last().unwrap().kind, "Namespace");
    }
}
