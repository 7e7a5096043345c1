//! Ordered apply and delete against the cluster
//!
//! Applies the topology with Server-Side Apply in its fixed order. If any
//! resource fails, application halts and the report names the failed
//! resource, the resources already applied (for operator rollback), and
//! the remainder that was never attempted. Deletion runs in reverse
//! order; NotFound is a skip, everything else is surfaced verbatim.

use kube::{
    Client,
    api::{Api, DeleteParams, DynamicObject, Patch, PatchParams},
    core::{GroupVersionKind, TypeMeta},
    discovery::{ApiCapabilities, ApiResource, Discovery, Scope},
};
use tracing::debug;

use crate::error::{KubeError, Result};
use crate::topology::{ManifestResource, Topology};

/// Field manager name for Server-Side Apply
const FIELD_MANAGER: &str = "sitekit";

/// Report of an ordered apply run
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    /// Resources applied, in order, with the action taken
    pub applied: Vec<String>,
    /// The resource that halted the run, with the error, if any
    pub failed: Option<(String, String)>,
    /// Resources never attempted because of the halt
    pub remaining: Vec<String>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }
}

/// Report of a reverse-order delete run
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    /// Resources skipped because they no longer exist
    pub skipped: Vec<String>,
    /// Failures, surfaced verbatim
    pub failed: Vec<(String, String)>,
}

impl DeleteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A resource resolved against cluster discovery, ready to apply
struct ParsedResource {
    obj: DynamicObject,
    gvk: GroupVersionKind,
    api_resource: ApiResource,
    capabilities: ApiCapabilities,
}

impl ParsedResource {
    fn display_name(&self) -> String {
        let name = self.obj.metadata.name.as_deref().unwrap_or("unnamed");
        match &self.obj.metadata.namespace {
            Some(ns) => format!("{}/{}/{}", ns, self.gvk.kind, name),
            None => format!("{}/{}", self.gvk.kind, name),
        }
    }
}

/// Ordered applier over dynamic cluster discovery
pub struct Applier {
    client: Client,
    discovery: Discovery,
}

impl Applier {
    /// Create an applier, running API discovery once
    pub async fn new(client: Client) -> Result<Self> {
        let discovery = Discovery::new(client.clone())
            .run()
            .await
            .map_err(KubeError::Api)?;
        Ok(Self { client, discovery })
    }

    /// Apply the topology in order, halting on the first failure
    pub async fn apply(
        &self,
        topology: &Topology,
        default_namespace: &str,
        dry_run: bool,
    ) -> Result<ApplyReport> {
        let parsed = self.parse_all(&topology.resources, default_namespace)?;
        let mut report = ApplyReport::default();

        for (index, resource) in parsed.iter().enumerate() {
            let name = resource.display_name();
            debug!(resource = %name, dry_run, "applying");

            match self.apply_single(resource, dry_run).await {
                Ok(created) => {
                    let action = if created { "created" } else { "configured" };
                    report.applied.push(format!("{} ({})", name, action));
                }
                Err(e) => {
                    // Halt: downstream resources would reference something
                    // that does not exist
                    report.failed = Some((name, e.to_string()));
                    report.remaining = parsed[index + 1..]
                        .iter()
                        .map(ParsedResource::display_name)
                        .collect();
                    break;
                }
            }
        }

        Ok(report)
    }

    /// Delete the topology in reverse order
    pub async fn destroy(
        &self,
        topology: &Topology,
        default_namespace: &str,
        dry_run: bool,
    ) -> Result<DeleteReport> {
        let mut parsed = self.parse_all(&topology.resources, default_namespace)?;
        parsed.reverse();

        let mut report = DeleteReport::default();

        for resource in &parsed {
            let name = resource.display_name();
            debug!(resource = %name, dry_run, "deleting");

            match self.delete_single(resource, dry_run).await {
                Ok(()) => report.deleted.push(name),
                Err(e) if e.is_not_found() => report.skipped.push(name),
                Err(e) => report.failed.push((name, e.to_string())),
            }
        }

        Ok(report)
    }

    fn parse_all(
        &self,
        resources: &[ManifestResource],
        default_namespace: &str,
    ) -> Result<Vec<ParsedResource>> {
        resources
            .iter()
            .map(|r| self.parse_single(r, default_namespace))
            .collect()
    }

    fn parse_single(
        &self,
        resource: &ManifestResource,
        default_namespace: &str,
    ) -> Result<ParsedResource> {
        let mut obj: DynamicObject = serde_yaml::from_str(&resource.yaml)
            .map_err(|e| KubeError::Serialization(format!("YAML parse error: {}", e)))?;

        let type_meta = obj.types.clone().ok_or_else(|| {
            KubeError::InvalidManifest("resource missing apiVersion or kind".to_string())
        })?;

        let gvk = gvk_from_type_meta(&type_meta);

        let (api_resource, capabilities) =
            self.discovery
                .resolve_gvk(&gvk)
                .ok_or_else(|| KubeError::UnknownResourceType {
                    api_version: type_meta.api_version.clone(),
                    kind: type_meta.kind.clone(),
                })?;

        if capabilities.scope == Scope::Namespaced && obj.metadata.namespace.is_none() {
            obj.metadata.namespace = Some(default_namespace.to_string());
        }

        Ok(ParsedResource {
            obj,
            gvk,
            api_resource,
            capabilities,
        })
    }

    async fn apply_single(&self, resource: &ParsedResource, dry_run: bool) -> Result<bool> {
        let name = resource
            .obj
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| KubeError::InvalidManifest("resource missing metadata.name".into()))?;

        let api = self.api_for(resource);

        let exists = api.get_opt(name).await.map_err(KubeError::Api)?.is_some();

        let mut params = PatchParams::apply(FIELD_MANAGER);
        params.force = true;
        if dry_run {
            params.dry_run = true;
        }

        api.patch(name, &params, &Patch::Apply(&resource.obj))
            .await
            .map_err(KubeError::Api)?;

        Ok(!exists)
    }

    async fn delete_single(&self, resource: &ParsedResource, dry_run: bool) -> Result<()> {
        let name = resource
            .obj
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| KubeError::InvalidManifest("resource missing metadata.name".into()))?;

        let api = self.api_for(resource);

        let params = DeleteParams {
            propagation_policy: Some(kube::api::PropagationPolicy::Background),
            dry_run,
            ..Default::default()
        };

        api.delete(name, &params).await.map_err(KubeError::Api)?;
        Ok(())
    }

    fn api_for(&self, resource: &ParsedResource) -> Api<DynamicObject> {
        match (
            &resource.capabilities.scope,
            &resource.obj.metadata.namespace,
        ) {
            (Scope::Namespaced, Some(ns)) => {
                Api::namespaced_with(self.client.clone(), ns, &resource.api_resource)
            }
            _ => Api::all_with(self.client.clone(), &resource.api_resource),
        }
    }
}

fn gvk_from_type_meta(type_meta: &TypeMeta) -> GroupVersionKind {
    let (group, version) = match type_meta.api_version.split_once('/') {
        Some((g, v)) => (g.to_string(), v.to_string()),
        None => (String::new(), type_meta.api_version.clone()),
    };
    GroupVersionKind {
        group,
        version,
        kind: type_meta.kind.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gvk_core_group() {
        let tm = TypeMeta {
            api_version: "v1".to_string(),
            kind: "Service".to_string(),
        };
        let gvk = gvk_from_type_meta(&tm);
        assert_eq!(gvk.group, "");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.kind, "Service");
    }

    #[test]
    fn test_gvk_named_group() {
        let tm = TypeMeta {
            api_version: "networking.k8s.io/v1".to_string(),
            kind: "Ingress".to_string(),
        };
        let gvk = gvk_from_type_meta(&tm);
        assert_eq!(gvk.group, "networking.k8s.io");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.kind, "Ingress");
    }

    #[test]
    fn test_apply_report_success() {
        let report = ApplyReport {
            applied: vec!["ns/Deployment/web (created)".into()],
            failed: None,
            remaining: vec![],
        };
        assert!(report.is_success());

        let halted = ApplyReport {
            applied: vec!["Namespace/web (created)".into()],
            failed: Some(("ns/Deployment/web".into(), "quota exceeded".into())),
            remaining: vec!["ns/Service/web".into()],
        };
        assert!(!halted.is_success());
        assert_eq!(halted.remaining.len(), 1);
    }
}
