//! High-level cluster client for sitekit operations
//!
//! Every selection-based operation goes through the project's selector
//! labels; nothing here guesses at resource names beyond what the config
//! dictates.

use futures::{AsyncBufReadExt, TryStreamExt};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Event, PersistentVolumeClaim, Pod, Service};
use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{Api, ListParams, LogParams};
use serde::Serialize;
use tracing::debug;

use sitekit_core::SelectorLabels;

use crate::error::{KubeError, Result};

/// Readiness of the serving deployment
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadStatus {
    pub desired: i32,
    pub ready: i32,
    pub updated: i32,
    pub available: i32,
}

impl WorkloadStatus {
    pub fn is_ready(&self) -> bool {
        self.ready == self.desired && self.updated == self.desired && self.available == self.desired
    }
}

/// One pod, reduced to what status output needs
#[derive(Debug, Clone, Serialize)]
pub struct PodBrief {
    pub name: String,
    pub phase: String,
    pub ready: bool,
}

/// Aggregated status of one project's resources
#[derive(Debug, Clone, Serialize)]
pub struct SiteStatus {
    pub namespace: String,
    pub deployment: Option<WorkloadStatus>,
    pub claim_phase: Option<String>,
    pub service_present: bool,
    pub ingress_hosts: Vec<String>,
    pub pods: Vec<PodBrief>,
}

/// High-level Kubernetes client for sitekit
#[derive(Clone)]
pub struct SiteClient {
    client: kube::Client,
}

impl SiteClient {
    /// Connect using the default kubeconfig resolution
    pub async fn new() -> Result<Self> {
        let client = kube::Client::try_default().await?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: kube::Client) -> Self {
        Self { client }
    }

    /// Get the underlying Kubernetes client
    pub fn kube_client(&self) -> &kube::Client {
        &self.client
    }

    /// List the project's pods by selector
    pub async fn pods(&self, namespace: &str, labels: &SelectorLabels) -> Result<Vec<Pod>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let lp = ListParams::default().labels(&labels.selector());
        let pods = api.list(&lp).await.map_err(KubeError::Api)?;
        Ok(pods.items)
    }

    /// List the project's pods that are currently running
    pub async fn running_pods(
        &self,
        namespace: &str,
        labels: &SelectorLabels,
    ) -> Result<Vec<Pod>> {
        Ok(self
            .pods(namespace, labels)
            .await?
            .into_iter()
            .filter(|pod| {
                pod.status
                    .as_ref()
                    .and_then(|s| s.phase.as_deref())
                    .map(|phase| phase == "Running")
                    .unwrap_or(false)
            })
            .collect())
    }

    /// Aggregate the status of the project's resources
    pub async fn status(
        &self,
        namespace: &str,
        project_name: &str,
        labels: &SelectorLabels,
    ) -> Result<SiteStatus> {
        let deployments: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let claims: Api<PersistentVolumeClaim> = Api::namespaced(self.client.clone(), namespace);
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let ingresses: Api<Ingress> = Api::namespaced(self.client.clone(), namespace);

        let deployment = deployments
            .get_opt(project_name)
            .await
            .map_err(KubeError::Api)?
            .map(|d| {
                let desired = d.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1);
                let status = d.status.as_ref();
                WorkloadStatus {
                    desired,
                    ready: status.and_then(|s| s.ready_replicas).unwrap_or(0),
                    updated: status.and_then(|s| s.updated_replicas).unwrap_or(0),
                    available: status.and_then(|s| s.available_replicas).unwrap_or(0),
                }
            });

        let claim_phase = claims
            .get_opt(&format!("{}-content", project_name))
            .await
            .map_err(KubeError::Api)?
            .and_then(|c| c.status.and_then(|s| s.phase));

        let service_present = services
            .get_opt(project_name)
            .await
            .map_err(KubeError::Api)?
            .is_some();

        let ingress_hosts = ingresses
            .get_opt(project_name)
            .await
            .map_err(KubeError::Api)?
            .and_then(|i| i.spec)
            .and_then(|s| s.rules)
            .map(|rules| rules.into_iter().filter_map(|r| r.host).collect())
            .unwrap_or_default();

        let pods = self
            .pods(namespace, labels)
            .await?
            .iter()
            .map(pod_brief)
            .collect();

        Ok(SiteStatus {
            namespace: namespace.to_string(),
            deployment,
            claim_phase,
            service_present,
            ingress_hosts,
            pods,
        })
    }

    /// Fetch logs from every matching pod, prefixed with the pod name
    pub async fn logs(
        &self,
        namespace: &str,
        labels: &SelectorLabels,
        tail: Option<i64>,
    ) -> Result<Vec<(String, String)>> {
        let pods = self.pods(namespace, labels).await?;
        if pods.is_empty() {
            return Err(KubeError::NoMatchingPods {
                selector: labels.selector(),
                namespace: namespace.to_string(),
            });
        }

        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = LogParams {
            tail_lines: tail,
            ..Default::default()
        };

        let mut output = Vec::with_capacity(pods.len());
        for pod in &pods {
            let name = pod.metadata.name.clone().unwrap_or_default();
            debug!(pod = %name, "fetching logs");
            let body = api.logs(&name, &params).await.map_err(KubeError::Api)?;
            output.push((name, body));
        }
        Ok(output)
    }

    /// Stream logs from the first matching pod, invoking `emit` per line
    pub async fn follow_logs<F>(
        &self,
        namespace: &str,
        labels: &SelectorLabels,
        tail: Option<i64>,
        mut emit: F,
    ) -> Result<()>
    where
        F: FnMut(&str, &str),
    {
        let pods = self.running_pods(namespace, labels).await?;
        let Some(pod) = pods.first() else {
            return Err(KubeError::NoMatchingPods {
                selector: labels.selector(),
                namespace: namespace.to_string(),
            });
        };
        let name = pod.metadata.name.clone().unwrap_or_default();

        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = LogParams {
            follow: true,
            tail_lines: tail,
            ..Default::default()
        };

        let stream = api.log_stream(&name, &params).await.map_err(KubeError::Api)?;
        let mut lines = stream.lines();
        while let Some(line) = lines.try_next().await? {
            emit(&name, &line);
        }
        Ok(())
    }

    /// Recent events in the namespace, oldest first
    pub async fn events(&self, namespace: &str) -> Result<Vec<Event>> {
        let api: Api<Event> = Api::namespaced(self.client.clone(), namespace);
        let mut events = api
            .list(&ListParams::default())
            .await
            .map_err(KubeError::Api)?
            .items;
        events.sort_by_key(|e| e.last_timestamp.clone().map(|t| t.0));
        Ok(events)
    }
}

fn pod_brief(pod: &Pod) -> PodBrief {
    let status = pod.status.as_ref();
    let ready = status
        .and_then(|s| s.conditions.as_ref())
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Ready" && c.status == "True")
        })
        .unwrap_or(false);

    PodBrief {
        name: pod.metadata.name.clone().unwrap_or_default(),
        phase: status
            .and_then(|s| s.phase.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        ready,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_readiness() {
        let ready = WorkloadStatus {
            desired: 2,
            ready: 2,
            updated: 2,
            available: 2,
        };
        assert!(ready.is_ready());

        let rolling = WorkloadStatus {
            desired: 2,
            ready: 2,
            updated: 1,
            available: 2,
        };
        assert!(!rolling.is_ready());
    }

    #[test]
    fn test_pod_brief_readiness() {
        let pod: Pod = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "my-blog-abc" },
            "status": {
                "phase": "Running",
                "conditions": [
                    { "type": "Ready", "status": "True" }
                ]
            }
        }))
        .unwrap();

        let brief = pod_brief(&pod);
        assert_eq!(brief.name, "my-blog-abc");
        assert_eq!(brief.phase, "Running");
        assert!(brief.ready);
    }

    #[test]
    fn test_pod_brief_without_status() {
        let pod: Pod = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "pending-pod" }
        }))
        .unwrap();

        let brief = pod_brief(&pod);
        assert_eq!(brief.phase, "Unknown");
        assert!(!brief.ready);
    }
}
