//! Content sync and backup over pod exec
//!
//! Sync streams a tar archive of the local content into every running pod
//! independently: one pod failing does not stop the others, and the report
//! keeps each outcome separate. Backup pulls a gzipped tar of the served
//! content from one running pod.

use std::path::Path;

use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, AttachParams};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

use sitekit_core::SelectorLabels;

use crate::client::SiteClient;
use crate::error::{KubeError, Result};

/// Where nginx serves the site content from inside each pod
pub const SERVING_PATH: &str = "/usr/share/nginx/html";

/// Result of pushing content to one pod
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub pod: String,
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Fan-out sync report, one outcome per targeted pod
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub outcomes: Vec<SyncOutcome>,
}

impl SyncReport {
    pub fn synced(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> Vec<&SyncOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success()).collect()
    }

    /// True when every targeted pod received the content
    pub fn is_complete(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| o.is_success())
    }
}

/// Result of pulling a content backup
#[derive(Debug, Clone)]
pub struct BackupReport {
    pub pod: String,
    pub archive: std::path::PathBuf,
    pub bytes: u64,
}

/// Build a tar archive of `dir` in memory, paths relative to `dir`
fn archive_dir(dir: &Path) -> Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());
    builder.follow_symlinks(false);

    for entry in walkdir::WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            KubeError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::other("walk failed on a non-io error")
            }))
        })?;
        let rel = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| KubeError::Io(std::io::Error::other(e)))?;
        if entry.file_type().is_dir() {
            builder.append_dir(rel, entry.path())?;
        } else if entry.file_type().is_file() {
            builder.append_path_with_name(entry.path(), rel)?;
        }
    }

    Ok(builder.into_inner()?)
}

/// Stream `archive` into one pod and unpack it at `dest`
async fn push_archive(
    pods: &Api<Pod>,
    pod_name: &str,
    archive: &[u8],
    dest: &str,
) -> Result<()> {
    let params = AttachParams::default()
        .stdin(true)
        .stdout(true)
        .stderr(true);
    let command = vec!["tar", "xf", "-", "-C", dest];

    let mut attached = pods
        .exec(pod_name, command, &params)
        .await
        .map_err(KubeError::Api)?;

    let mut stdin = attached.stdin().ok_or_else(|| KubeError::ExecFailed {
        pod: pod_name.to_string(),
        message: "no stdin channel on exec session".to_string(),
    })?;
    stdin.write_all(archive).await?;
    stdin.flush().await?;
    drop(stdin);

    let mut stderr_buf = String::new();
    if let Some(mut stderr) = attached.stderr() {
        stderr.read_to_string(&mut stderr_buf).await.ok();
    }

    let status = attached.take_status();
    attached.join().await.map_err(|e| KubeError::ExecFailed {
        pod: pod_name.to_string(),
        message: e.to_string(),
    })?;

    if let Some(status) = status
        && let Some(status) = status.await
        && status.status.as_deref() != Some("Success")
    {
        let detail = if stderr_buf.trim().is_empty() {
            status.message.unwrap_or_else(|| "tar extraction failed".to_string())
        } else {
            stderr_buf.trim().to_string()
        };
        return Err(KubeError::ExecFailed {
            pod: pod_name.to_string(),
            message: detail,
        });
    }
    Ok(())
}

/// Push the built content directory into every running pod.
///
/// Pods are handled independently: the report carries one outcome per pod
/// and a failure on one pod never skips the rest. Note that replacement
/// pods start from the image content, so synced changes do not survive a
/// rollout; rebuilding the image is the durable path.
pub async fn sync_content(
    client: &SiteClient,
    namespace: &str,
    labels: &SelectorLabels,
    dist_dir: &Path,
) -> Result<SyncReport> {
    let archive = archive_dir(dist_dir)?;

    let targets = client.running_pods(namespace, labels).await?;
    if targets.is_empty() {
        return Err(KubeError::NoMatchingPods {
            selector: labels.selector(),
            namespace: namespace.to_string(),
        });
    }

    let pods: Api<Pod> = Api::namespaced(client.kube_client().clone(), namespace);
    let mut report = SyncReport::default();
    for pod in &targets {
        let name = pod.metadata.name.clone().unwrap_or_default();
        debug!(pod = %name, bytes = archive.len(), "syncing content");
        let outcome = match push_archive(&pods, &name, &archive, SERVING_PATH).await {
            Ok(()) => SyncOutcome { pod: name, error: None },
            Err(e) => {
                warn!(pod = %name, error = %e, "content sync failed");
                SyncOutcome {
                    pod: name,
                    error: Some(e.to_string()),
                }
            }
        };
        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Pull the served content from one running pod into a local gzipped tar
pub async fn backup_content(
    client: &SiteClient,
    namespace: &str,
    labels: &SelectorLabels,
    output: &Path,
) -> Result<BackupReport> {
    let targets = client.running_pods(namespace, labels).await?;
    let Some(pod) = targets.first() else {
        return Err(KubeError::NoMatchingPods {
            selector: labels.selector(),
            namespace: namespace.to_string(),
        });
    };
    let pod_name = pod.metadata.name.clone().unwrap_or_default();

    let pods: Api<Pod> = Api::namespaced(client.kube_client().clone(), namespace);
    let params = AttachParams::default().stdout(true).stderr(true);
    let command = vec!["tar", "cf", "-", "-C", SERVING_PATH, "."];

    let mut attached = pods
        .exec(&pod_name, command, &params)
        .await
        .map_err(KubeError::Api)?;

    let mut stdout = attached.stdout().ok_or_else(|| KubeError::ExecFailed {
        pod: pod_name.clone(),
        message: "no stdout channel on exec session".to_string(),
    })?;
    let mut raw = Vec::new();
    stdout.read_to_end(&mut raw).await?;

    let status = attached.take_status();
    attached.join().await.map_err(|e| KubeError::ExecFailed {
        pod: pod_name.clone(),
        message: e.to_string(),
    })?;

    if let Some(status) = status
        && let Some(status) = status.await
        && status.status.as_deref() != Some("Success")
    {
        return Err(KubeError::ExecFailed {
            pod: pod_name,
            message: status
                .message
                .unwrap_or_else(|| "tar archive failed".to_string()),
        });
    }

    let file = std::fs::File::create(output)?;
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    std::io::Write::write_all(&mut encoder, &raw)?;
    encoder.finish()?;

    let bytes = std::fs::metadata(output)?.len();
    Ok(BackupReport {
        pod: pod_name,
        archive: output.to_path_buf(),
        bytes,
    })
}
