//! Sitekit Kube - Kubernetes integration for sitekit
//!
//! This crate provides:
//! - **Topology**: the ordered six-resource model with dependency and
//!   label-consistency verification
//! - **Applier**: ordered Server-Side Apply that halts on the first failure
//!   and reports what was already applied
//! - **SiteClient**: workload status, logs, and events scoped by the
//!   project's selector labels
//! - **Content sync**: per-pod tar-over-exec fan-out with independent
//!   outcome tracking, plus content backup
//! - **Dispatcher**: one-time kubectl probe for interactive shortcuts

pub mod apply;
pub mod client;
pub mod error;
pub mod sync;
pub mod tool;
pub mod topology;

pub use apply::{Applier, ApplyReport, DeleteReport};
pub use client::{PodBrief, SiteClient, SiteStatus, WorkloadStatus};
pub use error::{KubeError, Result};
pub use sync::{BackupReport, SyncOutcome, SyncReport, backup_content, sync_content};
pub use tool::{Dispatcher, Kubectl};
pub use topology::{ManifestResource, ResourceRef, Topology, TopologyIssue};
