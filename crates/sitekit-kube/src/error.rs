//! Error types for sitekit-kube

use thiserror::Error;

/// Result type for sitekit-kube operations
pub type Result<T> = std::result::Result<T, KubeError>;

/// Errors that can occur during Kubernetes operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// Manifest could not be parsed
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// Resource type not known to the cluster
    #[error("unknown resource type: {api_version}/{kind}")]
    UnknownResourceType { api_version: String, kind: String },

    /// Topology verification failed
    #[error("topology error: {0}")]
    Topology(String),

    /// No pod matched the project selector
    #[error("no running pod matches selector '{selector}' in namespace '{namespace}'")]
    NoMatchingPods { selector: String, namespace: String },

    /// Exec inside a pod failed
    #[error("exec in pod '{pod}' failed: {message}")]
    ExecFailed { pod: String, message: String },

    /// External tool missing for an interactive shortcut
    #[error("'{tool}' is not available on PATH\nHint: {hint}")]
    ToolUnavailable { tool: String, hint: String },

    /// External tool exited with a failure
    #[error("'{tool}' exited with status {status}")]
    ToolFailed { tool: String, status: i32 },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Core error
    #[error(transparent)]
    Core(#[from] sitekit_core::CoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KubeError {
    /// Whether this error is a Kubernetes 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, KubeError::Api(kube::Error::Api(ae)) if ae.code == 404)
    }
}
