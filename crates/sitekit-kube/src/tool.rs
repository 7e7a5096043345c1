//! Interactive shortcuts delegated to kubectl
//!
//! kubectl is probed exactly once when the dispatcher is built; commands
//! consult the cached result instead of re-checking PATH on every call.
//! Only the operations that need a real terminal (shell, port-forward)
//! go through here; everything else talks to the API server directly.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{KubeError, Result};

const KUBECTL_HINT: &str =
    "install kubectl and ensure it is on PATH: https://kubernetes.io/docs/tasks/tools/";

/// A kubectl binary found on PATH
#[derive(Debug, Clone)]
pub struct Kubectl {
    path: PathBuf,
}

impl Kubectl {
    /// Look for kubectl on PATH. Called once per process.
    pub fn probe() -> Option<Self> {
        Self::probe_in(&std::env::var_os("PATH")?)
    }

    fn probe_in(search_path: &std::ffi::OsStr) -> Option<Self> {
        for dir in std::env::split_paths(search_path) {
            let candidate = dir.join("kubectl");
            if is_executable(&candidate) {
                debug!(path = %candidate.display(), "found kubectl");
                return Some(Self { path: candidate });
            }
        }
        None
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

/// Routes interactive operations to kubectl when it is available
#[derive(Debug, Clone)]
pub struct Dispatcher {
    kubectl: Option<Kubectl>,
}

impl Dispatcher {
    /// Probe the environment once and remember the outcome
    pub fn detect() -> Self {
        Self {
            kubectl: Kubectl::probe(),
        }
    }

    #[cfg(test)]
    fn without_kubectl() -> Self {
        Self { kubectl: None }
    }

    pub fn has_kubectl(&self) -> bool {
        self.kubectl.is_some()
    }

    fn kubectl(&self) -> Result<&Kubectl> {
        self.kubectl.as_ref().ok_or_else(|| KubeError::ToolUnavailable {
            tool: "kubectl".to_string(),
            hint: KUBECTL_HINT.to_string(),
        })
    }

    /// Open an interactive shell inside a pod
    pub async fn shell(&self, namespace: &str, pod: &str) -> Result<()> {
        let kubectl = self.kubectl()?;
        self.run_interactive(
            kubectl,
            &["exec", "-it", "-n", namespace, pod, "--", "/bin/sh"],
        )
        .await
    }

    /// Forward a local port to the site's service until interrupted
    pub async fn port_forward(
        &self,
        namespace: &str,
        service: &str,
        local_port: u16,
        remote_port: u16,
    ) -> Result<()> {
        let kubectl = self.kubectl()?;
        let target = format!("svc/{}", service);
        let mapping = format!("{}:{}", local_port, remote_port);
        self.run_interactive(kubectl, &["port-forward", "-n", namespace, &target, &mapping])
            .await
    }

    /// Run kubectl with the terminal handed over to the child
    async fn run_interactive(&self, kubectl: &Kubectl, args: &[&str]) -> Result<()> {
        debug!(?args, "delegating to kubectl");
        let status = Command::new(kubectl.path())
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if !status.success() {
            return Err(KubeError::ToolFailed {
                tool: "kubectl".to_string(),
                status: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shell_without_kubectl_gives_install_hint() {
        let dispatcher = Dispatcher::without_kubectl();
        let err = dispatcher.shell("my-blog", "my-blog-abc").await.unwrap_err();
        match err {
            KubeError::ToolUnavailable { tool, hint } => {
                assert_eq!(tool, "kubectl");
                assert!(hint.contains("PATH"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_probe_finds_executable_on_path() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("kubectl");
        std::fs::write(&fake, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let found = Kubectl::probe_in(dir.path().as_os_str());
        assert!(found.is_some());
        assert_eq!(found.unwrap().path(), fake);
    }

    #[test]
    fn test_probe_ignores_non_executable_candidate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("kubectl"), "not a binary").unwrap();

        #[cfg(unix)]
        assert!(Kubectl::probe_in(dir.path().as_os_str()).is_none());
    }
}
