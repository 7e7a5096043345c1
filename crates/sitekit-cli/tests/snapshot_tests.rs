//! Snapshot tests for error display formatting

use std::process::Command;

use tempfile::TempDir;

/// Helper to run sitekit command and capture output
fn sitekit_output(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_sitekit"))
        .args(args)
        .output()
        .expect("Failed to execute sitekit");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// Scaffold a valid project and return its parent directory
fn init_project(name: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let (_, stderr, success) = sitekit_output(&[
        "init",
        name,
        "--domain",
        "blog.example.com",
        "--output",
        &dir.path().to_string_lossy(),
    ]);
    assert!(success, "init failed: {stderr}");
    dir
}

mod validation_display {
    use super::*;

    #[test]
    fn test_violations_grouped_under_config_file() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");
        let config_path = path.join("sitekit.yaml");
        let config = std::fs::read_to_string(&config_path).unwrap();
        let broken = config
            .replace("replicas: 2", "replicas: 0")
            .replace("domain: blog.example.com", "domain: bad..domain");
        std::fs::write(&config_path, broken).unwrap();

        let (stdout, _, success) = sitekit_output(&["validate", &path.to_string_lossy()]);

        assert!(!success);
        assert!(stdout.contains("sitekit.yaml"), "Issues grouped by file");
        assert!(stdout.contains("replicas"), "Should list the replica violation");
        assert!(stdout.contains("domain"), "Should list the domain violation");
        assert!(
            stdout.contains("2 error(s)"),
            "Summary should count every violation: {stdout}"
        );
    }

    #[test]
    fn test_residual_token_reported_with_file_and_name() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");
        let manifest = path.join("manifests/03-configmap.yaml");
        let body = std::fs::read_to_string(&manifest).unwrap();
        std::fs::write(&manifest, format!("{body}  extra: \"{{{{ missing_var }}}}\"\n"))
            .unwrap();

        let (stdout, _, success) = sitekit_output(&["validate", &path.to_string_lossy()]);

        assert!(!success);
        assert!(stdout.contains("03-configmap.yaml"));
        assert!(stdout.contains("unresolved placeholder"));
        assert!(stdout.contains("missing_var"));
    }

    #[test]
    fn test_label_identity_mismatch_names_the_resource() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");
        let manifest = path.join("manifests/05-service.yaml");
        let body = std::fs::read_to_string(&manifest).unwrap();
        std::fs::write(
            &manifest,
            body.replace(
                "app.kubernetes.io/instance: my-blog",
                "app.kubernetes.io/instance: other-site",
            ),
        )
        .unwrap();

        let (stdout, _, success) = sitekit_output(&["validate", &path.to_string_lossy()]);

        assert!(!success);
        assert!(stdout.contains("Service/my-blog"), "Issue names the resource: {stdout}");
    }
}

mod error_display {
    use super::*;

    #[test]
    fn test_missing_project_has_diagnostic_code() {
        let dir = TempDir::new().unwrap();
        let (_, stderr, success) = sitekit_output(&["status", &dir.path().to_string_lossy()]);

        assert!(!success);
        assert!(stderr.contains("project not found"));
        assert!(
            stderr.contains("sitekit::cli"),
            "Errors carry their diagnostic code: {stderr}"
        );
    }

    #[test]
    fn test_init_into_existing_directory_suggests_fix() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("my-blog")).unwrap();

        let (_, stderr, success) = sitekit_output(&[
            "init",
            "my-blog",
            "--domain",
            "blog.example.com",
            "--output",
            &dir.path().to_string_lossy(),
        ]);

        assert!(!success);
        assert!(stderr.contains("already exists"));
        assert!(
            stderr.contains("different project name") || stderr.contains("remove"),
            "Help text should suggest a way out: {stderr}"
        );
    }
}
