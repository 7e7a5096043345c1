//! Integration tests for CLI commands

use std::process::Command;

use tempfile::TempDir;

/// Helper to run sitekit command
fn sitekit(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_sitekit"))
        .args(args)
        .output()
        .expect("Failed to execute sitekit")
}

/// Scaffold a valid project and return its parent directory
fn init_project(name: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_sitekit"))
        .args([
            "init",
            name,
            "--domain",
            "blog.example.com",
            "--output",
            &dir.path().to_string_lossy(),
        ])
        .output()
        .expect("Failed to execute sitekit");
    assert!(
        output.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    dir
}

mod init_command {
    use super::*;

    #[test]
    fn test_init_creates_complete_project() {
        let dir = init_project("my-blog");
        let root = dir.path().join("my-blog");

        assert!(root.join("sitekit.yaml").is_file());
        assert!(root.join("credentials.yaml").is_file());
        assert!(root.join(".gitignore").is_file());
        assert!(root.join("Dockerfile").is_file());
        assert!(root.join("content/index.html").is_file());
        for manifest in [
            "01-namespace.yaml",
            "02-pvc.yaml",
            "03-configmap.yaml",
            "04-deployment.yaml",
            "05-service.yaml",
            "06-ingress.yaml",
        ] {
            assert!(
                root.join("manifests").join(manifest).is_file(),
                "missing {manifest}"
            );
        }
    }

    #[test]
    fn test_init_without_arguments_names_every_missing_one() {
        let output = sitekit(&["init"]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("required arguments"),
            "stderr: {stderr}"
        );
        assert!(stderr.contains("<NAME>"), "stderr: {stderr}");
        assert!(stderr.contains("--domain"), "stderr: {stderr}");
    }

    #[test]
    fn test_init_rejects_invalid_name_listing_all_violations() {
        let dir = TempDir::new().unwrap();
        let output = sitekit(&[
            "init",
            "My_Blog",
            "--domain",
            "blog.example-.com",
            "--replicas",
            "11",
            "--output",
            &dir.path().to_string_lossy(),
        ]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        // All violations must be enumerated, not just the first
        assert!(stderr.contains("project_name"));
        assert!(stderr.contains("domain"));
        assert!(stderr.contains("replicas"));
        // Nothing may be written on failure
        assert!(!dir.path().join("My_Blog").exists());
    }

    #[test]
    fn test_init_refuses_existing_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("my-blog")).unwrap();

        let output = sitekit(&[
            "init",
            "my-blog",
            "--domain",
            "blog.example.com",
            "--output",
            &dir.path().to_string_lossy(),
        ]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("already exists"));
    }

    #[test]
    fn test_credentials_are_git_ignored() {
        let dir = init_project("my-blog");
        let gitignore =
            std::fs::read_to_string(dir.path().join("my-blog/.gitignore")).unwrap();
        assert!(gitignore.lines().any(|l| l.trim() == "credentials.yaml"));
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn test_validate_fresh_project_passes() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&["validate", &path.to_string_lossy()]);
        assert!(
            output.status.success(),
            "validate failed: {}",
            String::from_utf8_lossy(&output.stdout)
        );
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Validation passed"));
    }

    #[test]
    fn test_validate_reports_bad_replicas() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");
        let config_path = path.join("sitekit.yaml");
        let config = std::fs::read_to_string(&config_path).unwrap();
        std::fs::write(&config_path, config.replace("replicas: 2", "replicas: 11")).unwrap();

        let output = sitekit(&["validate", &path.to_string_lossy()]);
        assert!(!output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("replicas"));
    }

    #[test]
    fn test_validate_json_output() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&["validate", &path.to_string_lossy(), "--json"]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        assert_eq!(json["valid"], true);
        assert!(json.get("checked").is_some());
    }

    #[test]
    fn test_validate_catches_out_of_order_manifest() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");
        // Swap deployment and PVC: the deployment now references a later claim
        let manifests = path.join("manifests");
        let pvc = std::fs::read_to_string(manifests.join("02-pvc.yaml")).unwrap();
        let deployment =
            std::fs::read_to_string(manifests.join("04-deployment.yaml")).unwrap();
        std::fs::write(manifests.join("02-pvc.yaml"), deployment).unwrap();
        std::fs::write(manifests.join("04-deployment.yaml"), pvc).unwrap();

        let output = sitekit(&["validate", &path.to_string_lossy()]);
        assert!(!output.status.success());
    }

    #[test]
    fn test_validate_missing_project() {
        let dir = TempDir::new().unwrap();
        let output = sitekit(&["validate", &dir.path().to_string_lossy()]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("project not found"));
    }
}

mod render_command {
    use super::*;

    #[test]
    fn test_render_to_stdout_has_no_residual_tokens() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&["render", &path.to_string_lossy()]);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("kind: Namespace"));
        assert!(stdout.contains("kind: Ingress"));
        assert!(!stdout.contains("{{"));
    }

    #[test]
    fn test_render_defaults_land_in_manifests() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&["render", &path.to_string_lossy()]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("replicas: 2"));
        assert!(stdout.contains("storageClassName: standard"));
    }

    #[test]
    fn test_render_show_only() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&[
            "render",
            &path.to_string_lossy(),
            "--show-only",
            "05-service.yaml",
        ]);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("kind: Service"));
        assert!(!stdout.contains("kind: Deployment"));
    }
}

mod info_command {
    use super::*;

    #[test]
    fn test_info_shows_selector_and_url() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&["info", &path.to_string_lossy()]);
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("app.kubernetes.io/name=my-blog"));
        assert!(stdout.contains("https://blog.example.com"));
    }

    #[test]
    fn test_info_json_round_trips_config() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&["info", &path.to_string_lossy(), "--json"]);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");
        assert_eq!(json["project_name"], "my-blog");
        assert_eq!(json["replicas"], 2);
    }
}

mod open_command {
    use super::*;

    #[test]
    fn test_open_prints_url() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&["open", &path.to_string_lossy()]);
        assert!(output.status.success());
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            "https://blog.example.com"
        );
    }
}

mod build_command {
    use super::*;

    #[test]
    fn test_build_copies_content_to_dist() {
        let dir = init_project("my-blog");
        let path = dir.path().join("my-blog");

        let output = sitekit(&["build", &path.to_string_lossy()]);
        assert!(
            output.status.success(),
            "build failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(path.join("dist/index.html").is_file());
    }
}
