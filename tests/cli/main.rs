use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod init;
mod list;

const BIN_NAME: &str = "kimages";

/// Pods across two namespaces, with duplicates, an init container and an
/// image without a tag.
pub const PODS_JSON: &str = r#"{
  "apiVersion": "v1",
  "kind": "PodList",
  "metadata": { "resourceVersion": "4242" },
  "items": [
    {
      "metadata": { "name": "web-0", "namespace": "default" },
      "spec": {
        "initContainers": [{ "name": "migrate", "image": "busybox:1.36" }],
        "containers": [
          { "name": "web", "image": "nginx:1.25" },
          { "name": "sidecar", "image": "envoyproxy/envoy:v1.29" }
        ]
      }
    },
    {
      "metadata": { "name": "web-1", "namespace": "default" },
      "spec": {
        "containers": [
          { "name": "web", "image": "nginx:1.25" },
          { "name": "sidecar", "image": "envoyproxy/envoy:v1.29" }
        ]
      }
    },
    {
      "metadata": { "name": "cache-0", "namespace": "infra" },
      "spec": {
        "containers": [
          { "name": "redis", "image": "redis" },
          { "name": "exporter", "image": "registry.local:5000/redis-exporter:2.1" }
        ]
      }
    }
  ]
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery at the temp dir.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    /// A project holding `pods.json` with [`PODS_JSON`].
    pub fn with_pods() -> Result<Self> {
        Self::with_file("pods.json", PODS_JSON)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn list_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("list");
        cmd
    }

    /// `list --from-file pods.json` plus `args`.
    pub fn list_pods(&self, args: &[&str]) -> Result<Output> {
        let output = self
            .list_command()
            .args(["--from-file", "pods.json"])
            .args(args)
            .output()
            .context("Failed to run kimages")?;
        Ok(output)
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
    Ok(())
}
