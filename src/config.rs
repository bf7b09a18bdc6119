use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::core::{DEFAULT_TIMEOUT, Strategy, collect::DEFAULT_PAGE_SIZE};

pub const CONFIG_FILE_NAME: &str = ".kimagesrc.json";

/// Environment variable holding the kubeconfig path or alias.
///
/// Deliberately not `KUBECONFIG`, so the tool can point somewhere other than
/// the shell's current kubectl context.
pub const KUBE_CONFIG_ENV: &str = "KUBE_CONFIG";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Fan-out worker count; `None` uses the available parallelism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,
    /// Short names for kubeconfig paths, e.g. `{"prod": "~/.kube/prod.yaml"}`.
    #[serde(default)]
    pub kubeconfig_aliases: BTreeMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            output: OutputFormat::default(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            concurrency: None,
            namespace: None,
            kubeconfig: None,
            kubeconfig_aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a numeric setting is zero or an alias is blank.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("Invalid 'timeoutSecs': must be greater than 0");
        }
        if self.page_size == 0 {
            bail!("Invalid 'pageSize': must be greater than 0");
        }
        if self.concurrency == Some(0) {
            bail!("Invalid 'concurrency': must be greater than 0");
        }
        for (alias, path) in &self.kubeconfig_aliases {
            if alias.is_empty() || path.is_empty() {
                bail!(
                    "Invalid entry in 'kubeconfigAliases': \"{}\" -> \"{}\"",
                    alias,
                    path
                );
            }
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the file the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

/// Replace `value` by its alias target, if it is a known alias.
pub fn lookup_alias(aliases: &BTreeMap<String, String>, value: String) -> String {
    match aliases.get(&value) {
        Some(target) => target.clone(),
        None => value,
    }
}

/// Expand a leading `~/` against `home`.
fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Resolve the kubeconfig path.
///
/// Precedence: `explicit` (the `--kubeconfig` flag or `KUBE_CONFIG`), then
/// the config file, then `$HOME/.kube/config`. Whichever wins is looked up in
/// `kubeconfigAliases` before use.
pub fn resolve_kubeconfig(
    explicit: Option<&str>,
    config: &Config,
    home: Option<&Path>,
) -> Result<PathBuf> {
    let value = explicit
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| config.kubeconfig.clone().filter(|v| !v.is_empty()))
        .or_else(|| home.map(|h| h.join(".kube").join("config").display().to_string()));

    let Some(value) = value else {
        bail!(
            "kubeconfig path not found, nor provided by environment variable {}",
            KUBE_CONFIG_ENV
        );
    };

    let value = lookup_alias(&config.kubeconfig_aliases, value);
    Ok(expand_home(&value, home))
}

/// The current user's home directory, from the environment.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
