use std::{num::NonZeroUsize, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use super::super::args::{ListCommand, OutputFormat};
use super::super::exit_status::ExitStatus;
use super::super::report;
use crate::{
    config::{Config, home_dir, load_config, resolve_kubeconfig},
    core::{Collection, Collector, Scope, Strategy, collect::default_concurrency},
    source::{FileSource, KubectlSource, RecordSource},
};

/// Effective settings for one `list` run: flags over config over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub strategy: Strategy,
    pub output: OutputFormat,
    pub parsed: bool,
    pub timeout: Duration,
    pub page_size: NonZeroUsize,
    pub concurrency: NonZeroUsize,
    pub namespace: Option<String>,
}

impl Settings {
    pub fn resolve(cmd: &ListCommand, config: &Config) -> Result<Self> {
        let args = &cmd.args;
        let page_size = match args.page_size {
            Some(size) => size,
            None => NonZeroUsize::new(config.page_size)
                .context("Invalid 'pageSize': must be greater than 0")?,
        };
        let concurrency = args
            .concurrency
            .or(config.concurrency.and_then(NonZeroUsize::new))
            .unwrap_or_else(default_concurrency);

        Ok(Self {
            strategy: args.strategy.unwrap_or(config.strategy),
            output: args.output.unwrap_or(config.output),
            parsed: args.parsed,
            timeout: Duration::from_secs(args.timeout.unwrap_or(config.timeout_secs)),
            page_size,
            concurrency,
            namespace: args.namespace.clone().or_else(|| config.namespace.clone()),
        })
    }

    fn collector(&self) -> Collector {
        Collector::new(self.strategy)
            .with_page_size(self.page_size)
            .with_concurrency(self.concurrency)
    }
}

pub fn list(cmd: ListCommand) -> Result<ExitStatus> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let loaded = load_config(&cwd)?;
    if let Some(path) = &loaded.path {
        debug!(path = %path.display(), "loaded config");
    }

    let settings = Settings::resolve(&cmd, &loaded.config)?;
    let source = open_source(&cmd, &loaded.config, &settings)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let collection = runtime.block_on(collect(source, &settings))?;

    report::print(&collection, settings.output, settings.parsed)?;
    report::print_partial_warning(&collection);
    Ok(ExitStatus::from_collection(&collection))
}

fn open_source(
    cmd: &ListCommand,
    config: &Config,
    settings: &Settings,
) -> Result<Arc<dyn RecordSource>> {
    if let Some(path) = &cmd.args.from_file {
        let source = FileSource::open(path)?.with_namespace(settings.namespace.clone());
        return Ok(Arc::new(source));
    }

    let home = home_dir();
    let kubeconfig: PathBuf =
        resolve_kubeconfig(cmd.args.kubeconfig.as_deref(), config, home.as_deref())?;
    if !kubeconfig.is_file() {
        bail!("kubeconfig not found: {}", kubeconfig.display());
    }
    debug!(kubeconfig = %kubeconfig.display(), "using kubectl");

    Ok(Arc::new(
        KubectlSource::new(Some(kubeconfig)).with_namespace(settings.namespace.clone()),
    ))
}

async fn collect(source: Arc<dyn RecordSource>, settings: &Settings) -> Result<Collection> {
    let scope = Scope::with_timeout(settings.timeout);

    let cancel = scope.cancel_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping");
            cancel.cancel();
        }
    });

    let result = settings.collector().collect(source, &scope).await;
    interrupt.abort();

    result.with_context(|| format!("{} listing failed", settings.strategy.as_str()))
}
