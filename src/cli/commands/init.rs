use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

use super::super::exit_status::ExitStatus;
use super::super::report::print_init_success;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<ExitStatus> {
    init_in(Path::new("."))?;
    print_init_success();
    Ok(ExitStatus::Success)
}

/// Write the default config into `dir`, refusing to overwrite.
pub fn init_in(dir: &Path) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    Ok(())
}
