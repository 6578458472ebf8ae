//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use souq_cache::Cache;
use souq_storefront::Storefront;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, searched upward from the working directory.
pub const CONFIG_NAMES: [&str; 3] = ["souq.toml", ".souq.toml", "souq.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_path(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env();

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory holding the cart file.
    ///
    /// `data_dir` from the config is resolved against the config file's
    /// directory; without one, the per-user data directory is used.
    pub fn data_dir(&self) -> PathBuf {
        match &self.config.data_dir {
            Some(dir) => {
                let base = self
                    .config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .unwrap_or(&self.cwd);
                resolve_path(base, dir)
            }
            None => dirs_path().join("souq"),
        }
    }

    /// Build the storefront over the file-backed cart.
    pub fn storefront(&self) -> Result<Storefront> {
        if let Err(errors) = self.config.storefront.validate() {
            anyhow::bail!("Invalid configuration: {}", errors.join("; "));
        }
        let data_dir = self.data_dir();
        let cache = Cache::open_dir(&data_dir)
            .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;
        Storefront::connect(self.config.storefront.clone(), cache)
            .context("Failed to create HTTP client")
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CliConfig::load(&config_path) {
                    Ok(config) => return Some((config_path, config)),
                    Err(err) => tracing::warn!(error = %format!("{err:#}"), "skipping config file"),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

fn resolve_path(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
