use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::info;

use storeseed_admin::config::DEFAULT_API_VERSION;

use crate::config::{AppConfig, FilesConfig, StoreConfig};

#[derive(Args)]
pub struct InitArgs {
    /// Store URL, e.g. https://example.myshopify.com
    #[arg(long)]
    url: String,

    /// Admin API access token
    #[arg(long)]
    access_token: String,

    /// Admin API version
    #[arg(long, default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Seed payload file
    #[arg(long)]
    data: Option<PathBuf>,

    /// File the created records are saved to
    #[arg(long)]
    save: Option<PathBuf>,

    /// Overwrite an existing config
    #[arg(long)]
    force: bool,
}

pub fn run(args: InitArgs, config_path: &Path) -> Result<()> {
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    let defaults = FilesConfig::default();
    let config = AppConfig {
        store: StoreConfig {
            url: args.url,
            access_token: args.access_token,
            api_version: args.api_version,
        },
        files: FilesConfig {
            data: args.data.unwrap_or(defaults.data),
            save: args.save.unwrap_or(defaults.save),
        },
    };
    config.save(config_path)?;

    info!(config_path = %config_path.display(), "Config saved");
    println!("Config: {}", config_path.display());
    Ok(())
}
