pub mod core;
pub mod page;
pub mod providers;
pub mod proxy;
pub mod server;
pub mod widgets;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::config::AppConfig;

pub async fn run(config_path: Option<&str>) -> Result<()> {
    info!("btcsite starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    server::serve(&config).await
}
