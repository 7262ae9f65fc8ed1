use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const STRIKE_API_KEY_VAR: &str = "STRIKE_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Business identity shown in the hero, contact section and footer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SiteConfig {
    pub business_name: String,
    pub tagline: String,
    pub city: String,
    pub contact_email: String,
    pub phone: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            business_name: "Hometown Bitcoin Consulting".to_string(),
            tagline: "Plain-spoken Bitcoin help from your neighbors".to_string(),
            city: "Your Town".to_string(),
            contact_email: "hello@example.com".to_string(),
            phone: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoinGeckoProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StrikeProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub coingecko: Option<CoinGeckoProviderConfig>,
    pub strike: Option<StrikeProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            coingecko: Some(CoinGeckoProviderConfig {
                base_url: "https://api.coingecko.com/api/v3".to_string(),
            }),
            strike: Some(StrikeProviderConfig {
                base_url: "https://api.strike.me/v1".to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn coingecko_base_url(&self) -> &str {
        self.coingecko
            .as_ref()
            .map_or("https://api.coingecko.com/api/v3", |p| &p.base_url)
    }

    pub fn strike_base_url(&self) -> &str {
        self.strike
            .as_ref()
            .map_or("https://api.strike.me/v1", |p| &p.base_url)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TickerConfig {
    pub poll_interval_secs: u64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        TickerConfig {
            poll_interval_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
}

impl AppConfig {
    /// Loads the config from the platform config directory, or the built-in
    /// defaults when no file has been written there yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "hometownbitcoin", "btcsite")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Built-in defaults as YAML, the content `setup` writes.
    pub fn default_yaml() -> Result<String> {
        let yaml = serde_yaml::to_string(&Self::default())
            .context("Failed to serialize default config")?;
        Ok(format!("---\n{yaml}"))
    }

    /// The Strike credential, read from the process environment. Blank values
    /// count as absent.
    pub fn strike_api_key() -> Option<String> {
        std::env::var(STRIKE_API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
