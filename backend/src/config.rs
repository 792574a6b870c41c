use crate::services::youtube_client::YoutubeClient;
use crate::AppState;
use anyhow::{bail, Result};
use env_logger::Builder;
use log::{info, LevelFilter};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
pub const DEFAULT_OUTPUT_DIR: &str = "exports";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub youtube_api_key: String,
    /// Always ends with `/` so resource names can be joined onto it.
    pub api_base_url: String,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let youtube_api_key = match lookup("YOUTUBE_API_KEY") {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => bail!("YOUTUBE_API_KEY environment variable must be set"),
        };

        let mut api_base_url = lookup("YOUTUBE_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if !api_base_url.ends_with('/') {
            api_base_url.push('/');
        }

        let output_dir = lookup("EXPORT_OUTPUT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self {
            youtube_api_key,
            api_base_url,
            output_dir,
        })
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting channel export backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_app_state(config: AppConfig) -> Result<AppState> {
    let client = YoutubeClient::new(&config)?;
    info!(
        "Using YouTube Data API at {}, writing exports to {}",
        config.api_base_url,
        config.output_dir.display()
    );

    Ok(AppState {
        client,
        output_dir: config.output_dir,
    })
}
