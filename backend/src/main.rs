#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use crate::config::AppConfig;
use crate::services::youtube_client::YoutubeClient;
use rocket::{Build, Rocket};
use std::path::PathBuf;

pub struct AppState {
    pub client: YoutubeClient,
    pub output_dir: PathBuf,
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/", routes![api::index, api::submit])
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    config::load_environment();
    config::init_logger();

    let config = AppConfig::from_env()?;
    let state = config::create_app_state(config)?;

    build_rocket(state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed to launch: {e}"))?;

    Ok(())
}
