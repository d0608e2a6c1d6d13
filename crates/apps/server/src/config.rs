use std::net::SocketAddr;
use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use serde::Serialize;

/// Server settings, from flags or the environment.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serves the hydrological map dashboard")]
pub struct ServerConfig {
    #[arg(long, env = "HYDRO_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// Built client bundle (wasm, js, css).
    #[arg(long, env = "HYDRO_ASSETS", default_value = "dist")]
    pub assets: PathBuf,

    /// Public Mapbox access token handed to the browser.
    #[arg(long, env = "MAPBOX_TOKEN", value_parser = non_empty)]
    pub mapbox_token: String,

    /// Mapbox style URL with `basemap-*` and `labels-*` layer groups.
    #[arg(long, env = "MAPBOX_STYLE", value_parser = non_empty)]
    pub mapbox_style: String,

    /// Serve a robots.txt that disallows all crawling (staging deployments).
    #[arg(
        long,
        env = "RESTRICTIVE_ROBOTS_TXT",
        action = ArgAction::Set,
        default_value = "false",
        value_parser = BoolishValueParser::new()
    )]
    pub restrictive_robots: bool,
}

fn non_empty(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// The part of the configuration the browser is allowed to see.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub mapbox_token: String,
    pub mapbox_style: String,
}

impl From<&ServerConfig> for ClientConfig {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            mapbox_token: cfg.mapbox_token.clone(),
            mapbox_style: cfg.mapbox_style.clone(),
        }
    }
}
