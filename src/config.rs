//! Runtime configuration
//!
//! Credentials come from command-line flags, the environment (a `.env` file
//! is honoured) or, as a last resort, from values baked in at build time.

use anyhow::{anyhow, Result};
use clap::Parser;

pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1/";
pub const DEFAULT_BACK_TO_TOP_THRESHOLD: u16 = 15;

/// rspotify appends this path to its auth base url when requesting a token
const TOKEN_PATH: &str = "api/token";

const BUILD_CLIENT_ID: Option<&str> = option_env!("SPOTIFY_CLIENT_ID");
const BUILD_CLIENT_SECRET: Option<&str> = option_env!("SPOTIFY_CLIENT_SECRET");

#[derive(Parser, Debug)]
#[command(name = "discography")]
#[command(about = "Search an artist and browse their albums in the terminal")]
#[command(version)]
pub struct Args {
    /// Spotify application client id
    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Spotify application client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Client-credentials token endpoint
    #[arg(long, env = "SPOTIFY_TOKEN_ENDPOINT", default_value = DEFAULT_TOKEN_ENDPOINT)]
    pub token_endpoint: String,

    /// Base url of the Web API
    #[arg(long, env = "SPOTIFY_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Scroll offset, in lines, past which the back-to-top button appears
    #[arg(long, default_value_t = DEFAULT_BACK_TO_TOP_THRESHOLD)]
    pub back_to_top_threshold: u16,
}

/// Everything the token provider and the catalog client need
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_endpoint: String,
    pub api_base_url: String,
}

impl CatalogConfig {
    /// The auth base url rspotify expects, derived from the token endpoint
    pub fn auth_base_url(&self) -> Result<String> {
        let base = self
            .token_endpoint
            .strip_suffix(TOKEN_PATH)
            .ok_or_else(|| anyhow!("token endpoint must end with '{}': {}", TOKEN_PATH, self.token_endpoint))?;
        if base.is_empty() {
            return Err(anyhow!("token endpoint has no host: {}", self.token_endpoint));
        }
        Ok(base.to_string())
    }

    /// rspotify joins paths onto the base url, so it needs a trailing slash
    pub fn api_base_url(&self) -> String {
        if self.api_base_url.ends_with('/') {
            self.api_base_url.clone()
        } else {
            format!("{}/", self.api_base_url)
        }
    }
}

/// Settings for the terminal front end
#[derive(Clone, Copy, Debug)]
pub struct UiConfig {
    pub back_to_top_threshold: u16,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded environment file");
        }
        Self::from_args(Args::parse(), BUILD_CLIENT_ID, BUILD_CLIENT_SECRET)
    }

    fn from_args(args: Args, build_id: Option<&str>, build_secret: Option<&str>) -> Result<Self> {
        let client_id = resolve(args.client_id, build_id)
            .ok_or_else(|| anyhow!("missing client id (set SPOTIFY_CLIENT_ID or pass --client-id)"))?;
        let client_secret = resolve(args.client_secret, build_secret)
            .ok_or_else(|| anyhow!("missing client secret (set SPOTIFY_CLIENT_SECRET or pass --client-secret)"))?;

        let catalog = CatalogConfig {
            client_id,
            client_secret,
            token_endpoint: args.token_endpoint,
            api_base_url: args.api_base_url,
        };
        // Fail at startup rather than on the first search
        catalog.auth_base_url()?;

        Ok(Self {
            catalog,
            ui: UiConfig {
                back_to_top_threshold: args.back_to_top_threshold,
            },
        })
    }
}

fn resolve(runtime: Option<String>, build_time: Option<&str>) -> Option<String> {
    runtime
        .or_else(|| build_time.map(str::to_string))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
