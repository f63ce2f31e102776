//! Client-credentials session setup
//!
//! The app never acts on behalf of a user, so there is no browser flow and
//! nothing is cached on disk: one token is requested at startup and rspotify
//! refreshes it when it runs out.

use std::sync::Arc;
use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::config::CatalogConfig;
use crate::model::SpotifyClient;

pub fn build_catalog(config: &CatalogConfig) -> Result<Arc<SpotifyClient>> {
    let client = SpotifyClient::new(config)?;
    tracing::info!(token_endpoint = %config.token_endpoint, "Client-credentials session configured");
    Ok(Arc::new(client))
}

/// Log how long the current token stays valid
pub async fn report_token_expiry(client: &SpotifyClient) {
    match client.token_expires_at().await {
        Some(expires_at) => {
            tracing::info!(
                expires_at = %expires_at.to_rfc3339(),
                "Catalog token valid for {}",
                describe_remaining(expires_at, Utc::now())
            );
        }
        None => tracing::debug!("No catalog token held"),
    }
}

fn describe_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = expires_at - now;
    if remaining <= chrono::Duration::zero() {
        "0 minutes (expired)".to_string()
    } else {
        format!("{} minutes", remaining.num_minutes())
    }
}
