//! Spotify Web API client for artist and album lookups

use std::sync::Arc;
use anyhow::Result;
use async_trait::async_trait;
use rspotify::{
    model::{AlbumType, ArtistId, Country, FullArtist, Market, SearchResult, SearchType, SimplifiedAlbum},
    http::HttpError,
    prelude::*,
    ClientCredsSpotify, ClientError, Config, Credentials,
};

use crate::config::CatalogConfig;
use crate::{log_api_request, log_api_result};
use super::catalog::{CatalogApi, CatalogError, ALBUM_PAGE_LIMIT};
use super::content::{Album, Artist};

/// Albums are listed for a single fixed market
const ALBUM_MARKET: Market = Market::Country(Country::UnitedStates);

/// Catalog client authenticated with the client-credentials grant
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<ClientCredsSpotify>,
}

impl SpotifyClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let credentials = Credentials::new(&config.client_id, &config.client_secret);
        let client = ClientCredsSpotify::with_config(
            credentials,
            Config {
                api_base_url: config.api_base_url(),
                auth_base_url: config.auth_base_url()?,
                token_cached: false,
                token_refreshing: true,
                ..Default::default()
            },
        );

        tracing::debug!(api = %config.api_base_url, token_endpoint = %config.token_endpoint, "Catalog client configured");
        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub async fn token_expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let guard = self.client.token.lock().await.ok()?;
        guard.as_ref().and_then(|token| token.expires_at)
    }
}

#[async_trait]
impl CatalogApi for SpotifyClient {
    async fn authenticate(&self) -> Result<(), CatalogError> {
        log_api_request!("request_token", grant = "client_credentials");
        let result = self.client.request_token().await;
        log_api_result!("request_token", result);
        result.map_err(|e| CatalogError::Auth(e.to_string()))
    }

    async fn has_token(&self) -> bool {
        match self.client.token.lock().await {
            Ok(guard) => guard.as_ref().is_some_and(|token| !token.is_expired()),
            Err(_) => false,
        }
    }

    async fn find_artist(&self, name: &str) -> Result<Option<Artist>, CatalogError> {
        log_api_request!("search_artist", query = name);
        let result = self
            .client
            .search(name, SearchType::Artist, None, None, Some(1), None)
            .await;
        log_api_result!("search_artist", result);

        match result.map_err(classify)? {
            SearchResult::Artists(page) => Ok(page.items.into_iter().next().map(artist_from)),
            _ => Err(CatalogError::Transport("search returned a non-artist result".to_string())),
        }
    }

    async fn artist_albums(&self, artist_id: &str) -> Result<Vec<Album>, CatalogError> {
        let id = ArtistId::from_id(artist_id).map_err(|e| CatalogError::InvalidId(e.to_string()))?;

        log_api_request!("artist_albums", artist_id, limit = ALBUM_PAGE_LIMIT);
        let result = self
            .client
            .artist_albums_manual(id, [AlbumType::Album], Some(ALBUM_MARKET), Some(ALBUM_PAGE_LIMIT), None)
            .await;
        log_api_result!("artist_albums", result);

        let page = result.map_err(classify)?;
        Ok(page.items.into_iter().map(album_from).collect())
    }
}

/// Only an HTTP 401 from the Web API means the token was refused
fn classify(error: ClientError) -> CatalogError {
    let status = match &error {
        ClientError::Http(http) => match http.as_ref() {
            HttpError::StatusCode(response) => Some(response.status().as_u16()),
            HttpError::Client(_) => None,
        },
        _ => None,
    };
    classify_status(status, error.to_string())
}

fn classify_status(status: Option<u16>, message: String) -> CatalogError {
    match status {
        Some(401) => CatalogError::Auth(message),
        _ => CatalogError::Transport(message),
    }
}

fn artist_from(artist: FullArtist) -> Artist {
    Artist {
        id: artist.id.id().to_string(),
        name: artist.name,
        genres: artist.genres,
        followers: artist.followers.total,
    }
}

fn album_from(album: SimplifiedAlbum) -> Album {
    Album {
        id: album.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default(),
        image_url: album.images.first().map(|image| image.url.clone()),
        external_url: album.external_urls.get("spotify").cloned(),
        release_date: album.release_date.unwrap_or_default(),
        name: album.name,
    }
}
