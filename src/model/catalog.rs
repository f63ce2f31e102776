//! The seam between the search flow and the music catalog

use async_trait::async_trait;
use thiserror::Error;

use super::content::{Album, Artist};

/// Albums requested per artist; the API rejects anything larger
pub const ALBUM_PAGE_LIMIT: u32 = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Token could not be obtained or was rejected
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Network, HTTP status or response decoding failure
    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid id: {0}")]
    InvalidId(String),
}

/// Read-only access to the catalog, authenticated with one client-credentials token
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Run the client-credentials grant and keep the token for later calls
    async fn authenticate(&self) -> Result<(), CatalogError>;

    async fn has_token(&self) -> bool;

    /// First artist matching `name`, if any
    async fn find_artist(&self, name: &str) -> Result<Option<Artist>, CatalogError>;

    /// One page of the artist's albums, in catalog order
    async fn artist_albums(&self, artist_id: &str) -> Result<Vec<Album>, CatalogError>;
}
