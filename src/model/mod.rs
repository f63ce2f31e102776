//! Model module - Application state and data types
//!
//! - `types`: focus, search outcome and UI state
//! - `content`: albums, artists and the results grid geometry
//! - `catalog`: the catalog trait and its error type
//! - `spotify_client`: rspotify-backed catalog client
//! - `app_model`: shared application model with state transitions

mod types;
mod content;
mod catalog;
mod spotify_client;
mod app_model;

pub use types::{ActiveSection, ScreenLayout, SearchOutcome, StatusLine, UiState};

pub use content::{Album, Artist, ContentState};
#[cfg(test)]
pub use content::GridGeometry;

pub use catalog::{CatalogApi, CatalogError, ALBUM_PAGE_LIMIT};

pub use spotify_client::SpotifyClient;

pub use app_model::{AppModel, HoverChange};
