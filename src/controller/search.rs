//! Search-and-fetch workflow: artist lookup followed by album listing

use crate::model::{Album, Artist, CatalogError, SearchOutcome, StatusLine, ALBUM_PAGE_LIMIT};
use tokio::task::JoinHandle;

use super::AppController;

impl AppController {
    /// Request the session token; a failure is reported but not fatal
    pub async fn authenticate(&self) {
        match self.catalog.authenticate().await {
            Ok(()) => tracing::info!("Catalog token acquired"),
            Err(e) => {
                tracing::error!(error = %e, "Token request failed, searches will retry");
                self.model
                    .set_error(format!("Could not sign in to Spotify: {}", Self::format_error(&e)))
                    .await;
            }
        }
    }

    pub async fn set_query(&self, text: impl Into<String>) {
        self.model.update_search_query(text.into()).await;
    }

    /// Take the query and its sequence number now, then search in the background
    /// so input stays responsive
    pub async fn spawn_submit(&self) -> Option<JoinHandle<SearchOutcome>> {
        let (query, seq) = self.begin_submit().await?;
        let controller = self.clone();
        Some(tokio::spawn(async move { controller.run_search(query, seq).await }))
    }

    /// Search for the pending query and replace the result set.
    ///
    /// Only the most recently submitted search may touch the model; older
    /// responses come back as `Superseded`.
    pub async fn submit(&self) -> SearchOutcome {
        match self.begin_submit().await {
            Some((query, seq)) => self.run_search(query, seq).await,
            None => SearchOutcome::EmptyQuery,
        }
    }

    /// Trim the pending query and claim a sequence number for it.
    /// An empty query is answered here and never reaches the catalog.
    async fn begin_submit(&self) -> Option<(String, u64)> {
        let query = self.model.search_query().await.trim().to_string();
        if query.is_empty() {
            tracing::debug!("Empty search submitted");
            self.model.set_status(StatusLine::Outcome(SearchOutcome::EmptyQuery)).await;
            self.animator.failure();
            return None;
        }

        let seq = self.model.begin_search(&query).await;
        Some((query, seq))
    }

    async fn run_search(&self, query: String, seq: u64) -> SearchOutcome {
        tracing::debug!(query = %query, seq, "Performing search");

        let (outcome, replacement) = match self.lookup(&query).await {
            Ok(None) => {
                tracing::info!(query = %query, "No artist found");
                (SearchOutcome::ArtistNotFound { query: query.clone() }, None)
            }
            Ok(Some((artist, albums))) => {
                tracing::info!(query = %query, artist = %artist.name, albums = albums.len(), "Search completed successfully");
                let outcome = if albums.is_empty() {
                    SearchOutcome::NoAlbums {
                        artist: artist.name.clone(),
                    }
                } else {
                    SearchOutcome::Populated {
                        artist: artist.name.clone(),
                        count: albums.len(),
                    }
                };
                (outcome, Some((artist, albums)))
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Search failed");
                (
                    SearchOutcome::Failed {
                        reason: Self::format_error(&e),
                    },
                    None,
                )
            }
        };

        let Some(applied) = self.model.apply_search(seq, outcome.clone(), replacement).await else {
            tracing::debug!(query = %query, seq, "Discarding response of superseded search");
            return SearchOutcome::Superseded;
        };

        if let Some(previous) = applied.previous_hover {
            self.animator.hover_leave(previous);
        }
        if outcome.is_failure() {
            self.animator.failure();
        }
        match &outcome {
            SearchOutcome::Populated { count, .. } if applied.was_empty => self.animator.entrance(*count),
            SearchOutcome::NoAlbums { .. } if !applied.was_empty => self.animator.draw_logo(),
            _ => {}
        }
        self.sync_scroll().await;

        outcome
    }

    async fn lookup(&self, query: &str) -> Result<Option<(Artist, Vec<Album>)>, CatalogError> {
        self.ensure_token().await?;

        let Some(artist) = self.catalog.find_artist(query).await? else {
            return Ok(None);
        };

        let mut albums = self.catalog.artist_albums(&artist.id).await?;
        albums.truncate(ALBUM_PAGE_LIMIT as usize);
        Ok(Some((artist, albums)))
    }

    async fn ensure_token(&self) -> Result<(), CatalogError> {
        if self.catalog.has_token().await {
            return Ok(());
        }
        tracing::info!("No valid catalog token, requesting one");
        self.catalog.authenticate().await
    }
}
