use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::{CatalogResponse, Movie, Trailer};
use crate::tmdb::{CatalogApi, CatalogError};

/// Lifecycle of one category slot. `Failed` is published instead of
/// dropping the error on the floor, so consumers can tell "no data yet"
/// from "fetch failed".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
    Ready(Vec<Movie>),
    Failed(String),
}

/// Holds the latest fetched list for each category plus search results.
/// Each refresh replaces its slot wholesale; overlapping refreshes of the
/// same slot are last-write-wins, with no cancellation or coalescing.
pub struct CatalogStore {
    api: Arc<dyn CatalogApi>,
    popular: watch::Sender<FetchState>,
    top_rated: watch::Sender<FetchState>,
    upcoming: watch::Sender<FetchState>,
    now_playing: watch::Sender<FetchState>,
    search_results: watch::Sender<FetchState>,
}

fn slot() -> watch::Sender<FetchState> {
    watch::channel(FetchState::Idle).0
}

impl CatalogStore {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            popular: slot(),
            top_rated: slot(),
            upcoming: slot(),
            now_playing: slot(),
            search_results: slot(),
        }
    }

    pub async fn refresh_popular(&self) {
        Self::publish(&self.popular, "popular", self.api.fetch_popular()).await;
    }

    pub async fn refresh_top_rated(&self) {
        Self::publish(&self.top_rated, "top_rated", self.api.fetch_top_rated()).await;
    }

    pub async fn refresh_upcoming(&self) {
        Self::publish(&self.upcoming, "upcoming", self.api.fetch_upcoming()).await;
    }

    pub async fn refresh_now_playing(&self) {
        Self::publish(&self.now_playing, "now_playing", self.api.fetch_now_playing()).await;
    }

    /// Refresh all four home categories concurrently. Completions are
    /// unordered; each writes only to its own slot.
    pub async fn refresh_all(&self) {
        tokio::join!(
            self.refresh_popular(),
            self.refresh_top_rated(),
            self.refresh_upcoming(),
            self.refresh_now_playing(),
        );
    }

    /// An empty query clears the search slot locally; no request is made.
    pub async fn search(&self, query: &str) {
        if query.is_empty() {
            self.search_results.send_replace(FetchState::Ready(Vec::new()));
            return;
        }
        Self::publish(&self.search_results, "search", self.api.search(query)).await;
    }

    pub async fn movie_details(&self, movie_id: &str) -> Result<Movie, CatalogError> {
        self.api.fetch_details(movie_id).await
    }

    pub async fn movie_trailers(&self, movie_id: &str) -> Result<Vec<Trailer>, CatalogError> {
        self.api.fetch_trailers(movie_id).await
    }

    async fn publish<F>(slot: &watch::Sender<FetchState>, label: &str, fetch: F)
    where
        F: Future<Output = Result<CatalogResponse, CatalogError>>,
    {
        slot.send_replace(FetchState::Loading);
        match fetch.await {
            Ok(response) => {
                info!("{} refresh: {} movies", label, response.results.len());
                slot.send_replace(FetchState::Ready(response.results));
            }
            Err(e) => {
                warn!("{} refresh failed: {}", label, e);
                slot.send_replace(FetchState::Failed(e.to_string()));
            }
        }
    }

    pub fn subscribe_popular(&self) -> watch::Receiver<FetchState> {
        self.popular.subscribe()
    }

    pub fn subscribe_top_rated(&self) -> watch::Receiver<FetchState> {
        self.top_rated.subscribe()
    }

    pub fn subscribe_upcoming(&self) -> watch::Receiver<FetchState> {
        self.upcoming.subscribe()
    }

    pub fn subscribe_now_playing(&self) -> watch::Receiver<FetchState> {
        self.now_playing.subscribe()
    }

    pub fn subscribe_search(&self) -> watch::Receiver<FetchState> {
        self.search_results.subscribe()
    }

    pub fn popular(&self) -> FetchState {
        self.popular.borrow().clone()
    }

    pub fn top_rated(&self) -> FetchState {
        self.top_rated.borrow().clone()
    }

    pub fn upcoming(&self) -> FetchState {
        self.upcoming.borrow().clone()
    }

    pub fn now_playing(&self) -> FetchState {
        self.now_playing.borrow().clone()
    }

    pub fn search_results(&self) -> FetchState {
        self.search_results.borrow().clone()
    }
}
