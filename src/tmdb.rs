use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::env;
use thiserror::Error;
use tracing::debug;

use crate::models::{CatalogResponse, Movie, Trailer, TrailerResponse};

const TMDB_BASE: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} -> {status}")]
    Status { status: StatusCode, url: String },
    #[error("movie not found")]
    NotFound,
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("movie id must not be blank")]
    BlankMovieId,
}

/// Typed facade over the TMDB catalog endpoints. The store is written
/// against this trait so tests can substitute a fake.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_popular(&self) -> Result<CatalogResponse, CatalogError>;
    async fn fetch_top_rated(&self) -> Result<CatalogResponse, CatalogError>;
    async fn fetch_upcoming(&self) -> Result<CatalogResponse, CatalogError>;
    async fn fetch_now_playing(&self) -> Result<CatalogResponse, CatalogError>;
    async fn fetch_details(&self, movie_id: &str) -> Result<Movie, CatalogError>;
    async fn fetch_trailers(&self, movie_id: &str) -> Result<Vec<Trailer>, CatalogError>;
    async fn search(&self, query: &str) -> Result<CatalogResponse, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        let base_url = env::var("TMDB_BASE_URL").unwrap_or_else(|_| TMDB_BASE.to_string());
        Ok(Self::new(base_url, api_key))
    }

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Single injection point for the API key: every request goes through
    /// here, and `api_key` is attached exactly once. Callers pass only
    /// their operation-specific parameters.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);
        let res = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;
        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        if !status.is_success() {
            return Err(CatalogError::Status { status, url });
        }
        let text = res.text().await?;
        let parsed = serde_json::from_str(&text)?;
        Ok(parsed)
    }
}

fn require_movie_id(movie_id: &str) -> Result<&str, CatalogError> {
    let trimmed = movie_id.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::BlankMovieId);
    }
    Ok(trimmed)
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn fetch_popular(&self) -> Result<CatalogResponse, CatalogError> {
        self.get_json("movie/popular", &[]).await
    }

    async fn fetch_top_rated(&self) -> Result<CatalogResponse, CatalogError> {
        self.get_json("movie/top_rated", &[]).await
    }

    async fn fetch_upcoming(&self) -> Result<CatalogResponse, CatalogError> {
        self.get_json("movie/upcoming", &[]).await
    }

    async fn fetch_now_playing(&self) -> Result<CatalogResponse, CatalogError> {
        self.get_json("movie/now_playing", &[]).await
    }

    async fn fetch_details(&self, movie_id: &str) -> Result<Movie, CatalogError> {
        let id = require_movie_id(movie_id)?;
        self.get_json(&format!("movie/{id}"), &[]).await
    }

    async fn fetch_trailers(&self, movie_id: &str) -> Result<Vec<Trailer>, CatalogError> {
        let id = require_movie_id(movie_id)?;
        let data: TrailerResponse = self.get_json(&format!("movie/{id}/videos"), &[]).await?;
        Ok(data.results)
    }

    async fn search(&self, query: &str) -> Result<CatalogResponse, CatalogError> {
        // Empty query is a policy short-circuit, not an error: no request
        // leaves the process.
        if query.is_empty() {
            return Ok(CatalogResponse::default());
        }
        self.get_json("search/movie", &[("query", query)]).await
    }
}
