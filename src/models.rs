use serde::{Deserialize, Serialize};

const POSTER_BASE: &str = "https://image.tmdb.org/t/p";
const POSTER_SIZE: &str = "w500";
const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

/// One movie record as returned by TMDB. Two movies are equal when their
/// ids are equal, regardless of the rest of the payload; favorites and
/// search-result replacement both rely on this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl Movie {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_deref().map(poster_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trailer {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

/// Paged envelope for list endpoints. Only `results` is consumed; paging
/// metadata is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub results: Vec<Movie>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrailerResponse {
    #[serde(default)]
    pub results: Vec<Trailer>,
}

/// Display URL for a poster path fragment (`/abc.jpg` -> host + size + path).
pub fn poster_url(path: &str) -> String {
    format!("{POSTER_BASE}/{POSTER_SIZE}{path}")
}

/// Inverse of [`poster_url`]. Returns `None` for URLs not produced by it.
pub fn poster_path_from_url(url: &str) -> Option<&str> {
    url.strip_prefix(POSTER_BASE)?
        .strip_prefix('/')?
        .strip_prefix(POSTER_SIZE)
}

/// Prefer an official entry of kind "Trailer", otherwise fall back to the
/// first entry. An empty list selects nothing, so no playback is offered.
pub fn select_trailer(trailers: &[Trailer]) -> Option<&Trailer> {
    trailers
        .iter()
        .find(|t| t.kind == "Trailer" && t.official)
        .or_else(|| trailers.first())
}

pub fn watch_url(key: &str) -> String {
    format!("{WATCH_BASE}{key}")
}
