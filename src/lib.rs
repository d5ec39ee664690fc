//! TMDB movie-catalog client: a typed endpoint facade, an observable
//! per-category state store, and a session-scoped favorites list.

pub mod favorites;
pub mod models;
pub mod store;
pub mod tmdb;
