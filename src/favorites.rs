use crate::models::Movie;

/// Session-scoped favorites list. Ordered by insertion, unique by movie
/// id, never persisted. Mutated from a single context, so no interior
/// locking.
#[derive(Debug, Default)]
pub struct Favorites {
    movies: Vec<Movie>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the movie unless one with the same id is already present.
    /// Returns whether it was inserted.
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.contains(movie.id) {
            return false;
        }
        self.movies.push(movie);
        true
    }

    /// Removes the movie with the given id. Returns whether it was present.
    pub fn remove(&mut self, movie_id: i32) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != movie_id);
        self.movies.len() != before
    }

    /// Flips membership. Returns whether the movie is present afterwards.
    pub fn toggle(&mut self, movie: Movie) -> bool {
        if self.remove(movie.id) {
            false
        } else {
            self.movies.push(movie);
            true
        }
    }

    pub fn contains(&self, movie_id: i32) -> bool {
        self.movies.iter().any(|m| m.id == movie_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
