use serde::{Deserialize, Serialize};

use super::movie::Movie;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Top4Set {
    pub id: i32,
    pub user_letterboxd_id: Option<String>,
    /// Display order is preserved
    pub movie_ids: Vec<i32>,
}

impl Top4Set {
    #[must_use]
    pub fn contains(&self, movie_id: i32) -> bool {
        self.movie_ids.contains(&movie_id)
    }
}

/// A set with its movies resolved, as shown to voters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Top4SetView {
    pub id: i32,
    pub movies: Vec<Movie>,
}

impl Top4SetView {
    /// Orders `movies` by the set's display order, silently dropping ids
    /// that did not resolve.
    #[must_use]
    pub fn resolve(set: &Top4Set, movies: &[Movie]) -> Self {
        let movies = set
            .movie_ids
            .iter()
            .filter_map(|id| movies.iter().find(|m| m.id == *id).cloned())
            .collect();

        Self { id: set.id, movies }
    }

    #[must_use]
    pub const fn empty(id: i32) -> Self {
        Self {
            id,
            movies: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            year: 2000 + id,
            director: None,
            poster: None,
            genres: vec![],
        }
    }

    #[test]
    fn resolve_keeps_set_order() {
        let set = Top4Set {
            id: 7,
            user_letterboxd_id: None,
            movie_ids: vec![4, 2, 3, 1],
        };
        let movies = vec![movie(1), movie(2), movie(3), movie(4)];

        let view = Top4SetView::resolve(&set, &movies);
        let ids: Vec<i32> = view.movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn resolve_drops_missing_movies() {
        let set = Top4Set {
            id: 7,
            user_letterboxd_id: None,
            movie_ids: vec![1, 2, 99, 3],
        };
        let movies = vec![movie(1), movie(2), movie(3)];

        let view = Top4SetView::resolve(&set, &movies);
        assert_eq!(view.id, 7);
        assert_eq!(view.movies.len(), 3);
    }
}
