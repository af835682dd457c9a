//! Demo catalogue provisioning for fresh installs.

use crate::constants::voting::SET_SIZE;
use crate::db::Store;
use crate::models::movie::NewMovie;
use crate::services::comparison_service::ComparisonService;
use anyhow::Result;
use rand::seq::IndexedRandom;
use tracing::{info, warn};

const CATALOGUE: &[(&str, i32, &str, &[&str])] = &[
    ("The Shawshank Redemption", 1994, "Frank Darabont", &["Drama"]),
    ("The Godfather", 1972, "Francis Ford Coppola", &["Crime", "Drama"]),
    ("Pulp Fiction", 1994, "Quentin Tarantino", &["Crime", "Drama"]),
    ("The Dark Knight", 2008, "Christopher Nolan", &["Action", "Crime", "Drama"]),
    ("Fight Club", 1999, "David Fincher", &["Drama"]),
    ("Inception", 2010, "Christopher Nolan", &["Action", "Sci-Fi", "Thriller"]),
    ("Goodfellas", 1990, "Martin Scorsese", &["Biography", "Crime", "Drama"]),
    ("The Matrix", 1999, "Lana Wachowski, Lilly Wachowski", &["Action", "Sci-Fi"]),
    ("Interstellar", 2014, "Christopher Nolan", &["Adventure", "Drama", "Sci-Fi"]),
    ("Parasite", 2019, "Bong Joon-ho", &["Comedy", "Drama", "Thriller"]),
    ("Whiplash", 2014, "Damien Chazelle", &["Drama", "Music"]),
    ("Mad Max: Fury Road", 2015, "George Miller", &["Action", "Adventure", "Sci-Fi"]),
    ("The Grand Budapest Hotel", 2014, "Wes Anderson", &["Adventure", "Comedy", "Drama"]),
    ("Her", 2013, "Spike Jonze", &["Drama", "Romance", "Sci-Fi"]),
    ("La La Land", 2016, "Damien Chazelle", &["Comedy", "Drama", "Music"]),
    ("Get Out", 2017, "Jordan Peele", &["Horror", "Mystery", "Thriller"]),
    ("Moonlight", 2016, "Barry Jenkins", &["Drama"]),
    ("The Social Network", 2010, "David Fincher", &["Biography", "Drama"]),
    ("No Country for Old Men", 2007, "Joel Coen, Ethan Coen", &["Crime", "Drama", "Thriller"]),
    ("There Will Be Blood", 2007, "Paul Thomas Anderson", &["Drama"]),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub movies: usize,
    pub sets: usize,
    pub comparisons: usize,
}

/// `film/<slug>-<year>`, the shape Letterboxd uses for film pages.
#[must_use]
pub fn letterboxd_id(title: &str, year: i32) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    format!("film/{slug}-{year}")
}

#[must_use]
pub fn builtin_movies() -> Vec<NewMovie> {
    CATALOGUE
        .iter()
        .map(|(title, year, director, genres)| NewMovie {
            title: (*title).to_string(),
            year: *year,
            director: Some((*director).to_string()),
            genres: genres.iter().map(|g| (*g).to_string()).collect(),
            letterboxd_id: letterboxd_id(title, *year),
        })
        .collect()
}

/// Upserts the built-in catalogue, then adds `sets` random top-4 sets and
/// `comparisons` fresh comparisons.
pub async fn seed(
    store: &Store,
    comparisons: &dyn ComparisonService,
    sets: usize,
    comparison_count: usize,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();
    let mut movie_ids = Vec::with_capacity(CATALOGUE.len());

    for movie in builtin_movies() {
        match store.upsert_movie(&movie).await {
            Ok(id) => {
                movie_ids.push(id);
                report.movies += 1;
            }
            Err(e) => warn!(title = %movie.title, error = %e, "Failed to upsert movie"),
        }
    }

    if movie_ids.len() < SET_SIZE {
        anyhow::bail!(
            "Need at least {SET_SIZE} movies to build sets, have {}",
            movie_ids.len()
        );
    }

    for n in 0..sets {
        let picked: Vec<i32> = {
            let mut rng = rand::rng();
            movie_ids
                .choose_multiple(&mut rng, SET_SIZE)
                .copied()
                .collect()
        };
        let owner = format!("user{}", n + 1);
        store.add_top4_set(Some(owner.as_str()), &picked).await?;
        report.sets += 1;
    }

    for _ in 0..comparison_count {
        comparisons.create_comparison().await?;
        report.comparisons += 1;
    }

    info!(
        event = "catalog_seeded",
        movies = report.movies,
        sets = report.sets,
        comparisons = report.comparisons,
        "Seed finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_letterboxd_id() {
        assert_eq!(letterboxd_id("Mad Max: Fury Road", 2015), "film/mad-max-fury-road-2015");
        assert_eq!(letterboxd_id("Her", 2013), "film/her-2013");
    }

    #[test]
    fn builtin_catalogue_has_unique_keys() {
        let movies = builtin_movies();
        assert_eq!(movies.len(), 20);
        let keys: HashSet<_> = movies.iter().map(|m| m.letterboxd_id.clone()).collect();
        assert_eq!(keys.len(), movies.len());
    }
}
