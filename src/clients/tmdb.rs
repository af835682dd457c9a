use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::TmdbConfig;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("MovieMash/1.0")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build TMDB HTTP client: {e}"))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, title: &str, year: i32) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search/movie", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("query", title)
            .append_pair("year", &year.to_string());
        Ok(url)
    }

    /// Best match for a title released in `year`.
    pub async fn search_movie(&self, title: &str, year: i32) -> Result<Option<SearchResult>> {
        let url = self.search_url(title, year)?;

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        let search: SearchResponse = response.json().await?;
        debug!(title, hits = search.results.len(), "TMDB search finished");

        Ok(search.results.into_iter().next())
    }

    /// Absolute poster URL for a TMDB `poster_path`.
    #[must_use]
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url() {
        let config = TmdbConfig {
            image_base_url: "https://image.tmdb.org/t/p/w500/".to_string(),
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new(&config, "key".to_string()).unwrap();
        assert_eq!(
            client.poster_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let config = TmdbConfig {
            base_url: "https://api.themoviedb.org/3/".to_string(),
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new(&config, "secret".to_string()).unwrap();

        let url = client.search_url("Mad Max: Fury Road", 2015).unwrap();
        assert_eq!(url.path(), "/3/search/movie");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("api_key".to_string(), "secret".to_string()),
                ("query".to_string(), "Mad Max: Fury Road".to_string()),
                ("year".to_string(), "2015".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_response_parses_partial_results() {
        let json = r#"{"page":1,"results":[{"id":603,"title":"The Matrix","release_date":"1999-03-30","poster_path":"/m.jpg"},{"id":1,"title":"Other"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].poster_path.as_deref(), Some("/m.jpg"));
        assert!(parsed.results[1].poster_path.is_none());
    }
}
