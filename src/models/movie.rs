use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub director: Option<String>,
    pub poster: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Input for provisioning a movie; `letterboxd_id` is the upsert key.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: Option<String>,
    pub genres: Vec<String>,
    pub letterboxd_id: String,
}
