pub mod voting {
    pub const ANONYMOUS_USERNAME: &str = "anonymous";

    pub const ANONYMOUS_EMAIL: &str = "anonymous@moviemash.local";

    /// Number of movies in every top-4 set.
    pub const SET_SIZE: usize = 4;
}

pub mod comparison {
    pub const DEFAULT_TTL_SECS: u64 = 60 * 60;

    pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;

    pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;
}

pub mod limits {
    pub const DEFAULT_LEADERBOARD_LIMIT: usize = 100;

    pub const MAX_LEADERBOARD_LIMIT: usize = 500;
}

pub mod tmdb {
    use std::time::Duration;

    pub const API_BASE: &str = "https://api.themoviedb.org/3";

    pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    pub const REQUEST_PAUSE: Duration = Duration::from_millis(250);
}
