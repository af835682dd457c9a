pub mod prelude;

pub mod comparisons;
pub mod movies;
pub mod top4_sets;
pub mod users;
pub mod votes;
