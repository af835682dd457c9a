pub use super::comparisons::Entity as Comparisons;
pub use super::movies::Entity as Movies;
pub use super::top4_sets::Entity as Top4Sets;
pub use super::users::Entity as Users;
pub use super::votes::Entity as Votes;
