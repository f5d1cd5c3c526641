pub mod catalog;
pub mod favorites;
pub mod filter;
pub mod genres;
pub mod search;

pub use catalog::{CatalogClient, TmdbClient};
pub use favorites::FavoritesStore;
pub use filter::filter;
pub use genres::GenreCatalogCache;
pub use search::{SearchController, SearchSnapshot, Transition};
