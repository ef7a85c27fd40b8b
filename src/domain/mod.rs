pub mod auth;
pub mod books;
pub mod errors;
pub mod ids;
pub mod listing;
pub mod ownership;
pub mod ratings;
pub mod repositories;

// Re-exports
pub use auth::{tokens, users};
pub use books::books as book_items;
pub use books::reviews;
pub use errors::RepositoryError;
