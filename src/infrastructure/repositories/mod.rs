pub mod auth;
pub mod books;
pub(crate) mod macros;
pub mod memory;

pub use auth::{tokens::SqlTokenRepository, users::SqlUserRepository};
pub use books::{books::SqlBookRepository, reviews::SqlReviewRepository};
pub use memory::InMemoryStore;
