pub mod books;
pub mod reviews;
