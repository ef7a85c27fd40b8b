mod books_api;
mod helpers;
mod listing;
mod reviews_api;
