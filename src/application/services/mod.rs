mod accounts;
mod books;
mod detail;
mod listing;
mod ratings;
mod reviews;

pub use accounts::AccountService;
pub use books::BookService;
pub use detail::BookDetailService;
pub use listing::BookListingService;
pub use ratings::RatingAggregator;
pub use reviews::ReviewService;
