use super::BookReviewClient;
use super::define_client_mutations;
use crate::domain::ids::ReviewId;
use crate::domain::reviews::{Review, ReviewChanges, ReviewDraft};

pub struct ReviewsClient<'a> {
    client: &'a BookReviewClient,
}

impl<'a> ReviewsClient<'a> {
    pub fn new(client: &'a BookReviewClient) -> Self {
        Self { client }
    }

    define_client_mutations!(
        entity_path: "api/reviews",
        id_type: ReviewId,
        entity_type: Review,
        new_type: ReviewDraft,
        update_type: ReviewChanges
    );
}
