use anyhow::Result;

use super::BookReviewClient;
use super::define_client_mutations;
use crate::domain::book_items::{Book, BookChanges, BookDetail, BookDraft, BookPage};
use crate::domain::ids::BookId;

pub struct BooksClient<'a> {
    client: &'a BookReviewClient,
}

impl<'a> BooksClient<'a> {
    pub fn new(client: &'a BookReviewClient) -> Self {
        Self { client }
    }

    define_client_mutations!(
        entity_path: "api/books",
        id_type: BookId,
        entity_type: Book,
        new_type: BookDraft,
        update_type: BookChanges
    );

    pub async fn list(&self, page: Option<u32>) -> Result<BookPage> {
        let mut url = self.client.endpoint("api/books")?;
        if let Some(page) = page {
            url.query_pairs_mut()
                .append_pair("pageNumber", &page.to_string());
        }
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }

    pub async fn get(&self, id: BookId) -> Result<BookDetail> {
        let url = self.client.endpoint(&format!("api/books/{id}"))?;
        let response = self
            .client
            .request(reqwest::Method::GET, url)
            .send()
            .await?;
        self.client.handle_response(response).await
    }
}
