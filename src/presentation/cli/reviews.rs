use anyhow::Result;
use clap::{Args, Subcommand};

use super::macros::define_delete_command;
use super::print_json;
use crate::domain::ids::{BookId, ReviewId};
use crate::domain::reviews::{ReviewChanges, ReviewDraft};
use crate::infrastructure::client::BookReviewClient;

#[derive(Debug, Subcommand)]
pub enum ReviewCommands {
    /// Review a book (once per book)
    Add(AddReviewCommand),
    /// Update one of your reviews
    Update(UpdateReviewCommand),
    /// Delete one of your reviews
    Delete(DeleteReviewCommand),
}

pub async fn run(client: &BookReviewClient, cmd: ReviewCommands) -> Result<()> {
    match cmd {
        ReviewCommands::Add(c) => add_review(client, c).await,
        ReviewCommands::Update(c) => update_review(client, c).await,
        ReviewCommands::Delete(c) => delete_review(client, c).await,
    }
}

#[derive(Debug, Args)]
pub struct AddReviewCommand {
    #[arg(long)]
    pub book_id: i64,
    /// Score from 1 to 5
    #[arg(long)]
    pub rating: i64,
    #[arg(long)]
    pub text: String,
}

pub async fn add_review(client: &BookReviewClient, command: AddReviewCommand) -> Result<()> {
    let payload = ReviewDraft {
        book_id: Some(BookId::new(command.book_id)),
        rating: Some(command.rating),
        review_text: Some(command.text),
    };

    let review = client.reviews().create(&payload).await?;
    print_json(&review)
}

#[derive(Debug, Args)]
pub struct UpdateReviewCommand {
    #[arg(long)]
    pub id: i64,
    #[arg(long)]
    pub rating: Option<i64>,
    #[arg(long)]
    pub text: Option<String>,
}

pub async fn update_review(client: &BookReviewClient, command: UpdateReviewCommand) -> Result<()> {
    let payload = ReviewChanges {
        rating: command.rating,
        review_text: command.text,
    };

    let review = client
        .reviews()
        .update(ReviewId::new(command.id), &payload)
        .await?;
    print_json(&review)
}

define_delete_command!(DeleteReviewCommand, delete_review, ReviewId, reviews, "review");
