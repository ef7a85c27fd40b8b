use anyhow::Result;
use clap::{Args, Subcommand};

use super::macros::define_delete_command;
use super::print_json;
use crate::domain::book_items::{BookChanges, BookDraft};
use crate::domain::ids::BookId;
use crate::infrastructure::client::BookReviewClient;

#[derive(Debug, Subcommand)]
pub enum BookCommands {
    /// Add a new book
    Add(AddBookCommand),
    /// List one page of books with their ratings
    List(ListBooksCommand),
    /// Show a book with its reviews
    Get(GetBookCommand),
    /// Update a book you added
    Update(UpdateBookCommand),
    /// Delete a book you added, along with its reviews
    Delete(DeleteBookCommand),
}

pub async fn run(client: &BookReviewClient, cmd: BookCommands) -> Result<()> {
    match cmd {
        BookCommands::Add(c) => add_book(client, c).await,
        BookCommands::List(c) => list_books(client, c).await,
        BookCommands::Get(c) => get_book(client, c).await,
        BookCommands::Update(c) => update_book(client, c).await,
        BookCommands::Delete(c) => delete_book(client, c).await,
    }
}

#[derive(Debug, Args)]
pub struct AddBookCommand {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub genre: String,
    #[arg(long)]
    pub published_year: i32,
}

pub async fn add_book(client: &BookReviewClient, command: AddBookCommand) -> Result<()> {
    let payload = BookDraft {
        title: Some(command.title),
        author: Some(command.author),
        description: Some(command.description),
        genre: Some(command.genre),
        published_year: Some(command.published_year),
    };

    let book = client.books().create(&payload).await?;
    print_json(&book)
}

#[derive(Debug, Args)]
pub struct ListBooksCommand {
    /// Page to fetch, starting at 1
    #[arg(long)]
    pub page: Option<u32>,
}

pub async fn list_books(client: &BookReviewClient, command: ListBooksCommand) -> Result<()> {
    let page = client.books().list(command.page).await?;
    print_json(&page)
}

#[derive(Debug, Args)]
pub struct GetBookCommand {
    #[arg(long)]
    pub id: i64,
}

pub async fn get_book(client: &BookReviewClient, command: GetBookCommand) -> Result<()> {
    let detail = client.books().get(BookId::new(command.id)).await?;
    print_json(&detail)
}

/// Omitted flags leave the stored value unchanged.
#[derive(Debug, Args)]
pub struct UpdateBookCommand {
    #[arg(long)]
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub published_year: Option<i32>,
}

pub async fn update_book(client: &BookReviewClient, command: UpdateBookCommand) -> Result<()> {
    let payload = BookChanges {
        title: command.title,
        author: command.author,
        description: command.description,
        genre: command.genre,
        published_year: command.published_year,
    };

    let book = client
        .books()
        .update(BookId::new(command.id), &payload)
        .await?;
    print_json(&book)
}

define_delete_command!(DeleteBookCommand, delete_book, BookId, books, "book");
