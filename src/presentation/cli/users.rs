use anyhow::Result;
use clap::{Args, Subcommand};

use super::print_json;
use crate::domain::users::NewUser;
use crate::infrastructure::client::BookReviewClient;

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Create an account and print its API token
    Register(RegisterCommand),
    /// Show the account that owns the configured API token
    Me,
}

pub async fn run(client: &BookReviewClient, cmd: UserCommands) -> Result<()> {
    match cmd {
        UserCommands::Register(c) => register(client, c).await,
        UserCommands::Me => {
            let user = client.users().me().await?;
            print_json(&user)
        }
    }
}

#[derive(Debug, Args)]
pub struct RegisterCommand {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
}

pub async fn register(client: &BookReviewClient, command: RegisterCommand) -> Result<()> {
    let registration = client
        .users()
        .register(&NewUser::new(command.name, command.email))
        .await?;
    print_json(&registration)?;
    eprintln!("Save this token: it will not be shown again. Export it as BOOKREVIEW_TOKEN.");
    Ok(())
}
