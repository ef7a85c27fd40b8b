pub mod books;
mod macros;
pub mod reviews;
pub mod users;

use std::net::SocketAddr;

use books::BookCommands;
use clap::{Args, Parser, Subcommand};
use reviews::ReviewCommands;
use users::UserCommands;

#[derive(Debug, Parser)]
#[command(author, version, about = "Share books and review them", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "BOOKREVIEW_URL",
        default_value = "http://localhost:5000"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Browse and manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },

    /// Manage your reviews
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },

    /// Register and inspect accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(
        long,
        env = "BOOKREVIEW_DATABASE_URL",
        default_value = "sqlite://bookreview.db"
    )]
    pub database_url: String,

    #[arg(long, env = "BOOKREVIEW_BIND_ADDRESS", default_value = "127.0.0.1:5000")]
    pub bind_address: SocketAddr,

    /// Frontend origin allowed to call the API from a browser
    #[arg(
        long,
        env = "BOOKREVIEW_CORS_ORIGIN",
        default_value = "http://localhost:5173"
    )]
    pub cors_origin: String,
}

pub(crate) fn print_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
