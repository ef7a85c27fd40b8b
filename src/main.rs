use anyhow::Result;
use bookreview::application::{ServerConfig, serve};
use bookreview::infrastructure::client::BookReviewClient;
use bookreview::presentation::cli::{Cli, Commands, ServeCommand, books, reviews, users};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => run_server(cmd).await,
        Commands::Book { command } => {
            let client = BookReviewClient::from_base_url(&cli.api_url)?;
            books::run(&client, command).await
        }
        Commands::Review { command } => {
            let client = BookReviewClient::from_base_url(&cli.api_url)?;
            reviews::run(&client, command).await
        }
        Commands::User { command } => {
            let client = BookReviewClient::from_base_url(&cli.api_url)?;
            users::run(&client, command).await
        }
    }
}

async fn run_server(command: ServeCommand) -> Result<()> {
    let config = ServerConfig {
        bind_address: command.bind_address,
        database_url: command.database_url,
        cors_origin: command.cors_origin,
    };

    serve(config).await
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
