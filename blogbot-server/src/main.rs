use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::blog_service::BlogService;
use data::repositories::sqlite::post_repository::SqlitePostRepository;
use infrastructure::credentials::AdminCredentials;
use infrastructure::database::connect_options;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[derive(Debug, Parser)]
#[command(name = "blogbot-server", version, about = "Blog posts: HTTP admin API and Telegram bot")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// HTTP API with the admin page.
    Api,
    /// Telegram bot (long polling), read-only.
    Bot,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let repo = SqlitePostRepository::new(connect_options(&settings.database_path));
    let blog_service = Arc::new(BlogService::new(repo));
    blog_service
        .init_storage()
        .await
        .context("failed to initialize posts table")?;
    info!(path = %settings.database_path, "database initialized");

    match cli.mode {
        Mode::Api => {
            let (username, password) = settings.require_admin_credentials()?;
            let credentials = AdminCredentials::new(username, password);
            let state = AppState::new(blog_service, Arc::new(credentials));
            server::run_http(&settings, state).await
        }
        Mode::Bot => presentation::telegram::run_bot(&settings, blog_service).await,
    }
}
