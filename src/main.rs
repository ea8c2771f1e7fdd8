//! Wanderpal - AI travel advisor in your terminal
//!
//! A thin client for the Wanderpal backend:
//! - Chat over the async submit-then-poll task protocol
//! - Conversation history, trips, profile, trending places
//! - Durable session and caches in a local SQLite database

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{EnvFilter, fmt};

use wanderpal::api::ApiClient;
use wanderpal::chat::ChatClient;
use wanderpal::config::{self, Config};
use wanderpal::conversations::Conversations;
use wanderpal::repl;
use wanderpal::session::SessionStore;
use wanderpal::trending::TrendingCache;

#[derive(Parser)]
#[command(name = "wanderpal")]
#[command(about = "AI travel advisor in your terminal")]
struct Args {
    /// Backend base URL
    #[arg(long, env = "WANDERPAL_BACKEND_URL")]
    backend_url: Option<String>,

    /// Database path (sqlite URL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Seconds between chat result polls
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Overall poll deadline, in seconds
    #[arg(long)]
    poll_deadline: Option<u64>,

    /// Latitude for trending lookups
    #[arg(long)]
    latitude: Option<f64>,

    /// Longitude for trending lookups
    #[arg(long)]
    longitude: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env (from ~/.wanderpal/.env or current dir)
    let env_path = config::data_dir().join(".env");
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    } else {
        let _ = dotenvy::dotenv();
    }

    // Initialize logging
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    // Load config file (~/.wanderpal/config.toml)
    let cfg = Config::load();

    // Resolve values: CLI args > env vars (handled by clap) > config file > defaults
    let backend_url = args
        .backend_url
        .or(cfg.backend_url)
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    let database_url = args.database_url.or(cfg.database_url).unwrap_or_else(|| {
        format!("sqlite:{}", config::data_dir().join("wanderpal.db").display())
    });

    let poll_interval = args.poll_interval.or(cfg.poll_interval_secs).unwrap_or(3);
    let poll_deadline = args.poll_deadline.or(cfg.poll_deadline_secs).unwrap_or(600);

    let default_location =
        match (args.latitude.or(cfg.latitude), args.longitude.or(cfg.longitude)) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        };

    use repl::colors::ansi::*;

    // Pretty startup banner
    println!();
    println!("{}{}  Wanderpal {}{}", BOLD, MAGENTA, env!("CARGO_PKG_VERSION"), RESET);
    println!("{}", repl::colors::separator(50));
    println!("{}Backend{}     {}", DIM, RESET, backend_url);
    println!("{}Polling{}     every {}s, deadline {}s", DIM, RESET, poll_interval, poll_deadline);

    std::fs::create_dir_all(config::data_dir())?;

    // Connect to the local database
    let db_url = if database_url.starts_with("sqlite") {
        database_url.clone()
    } else {
        format!("sqlite:{}", database_url)
    };

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);
    let db = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    println!("{}Database{}    {}connected{}", DIM, RESET, GREEN, RESET);

    let api = Arc::new(ApiClient::new(&backend_url)?);
    let session = Arc::new(SessionStore::new(db.clone()).await?);
    let conversations = Arc::new(Conversations::new(Arc::clone(&api)));
    let chat = ChatClient::new(
        Arc::clone(&api),
        Arc::clone(&session),
        Arc::clone(&conversations),
    )
    .with_poll_interval(Duration::from_secs(poll_interval))
    .with_poll_deadline(Duration::from_secs(poll_deadline));
    let trending = TrendingCache::new(db.clone(), Arc::clone(&api)).await?;

    match session.email().await? {
        Some(email) => println!(
            "{}Session{}     {}signed in{} ({})",
            DIM, RESET, GREEN, RESET, email
        ),
        None => println!("{}Session{}     {}anonymous{}", DIM, RESET, YELLOW, RESET),
    }

    println!("{}", repl::colors::separator(50));
    println!();

    repl::run(api, session, conversations, chat, trending, default_location).await
}
