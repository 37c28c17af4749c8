//! Paper Discovery - Entry Point
//!
//! Serves the HTTP API, or runs a single search with `--topic`.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_discovery::{Config, PaperDiscovery, server::DiscoveryServer};

#[derive(Parser, Debug)]
#[command(name = "paper-discovery")]
#[command(about = "Ranked paper search over Semantic Scholar and OpenAlex")]
#[command(version)]
struct Cli {
    /// Semantic Scholar API key (optional, enables higher rate limits)
    #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY")]
    api_key: Option<String>,

    /// Contact email for the OpenAlex polite pool
    #[arg(long, env = "OPENALEX_MAILTO")]
    openalex_mailto: Option<String>,

    /// HTTP server port
    #[arg(long, default_value = "8000", env = "PORT")]
    port: u16,

    /// Topic cache TTL in seconds (0 disables caching)
    #[arg(long, env = "PAPER_CACHE_TTL_SECS")]
    cache_ttl_secs: Option<u64>,

    /// Run one search, print the papers as JSON and exit
    #[arg(long)]
    topic: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so `--topic` output stays clean on stdout.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting paper discovery service");

    let mut config = Config::new(cli.api_key, cli.openalex_mailto).with_env_overrides()?;
    if let Some(secs) = cli.cache_ttl_secs {
        config.cache_ttl = Duration::from_secs(secs);
    }

    tracing::info!(
        has_api_key = config.has_api_key(),
        cache = config.cache_enabled(),
        "Configuration loaded"
    );

    let discovery = PaperDiscovery::new(&config)?;

    if let Some(topic) = cli.topic {
        let papers = discovery.discover(&topic).await?;
        println!("{}", serde_json::to_string_pretty(&papers)?);
        return Ok(());
    }

    DiscoveryServer::new(discovery).run_http(cli.port).await
}
