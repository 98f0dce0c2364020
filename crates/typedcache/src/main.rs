//! typedcache CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use typedcache::cli::Cli;
use typedcache::commands::run;
use typedcache::output::format_outcome;
use typedcache::RedisStore;
use typedcache_core::TypedCache;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typedcache=info,typedcache_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.connection_config();
    tracing::debug!(?config, "connection settings");

    let store = RedisStore::new(&config)?;
    let cache = TypedCache::new(store).with_read_mode(cli.read_mode());

    let outcome = run(&cache, cli.command, config.default_expiry_seconds()).await?;

    if let Some(output) = format_outcome(&outcome, cli.format, cli.quiet) {
        println!("{}", output);
    }

    Ok(())
}
