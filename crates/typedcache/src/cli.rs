//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

use typedcache_core::{ConnectionConfig, ReadMode};

/// Type-tagged get/set/delete against a Redis cache.
#[derive(Debug, Parser)]
#[command(name = "typedcache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Cache server host.
    #[arg(long, short = 'H', env = "REDIS_HOST", default_value = "localhost")]
    pub host: String,

    /// Cache server port.
    #[arg(long, short, env = "REDIS_PORT", default_value = "6379")]
    pub port: String,

    /// Cache server password. Empty disables authentication.
    #[arg(long, env = "REDIS_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// TTL in seconds used by `set` when `--ttl` is not given. 0 means no expiry.
    #[arg(
        long,
        env = "CACHE_TTL_SECONDS",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub default_ttl: i64,

    /// Fail JSON and XML reads with an invalid type error instead of
    /// returning the decoded value.
    #[arg(long, env = "CACHE_LEGACY_GET")]
    pub legacy_get: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Connection settings assembled from the global options.
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.host, &self.port)
            .with_password(&self.password)
            .with_default_expiry_seconds(self.default_ttl)
    }

    pub fn read_mode(&self) -> ReadMode {
        if self.legacy_get {
            ReadMode::Legacy
        } else {
            ReadMode::Decoded
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Check that the cache server is reachable and accepts the credentials.
    Ping,
    /// Store a value under a key.
    Set {
        key: String,
        /// Encoding: json (1), xml (2) or raw (3).
        tag: String,
        /// Value to store. JSON and XML values are parsed as JSON first.
        value: String,
        /// Expiry in seconds. 0 or less stores without expiry.
        #[arg(long, allow_negative_numbers = true)]
        ttl: Option<i64>,
    },
    /// Read the value stored under a key.
    Get {
        key: String,
        /// Encoding the value was stored with.
        tag: String,
    },
    /// Delete a key. Deleting a missing key succeeds.
    Delete { key: String },
}
