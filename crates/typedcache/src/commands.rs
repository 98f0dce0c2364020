//! Executes CLI commands against any [`Cache`].

use typedcache_core::{Cache, Result, TypeTag, Value};

use crate::cli::Commands;

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pong,
    Stored { key: String, tag: TypeTag },
    Found(Value),
    Deleted { key: String },
}

/// Runs one command. `default_ttl` applies to `set` when no TTL was given.
///
/// Tags are parsed before the cache is touched, so an unknown tag fails with
/// `CacheError::InvalidTag` without any store call.
pub async fn run(cache: &dyn Cache, command: Commands, default_ttl: i64) -> Result<Outcome> {
    match command {
        Commands::Ping => {
            cache.open().await?;
            Ok(Outcome::Pong)
        }
        Commands::Set {
            key,
            tag,
            value,
            ttl,
        } => {
            let tag: TypeTag = tag.parse()?;
            let value = parse_input(tag, value);
            cache
                .set(&key, tag, &value, ttl.unwrap_or(default_ttl))
                .await?;
            Ok(Outcome::Stored { key, tag })
        }
        Commands::Get { key, tag } => {
            let tag: TypeTag = tag.parse()?;
            let value = cache.get(&key, tag).await?;
            Ok(Outcome::Found(value))
        }
        Commands::Delete { key } => {
            cache.delete(&key).await?;
            Ok(Outcome::Deleted { key })
        }
    }
}

/// Turns command-line text into a value for `tag`.
///
/// Raw values are stored as given. JSON and XML values are parsed as JSON so
/// objects, arrays and numbers keep their shape; anything that is not JSON is
/// treated as a plain string.
pub fn parse_input(tag: TypeTag, input: String) -> Value {
    match tag {
        TypeTag::Raw => Value::Text(input),
        TypeTag::Json | TypeTag::Xml => serde_json::from_str(&input)
            .map(Value::Structured)
            .unwrap_or_else(|_| Value::Text(input)),
    }
}
