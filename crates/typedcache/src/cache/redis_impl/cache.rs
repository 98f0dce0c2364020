//! Redis store implementation.
//!
//! Every call follows the same shape: open a connection, issue one command,
//! drop the connection. Nothing is pooled or shared between calls. The
//! connection is released on every exit path when it goes out of scope.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::{debug, trace};

use typedcache_core::cache::{Result, Store};
use typedcache_core::ConnectionConfig;

use super::error::map_redis_error;

/// Redis database every connection selects.
const DATABASE: i64 = 0;

/// Redis store that connects per operation.
#[derive(Debug, Clone)]
pub struct RedisStore {
    client: redis::Client,
    address: String,
}

impl RedisStore {
    /// Creates a Redis store from connection settings.
    ///
    /// No connection is made here; use [`Store::ping`] to probe the server.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the port is not a valid port
    /// number or the settings are rejected by the client.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let info = redis::ConnectionInfo {
            addr: redis::ConnectionAddr::Tcp(config.host().to_string(), config.port_number()?),
            redis: redis::RedisConnectionInfo {
                db: DATABASE,
                password: config.password().map(str::to_string),
                ..Default::default()
            },
        };
        let client = redis::Client::open(info).map_err(map_redis_error)?;

        Ok(Self {
            client,
            address: config.address(),
        })
    }

    /// Returns the `host:port` this store connects to.
    pub fn address(&self) -> &str {
        &self.address
    }

    async fn connect(&self) -> Result<MultiplexedConnection> {
        trace!(address = %self.address, "opening redis connection");
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        debug!(address = %self.address, reply = %pong, "redis ping");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connect().await?;
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connect().await?;

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connect().await?;
        conn.del::<_, ()>(key).await.map_err(map_redis_error)?;
        Ok(())
    }
}
